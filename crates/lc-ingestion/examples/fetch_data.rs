//! Quick test to fetch real data from Lichess and dump output.
//!
//! Run with: cargo run -p lc-ingestion --example fetch_data

use lc_ingestion::{DataSource, LichessSource};
use lc_types::PerfType;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Lichess Data Fetch Test ===\n");

    let source = LichessSource::lichess();

    // Test 1: Leaderboard
    println!("1. Fetching classical leaderboard (top 3)...");
    let board = match source.get_leaderboard(3, PerfType::Classical).await {
        Ok(board) => {
            println!("   Success! Got {} users:", board.len());
            for (rank, user) in board.users.iter().enumerate() {
                println!(
                    "     {}. {} {}",
                    rank + 1,
                    user.title.as_deref().unwrap_or(""),
                    user.username
                );
            }
            println!();
            board
        }
        Err(e) => {
            println!("   Error: {}\n", e);
            return Ok(());
        }
    };

    // Test 2: Rating history of the top player (waits for the throttle)
    let Some(top) = board.users.first() else {
        return Ok(());
    };
    println!("2. Fetching rating history for {}...", top.username);
    match source.get_rating_history(&top.username).await {
        Ok(history) => {
            for entry in history.entries() {
                println!("     - {}: {} points", entry.name, entry.points.len());
            }
            if let Some(classical) = history.variant(PerfType::Classical.history_name()) {
                println!("   Last 5 classical points:");
                for point in classical.points.iter().rev().take(5) {
                    println!("     - {:?}: {}", point.date(), point.rating);
                }
            }
            println!();
        }
        Err(e) => {
            println!("   Error: {}\n", e);
        }
    }

    println!("=== Done ===");
    Ok(())
}
