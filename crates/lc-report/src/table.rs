//! Wide export table and CSV writer.
//!
//! One row per player, one column per day of the window. The column axis is
//! fixed when the table is created and every pushed row must match it.

use crate::error::ReportError;
use chrono::NaiveDate;
use lc_types::{window_axis, DateFormat, TableRow, WINDOW_DAYS};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the first CSV column.
pub const USERNAME_COLUMN: &str = "Username";

/// File name of the export for `player_count` players.
pub fn export_file_name(player_count: usize) -> String {
    format!(
        "rating_history_{}_players_{}_days.csv",
        player_count, WINDOW_DAYS
    )
}

/// Rows of the export, in insertion (rank) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    reference_date: NaiveDate,
    columns: Vec<NaiveDate>,
    rows: Vec<TableRow>,
}

impl ExportTable {
    /// Empty table over the 30 days ending at `reference_date`.
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            columns: window_axis(reference_date),
            rows: Vec::new(),
        }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn columns(&self) -> &[NaiveDate] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::AxisMismatch`] if the row's dates are not the
    /// table columns.
    pub fn push_row(&mut self, row: TableRow) -> Result<(), ReportError> {
        if row.columns != self.columns || row.cells.len() != self.columns.len() {
            return Err(ReportError::AxisMismatch {
                username: row.username,
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// `Username` followed by each column date as `YYYY-MM-DD`.
    pub fn header(&self) -> Vec<String> {
        std::iter::once(USERNAME_COLUMN.to_string())
            .chain(
                self.columns
                    .iter()
                    .map(|date| DateFormat::Complete.render(*date)),
            )
            .collect()
    }

    /// Write the table as CSV.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(self.header())?;
        for row in &self.rows {
            csv.write_record(std::iter::once(row.username.clone()).chain(row.rendered_cells()))?;
        }
        csv.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String, ReportError> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the CSV to `path`, replacing any existing file.
    ///
    /// The content goes to a temp file in the same directory first and is
    /// renamed into place, so readers never see a partial export.
    pub fn write_csv(&self, path: &Path) -> Result<PathBuf, ReportError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        self.write_to(temp.as_file_mut())?;
        temp.as_file_mut().sync_all()?;

        temp.persist(path).map_err(|e| ReportError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        tracing::debug!("Wrote {} rows to {}", self.rows.len(), path.display());
        Ok(path.to_path_buf())
    }

    /// The first `n` rows rendered as CSV lines, header included.
    pub fn preview(&self, n: usize) -> Vec<String> {
        std::iter::once(self.header().join(","))
            .chain(self.rows.iter().take(n).map(|row| row.to_string()))
            .collect()
    }
}
