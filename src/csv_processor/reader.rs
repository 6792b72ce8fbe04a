use crate::csv_processor::row::OutputRow;
use crate::utils::{unsanitize_cell, Result, ScoutError};
use std::path::PathBuf;

/// Reads a previously exported price file, either layout.
pub struct CsvStreamReader {
    path: PathBuf,
}

impl CsvStreamReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_text(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(ScoutError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", self.path.display()),
            )));
        }

        let content = std::fs::read_to_string(&self.path)?;
        Ok(content
            .strip_prefix('\u{feff}')
            .map(str::to_string)
            .unwrap_or(content))
    }

    pub fn read_headers(&self) -> Result<Vec<String>> {
        let content = self.load_text()?;
        let mut reader = csv::Reader::from_reader(content.as_bytes());
        Ok(reader.headers()?.iter().map(|s| s.to_string()).collect())
    }

    /// Rows as they were before export; the formula guard added to text
    /// cells is removed again.
    pub fn read_rows(&self) -> Result<Vec<OutputRow>> {
        let content = self.load_text()?;
        let mut reader = csv::Reader::from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            let mut row: OutputRow = result?;
            row.translated_name = unsanitize_cell(&row.translated_name);
            row.name = unsanitize_cell(&row.name);
            row.url = row.url.as_deref().map(unsanitize_cell);
            rows.push(row);
        }

        tracing::debug!(path = %self.path.display(), rows = rows.len(), "Loaded exported rows");
        Ok(rows)
    }
}
