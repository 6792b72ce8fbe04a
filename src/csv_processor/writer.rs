use crate::csv_processor::row::OutputRow;
use crate::utils::{OutputLayout, Result, ScoutError};
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Byte-order mark so spreadsheet tools pick UTF-8 for the translated names.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvStreamWriter {
    path: PathBuf,
    layout: OutputLayout,
    writer: Option<Writer<File>>,
    rows_written: usize,
}

impl CsvStreamWriter {
    pub fn new(path: impl Into<PathBuf>, layout: OutputLayout) -> Self {
        Self {
            path: path.into(),
            layout,
            writer: None,
            rows_written: 0,
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.path)?;
        file.write_all(UTF8_BOM)?;

        let mut writer = Writer::from_writer(file);
        writer.write_record(self.layout.headers())?;
        self.writer = Some(writer);
        Ok(())
    }

    pub fn write_row(&mut self, row: &OutputRow) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            ScoutError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Writer not initialized",
            ))
        })?;

        writer.write_record(row.cells(self.layout))?;
        self.rows_written += 1;
        Ok(())
    }

    pub fn write_rows(&mut self, rows: &[OutputRow]) -> Result<()> {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<usize> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(self.rows_written)
    }
}

/// Writes `rows` to `path` in one go and returns the row count.
pub fn export_rows(path: &Path, layout: OutputLayout, rows: &[OutputRow]) -> Result<usize> {
    let mut writer = CsvStreamWriter::new(path, layout);
    writer.initialize()?;
    writer.write_rows(rows)?;
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_starts_with_bom_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let rows = vec![OutputRow {
            translated_name: "牛奶".to_string(),
            name: "Milk 1L".to_string(),
            current_price: Some(2.4),
            min_price: Some(2.0),
            max_price: Some(2.4),
            price_gap: Some(0.4),
            ..Default::default()
        }];

        assert_eq!(export_rows(&path, OutputLayout::Basic, &rows).unwrap(), 1);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("translated_name,name,current_price,min_price,max_price,price_gap")
        );
        assert_eq!(lines.next(), Some("牛奶,Milk 1L,2.4,2,2.4,0.4"));
    }

    #[test]
    fn writing_before_initialize_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = CsvStreamWriter::new(dir.path().join("out.csv"), OutputLayout::Basic);
        assert!(writer.write_row(&OutputRow::default()).is_err());
    }
}
