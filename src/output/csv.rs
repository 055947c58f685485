//! CSV report writer
//!
//! Rows are `source page, link URL, status`. The file is always opened in
//! append mode so a resumed crawl keeps adding to the same report.

use crate::crawler::LinkStatus;
use crate::output::traits::{LinkRecord, OutputResult, ReportSink};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Column names of the report
pub const HEADER: [&str; 3] = ["Source Page", "Link URL", "Status"];

const LINE_TERMINATOR: &str = "\r\n";

/// Append-only CSV report
pub struct CsvReport {
    path: PathBuf,
    writer: BufWriter<File>,
    record_only_broken: bool,
    rows_written: u64,
}

impl CsvReport {
    /// Opens (or creates) the report at `path` in append mode
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    /// * `record_only_broken` - Drop rows whose status is `Working`
    pub fn open(path: &Path, record_only_broken: bool) -> OutputResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            record_only_broken,
            rows_written: 0,
        })
    }

    /// Rows written through this handle (header excluded)
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    fn is_empty(&self) -> OutputResult<bool> {
        let on_disk = self.writer.get_ref().metadata()?.len();
        Ok(on_disk == 0 && self.writer.buffer().is_empty())
    }

    fn write_row(&mut self, fields: &[&str]) -> OutputResult<()> {
        let line = fields
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(",");
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(LINE_TERMINATOR.as_bytes())?;
        Ok(())
    }
}

impl ReportSink for CsvReport {
    fn write_header(&mut self) -> OutputResult<bool> {
        if !self.is_empty()? {
            return Ok(false);
        }
        self.write_row(&HEADER)?;
        Ok(true)
    }

    fn append(&mut self, record: &LinkRecord) -> OutputResult<bool> {
        if self.record_only_broken && record.status != LinkStatus::Broken {
            return Ok(false);
        }
        self.write_row(&[
            record.source_page.as_str(),
            record.target.as_str(),
            record.status.as_str(),
        ])?;
        self.rows_written += 1;
        Ok(true)
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_data()?;
        Ok(())
    }
}

impl Drop for CsvReport {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush report {}: {}", self.path.display(), e);
        }
    }
}

/// Quotes a field when it contains a delimiter, quote or line break (RFC 4180)
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_escape_plain_field() {
        assert_eq!(escape_field("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_escape_field_with_comma_and_quote() {
        assert_eq!(
            escape_field("https://example.com/a,b"),
            "\"https://example.com/a,b\""
        );
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_header_then_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let mut report = CsvReport::open(&path, false).unwrap();
        assert!(report.write_header().unwrap());
        report
            .append(&LinkRecord::new(
                "https://e.com/",
                "https://e.com/about",
                LinkStatus::Working,
            ))
            .unwrap();
        report
            .append(&LinkRecord::new(
                "https://e.com/",
                "https://e.com/gone",
                LinkStatus::Broken,
            ))
            .unwrap();
        report.flush().unwrap();

        assert_eq!(
            read(&path),
            "Source Page,Link URL,Status\r\n\
             https://e.com/,https://e.com/about,Working\r\n\
             https://e.com/,https://e.com/gone,Broken\r\n"
        );
        assert_eq!(report.rows_written(), 2);
    }

    #[test]
    fn test_record_only_broken_filters_working() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let mut report = CsvReport::open(&path, true).unwrap();
        assert!(!report
            .append(&LinkRecord::new("https://e.com/", "https://e.com/ok", LinkStatus::Working))
            .unwrap());
        assert!(report
            .append(&LinkRecord::new("https://e.com/", "https://e.com/bad", LinkStatus::Broken))
            .unwrap());
        report.flush().unwrap();

        let content = read(&path);
        assert!(!content.contains("Working"));
        assert!(content.contains("https://e.com/bad,Broken"));
    }

    #[test]
    fn test_header_not_repeated_on_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        {
            let mut report = CsvReport::open(&path, false).unwrap();
            assert!(report.write_header().unwrap());
            report.flush().unwrap();
        }

        let mut report = CsvReport::open(&path, false).unwrap();
        assert!(!report.write_header().unwrap());
        report.flush().unwrap();

        assert_eq!(read(&path).matches("Source Page").count(), 1);
    }

    #[test]
    fn test_header_skipped_after_buffered_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        let mut report = CsvReport::open(&path, false).unwrap();
        report
            .append(&LinkRecord::new("https://e.com/", "https://e.com/x", LinkStatus::Broken))
            .unwrap();
        assert!(!report.write_header().unwrap());
    }

    #[test]
    fn test_reopen_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.csv");

        for target in ["https://e.com/1", "https://e.com/2"] {
            let mut report = CsvReport::open(&path, false).unwrap();
            report
                .append(&LinkRecord::new("https://e.com/", target, LinkStatus::Broken))
                .unwrap();
        }

        let content = read(&path);
        assert!(content.contains("https://e.com/1"));
        assert!(content.contains("https://e.com/2"));
    }
}
