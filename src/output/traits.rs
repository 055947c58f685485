//! Report sink traits and types
//!
//! This module defines the trait interface for report sinks and the row
//! type they receive.

use crate::crawler::LinkStatus;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// One verified link: where it was found, where it points, and its verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// The page the link was found on
    pub source_page: String,

    /// The absolute link target
    pub target: String,

    /// Verification outcome
    pub status: LinkStatus,
}

impl LinkRecord {
    pub fn new(source_page: impl Into<String>, target: impl Into<String>, status: LinkStatus) -> Self {
        Self {
            source_page: source_page.into(),
            target: target.into(),
            status,
        }
    }
}

/// Append-only destination for link records
///
/// Implementations decide which rows to keep (see `record_only_broken`);
/// the coordinator hands every record over.
pub trait ReportSink {
    /// Writes the header row if the report does not have one yet
    ///
    /// Returns true if a header was written.
    fn write_header(&mut self) -> OutputResult<bool>;

    /// Appends a record, subject to the sink's filter
    ///
    /// Returns true if the row was written, false if it was filtered out.
    fn append(&mut self, record: &LinkRecord) -> OutputResult<bool>;

    /// Pushes buffered rows to durable storage
    fn flush(&mut self) -> OutputResult<()>;
}
