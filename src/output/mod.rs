//! Output module for the link report
//!
//! This module handles:
//! - The append-only CSV report of verified links
//! - Per-run crawl statistics
//! - Tallying an existing report for the `--stats` mode

mod csv;
pub mod stats;
mod traits;

pub use self::csv::{escape_field, CsvReport, HEADER};
pub use stats::{print_report_tally, print_statistics, tally_report, CrawlStatistics, ReportTally};
pub use traits::{LinkRecord, OutputError, OutputResult, ReportSink};
