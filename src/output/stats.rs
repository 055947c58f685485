//! Crawl statistics
//!
//! Counters kept by the coordinator during a run, and a tally of an
//! existing report file for the `--stats` mode.

use crate::crawler::LinkStatus;
use crate::output::csv::HEADER;
use crate::output::OutputResult;
use std::path::Path;

/// Counters for a single crawl run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Pages whose body links were processed in this run
    pub pages_visited: u64,

    /// Body links checked in the crawl loop
    pub links_checked: u64,

    /// Menu links checked during the menu pass
    pub menu_links_checked: u64,

    /// Links (menu and body) that came back Working
    pub working: u64,

    /// Links (menu and body) that came back Broken
    pub broken: u64,

    /// Checks answered from the per-run verdict cache instead of the network
    pub verdicts_reused: u64,

    /// Rows actually written to the report
    pub rows_written: u64,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one verdict
    pub fn record(&mut self, status: LinkStatus) {
        match status {
            LinkStatus::Working => self.working += 1,
            LinkStatus::Broken => self.broken += 1,
        }
    }

    /// Total checks performed, menu pass included
    pub fn total_checked(&self) -> u64 {
        self.links_checked + self.menu_links_checked
    }
}

/// Row counts of a report file on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTally {
    pub header_rows: u64,
    pub working: u64,
    pub broken: u64,
    pub unrecognized: u64,
}

impl ReportTally {
    pub fn rows(&self) -> u64 {
        self.working + self.broken + self.unrecognized
    }
}

/// Tallies the rows of a CSV report
///
/// A missing file yields an empty tally. The status is always the last
/// column and never quoted, so quoted URLs containing commas are harmless.
pub fn tally_report(path: &Path) -> OutputResult<ReportTally> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ReportTally::default()),
        Err(e) => return Err(e.into()),
    };

    let header = HEADER.join(",");
    let mut tally = ReportTally::default();

    for line in content.lines().filter(|l| !l.is_empty()) {
        if line == header {
            tally.header_rows += 1;
            continue;
        }
        let status = line.rsplit_once(',').map(|(_, s)| s);
        match status.and_then(LinkStatus::from_report_str) {
            Some(LinkStatus::Working) => tally.working += 1,
            Some(LinkStatus::Broken) => tally.broken += 1,
            None => tally.unrecognized += 1,
        }
    }

    Ok(tally)
}

/// Prints run statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Link-Sweeper Run Statistics ===\n");
    println!("Pages visited:        {}", stats.pages_visited);
    println!("Menu links checked:   {}", stats.menu_links_checked);
    println!("Body links checked:   {}", stats.links_checked);
    println!("  Working:            {}", stats.working);
    println!("  Broken:             {}", stats.broken);
    println!("Verdicts reused:      {}", stats.verdicts_reused);
    println!("Report rows written:  {}", stats.rows_written);
}

/// Prints a report tally to stdout
pub fn print_report_tally(path: &Path, tally: &ReportTally) {
    println!("Report: {}", path.display());
    println!("  Rows:               {}", tally.rows());
    println!("  Working:            {}", tally.working);
    println!("  Broken:             {}", tally.broken);
    if tally.unrecognized > 0 {
        println!("  Unrecognized:       {}", tally.unrecognized);
    }
    if tally.header_rows > 1 {
        println!("  Header rows:        {} (report was restarted)", tally.header_rows);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_record_counts() {
        let mut stats = CrawlStatistics::new();
        stats.record(LinkStatus::Working);
        stats.record(LinkStatus::Broken);
        stats.record(LinkStatus::Broken);
        stats.links_checked = 2;
        stats.menu_links_checked = 1;

        assert_eq!(stats.working, 1);
        assert_eq!(stats.broken, 2);
        assert_eq!(stats.total_checked(), 3);
    }

    #[test]
    fn test_tally_missing_file() {
        let tally = tally_report(Path::new("/nonexistent/report.csv")).unwrap();
        assert_eq!(tally, ReportTally::default());
    }

    #[test]
    fn test_tally_report() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "Source Page,Link URL,Status\r\n\
             https://e.com/,https://e.com/a,Working\r\n\
             https://e.com/,\"https://e.com/b,c\",Broken\r\n\
             Source Page,Link URL,Status\r\n\
             https://e.com/x,https://e.com/y,Broken\r\n\
             garbage\r\n"
        )
        .unwrap();

        let tally = tally_report(file.path()).unwrap();
        assert_eq!(tally.header_rows, 2);
        assert_eq!(tally.working, 1);
        assert_eq!(tally.broken, 2);
        assert_eq!(tally.unrecognized, 1);
        assert_eq!(tally.rows(), 4);
    }
}
