//! State module for tracking crawl progress
//!
//! `CrawlState` holds the visited-page set, the pending frontier and the
//! menu-link exclusion set. It is owned by the coordinator and handed to a
//! `StateStore` at every page boundary.

mod crawl_state;

pub use crawl_state::CrawlState;
