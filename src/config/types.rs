use serde::Deserialize;

/// Default per-request timeout, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Main configuration structure for Link-Sweeper
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawl scope and behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Page the crawl starts from (seeds the frontier on a fresh run)
    #[serde(rename = "start-url")]
    pub start_url: String,

    /// Literal string prefix a URL must start with to be crawled
    #[serde(rename = "scope-prefix")]
    pub scope_prefix: String,

    /// Links starting with any of these prefixes are skipped during the crawl loop
    #[serde(rename = "exclude-prefixes", default)]
    pub exclude_prefixes: Vec<String>,

    /// Persist the menu-link set so the exclusion survives a resume
    #[serde(rename = "persist-menu-links", default)]
    pub persist_menu_links: bool,

    /// Maximum number of link checks in flight at once
    #[serde(rename = "max-concurrent-checks", default = "default_max_concurrent_checks")]
    pub max_concurrent_checks: usize,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Timeout applied to every request, in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV report (opened in append mode)
    #[serde(rename = "report-path")]
    pub report_path: String,

    /// Path to the SQLite crawl state database
    #[serde(rename = "state-path")]
    pub state_path: String,

    /// Only write rows for broken links
    #[serde(rename = "record-only-broken", default)]
    pub record_only_broken: bool,
}

fn default_max_concurrent_checks() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("link-sweeper/{}", env!("CARGO_PKG_VERSION"))
}
