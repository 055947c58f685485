use crate::config::types::{Config, CrawlConfig, HttpConfig, OutputConfig};
use crate::url::{is_in_scope, is_valid_url};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl scope configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    validate_url("start-url", &config.start_url)?;
    validate_url("scope-prefix", &config.scope_prefix)?;

    if !is_in_scope(&config.start_url, &config.scope_prefix) {
        return Err(ConfigError::Validation(format!(
            "start-url '{}' is outside scope-prefix '{}'",
            config.start_url, config.scope_prefix
        )));
    }

    if config.exclude_prefixes.iter().any(|p| p.is_empty()) {
        // An empty prefix would exclude every link
        return Err(ConfigError::Validation(
            "exclude-prefixes cannot contain an empty string".to_string(),
        ));
    }

    if config.max_concurrent_checks < 1 || config.max_concurrent_checks > 64 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-checks must be between 1 and 64, got {}",
            config.max_concurrent_checks
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report-path cannot be empty".to_string(),
        ));
    }

    if config.state_path.is_empty() {
        return Err(ConfigError::Validation(
            "state-path cannot be empty".to_string(),
        ));
    }

    if config.report_path == config.state_path {
        return Err(ConfigError::Validation(format!(
            "report-path and state-path must differ, both are '{}'",
            config.report_path
        )));
    }

    Ok(())
}

/// Checks that a configured URL parses and carries both scheme and host
///
/// Discovered links are compared against these strings after resolution,
/// so the value must already be in the parser's normalized form.
fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if parsed.as_str() != value {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' is not in normalized form, use '{}'",
            field,
            value,
            parsed.as_str()
        )));
    }

    if !is_valid_url(value) {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must have a scheme and a host",
            field, value
        )));
    }

    Ok(())
}
