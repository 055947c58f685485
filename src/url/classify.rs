use url::Url;

/// Content-Type substring that marks a response as an HTML document
const HTML_CONTENT_TYPE: &str = "text/html";

/// Checks that a URL has both a non-empty scheme and a non-empty host
///
/// Malformed strings yield `false`, never an error.
///
/// # Examples
///
/// ```
/// use link_sweeper::url::is_valid_url;
///
/// assert!(is_valid_url("https://example.com/page"));
/// assert!(!is_valid_url("/relative/path"));
/// assert!(!is_valid_url("mailto:someone@example.com"));
/// ```
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Checks whether a URL belongs to the crawl scope
///
/// Scope membership is a literal string prefix match, not a path-segment
/// match: a prefix of `https://example.com/reed` also admits
/// `https://example.com/reed-extra`.
///
/// # Examples
///
/// ```
/// use link_sweeper::url::is_in_scope;
///
/// let scope = "https://example.com/reed/";
/// assert!(is_in_scope("https://example.com/reed/page", scope));
/// assert!(!is_in_scope("https://example.com/other", scope));
/// ```
pub fn is_in_scope(url: &str, scope_prefix: &str) -> bool {
    url.starts_with(scope_prefix)
}

/// Checks whether a Content-Type header value denotes HTML
///
/// Case-sensitive substring match; parameters such as `charset` are ignored
/// simply because they follow the media type.
pub fn is_html(content_type: &str) -> bool {
    content_type.contains(HTML_CONTENT_TYPE)
}

/// Checks whether a URL starts with any of the excluded prefixes
pub fn is_excluded(url: &str, exclude_prefixes: &[String]) -> bool {
    exclude_prefixes
        .iter()
        .any(|prefix| url.starts_with(prefix.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_absolute_urls() {
        assert!(is_valid_url("https://example.com"));
        assert!(is_valid_url("http://example.com/path?q=1#frag"));
        assert!(is_valid_url("http://127.0.0.1:8080/"));
        assert!(is_valid_url("ftp://files.example.com/pub"));
    }

    #[test]
    fn test_missing_scheme_is_invalid() {
        assert!(!is_valid_url("example.com/page"));
        assert!(!is_valid_url("/page"));
        assert!(!is_valid_url("//example.com/page"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn test_missing_host_is_invalid() {
        assert!(!is_valid_url("mailto:test@example.com"));
        assert!(!is_valid_url("javascript:void(0)"));
        assert!(!is_valid_url("tel:+1234567890"));
        assert!(!is_valid_url("file:///etc/passwd"));
        assert!(!is_valid_url("data:text/html,<h1>x</h1>"));
    }

    #[test]
    fn test_malformed_is_invalid_not_panic() {
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("https://exa mple.com"));
        assert!(!is_valid_url("::::"));
    }

    #[test]
    fn test_in_scope_prefix() {
        let scope = "https://example.com/reed/";
        assert!(is_in_scope("https://example.com/reed/", scope));
        assert!(is_in_scope("https://example.com/reed/a/b", scope));
        assert!(!is_in_scope("https://example.com/reed", scope));
        assert!(!is_in_scope("http://example.com/reed/a", scope));
        assert!(!is_in_scope("https://external.example/", scope));
    }

    #[test]
    fn test_scope_is_not_path_aware() {
        let scope = "https://example.com/reed";
        assert!(is_in_scope("https://example.com/reed-extra", scope));
        assert!(is_in_scope("https://example.com/reedbook", scope));
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("application/xhtml+xml"));
        assert!(!is_html(""));
    }

    #[test]
    fn test_is_html_is_case_sensitive() {
        assert!(!is_html("Text/HTML"));
    }

    #[test]
    fn test_is_excluded() {
        let prefixes = vec!["https://example.com/reed/tagged-records".to_string()];
        assert!(is_excluded(
            "https://example.com/reed/tagged-records/42",
            &prefixes
        ));
        assert!(!is_excluded("https://example.com/reed/about", &prefixes));
        assert!(!is_excluded("https://example.com/reed/about", &[]));
    }
}
