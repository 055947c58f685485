use crate::url::classify::is_valid_url;
use crate::{UrlError, UrlResult};
use url::Url;

/// Parses a page URL that links on the page will be resolved against
pub fn parse_base(page_url: &str) -> UrlResult<Url> {
    let base = Url::parse(page_url).map_err(|e| UrlError::Parse(format!("{}: {}", page_url, e)))?;
    if base.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(page_url.to_string()));
    }
    Ok(base)
}

/// Resolves an href against the page it was found on
///
/// Returns `None` when the joined result is not a valid absolute URL
/// (`mailto:`, `javascript:` and similar hrefs fall out here). Query
/// strings and fragments are kept verbatim.
///
/// # Examples
///
/// ```
/// use link_sweeper::url::{parse_base, resolve_href};
///
/// let base = parse_base("https://example.com/docs/index.html").unwrap();
/// assert_eq!(
///     resolve_href(&base, "guide.html").as_deref(),
///     Some("https://example.com/docs/guide.html")
/// );
/// assert_eq!(resolve_href(&base, "mailto:a@example.com"), None);
/// ```
pub fn resolve_href(base: &Url, href: &str) -> Option<String> {
    let joined = base.join(href).ok()?.to_string();
    if is_valid_url(&joined) {
        Some(joined)
    } else {
        None
    }
}
