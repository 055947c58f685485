//! HTML parser for extracting anchors
//!
//! Pure functions over an already-fetched document:
//! - `parse_menu_links`: anchors inside `<nav>` landmark regions
//! - `parse_all_links`: every anchor in the document
//!
//! Every `href` is resolved against the page URL and kept only if the
//! result is a valid absolute URL.

use crate::url::resolve_href;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Anchors nested anywhere inside a navigation landmark
const MENU_ANCHOR_SELECTOR: &str = "nav a[href]";

/// Every anchor that carries an href
const ANCHOR_SELECTOR: &str = "a[href]";

/// Extracts the deduplicated set of links found in navigation regions
///
/// # Example
///
/// ```
/// use link_sweeper::crawler::parse_menu_links;
/// use url::Url;
///
/// let html = r#"<nav><a href="/about">About</a></nav><a href="/contact">Contact</a>"#;
/// let base = Url::parse("https://example.com/").unwrap();
/// let links = parse_menu_links(html, &base);
/// assert!(links.contains("https://example.com/about"));
/// assert_eq!(links.len(), 1);
/// ```
pub fn parse_menu_links(html: &str, base_url: &Url) -> HashSet<String> {
    select_links(&Html::parse_document(html), MENU_ANCHOR_SELECTOR, base_url)
}

/// Extracts the deduplicated set of links found anywhere in the document
pub fn parse_all_links(html: &str, base_url: &Url) -> HashSet<String> {
    select_links(&Html::parse_document(html), ANCHOR_SELECTOR, base_url)
}

fn select_links(document: &Html, selector: &str, base_url: &Url) -> HashSet<String> {
    let mut links = HashSet::new();

    if let Ok(selector) = Selector::parse(selector) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_href(base_url, href) {
                    links.insert(absolute_url);
                }
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/reed/page").unwrap()
    }

    const PAGE: &str = r#"
        <html>
        <head><title>Test</title></head>
        <body>
            <header>
                <nav>
                    <ul>
                        <li><a href="/reed/about">About</a></li>
                        <li><a href="https://example.com/reed/people">People</a></li>
                    </ul>
                </nav>
            </header>
            <main>
                <a href="contact">Contact</a>
                <a href="https://external.example/">External</a>
                <a href="mailto:someone@example.com">Mail</a>
                <a name="anchor-without-href">Nothing</a>
            </main>
            <footer><nav><a href="/reed/about">About again</a></nav></footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_menu_links_only_from_nav() {
        let links = parse_menu_links(PAGE, &base_url());
        assert_eq!(
            links,
            HashSet::from([
                "https://example.com/reed/about".to_string(),
                "https://example.com/reed/people".to_string(),
            ])
        );
    }

    #[test]
    fn test_all_links_include_nav_and_body() {
        let links = parse_all_links(PAGE, &base_url());
        assert!(links.contains("https://example.com/reed/about"));
        assert!(links.contains("https://example.com/reed/people"));
        assert!(links.contains("https://example.com/reed/contact"));
        assert!(links.contains("https://external.example/"));
        assert_eq!(links.len(), 4);
    }

    #[test]
    fn test_invalid_schemes_dropped() {
        let html = r#"
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:test@example.com">Mail</a>
            <a href="tel:+1234567890">Call</a>
        "#;
        assert!(parse_all_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"<a href="/x">1</a><a href="/x">2</a><a href="https://example.com/x">3</a>"#;
        assert_eq!(parse_all_links(html, &base_url()).len(), 1);
    }

    #[test]
    fn test_fragment_links_are_distinct_urls() {
        let html = r##"<a href="#top">Top</a><a href="#bottom">Bottom</a>"##;
        let links = parse_all_links(html, &base_url());
        assert!(links.contains("https://example.com/reed/page#top"));
        assert!(links.contains("https://example.com/reed/page#bottom"));
    }

    #[test]
    fn test_empty_href_resolves_to_page() {
        let html = r#"<a href="">Self</a>"#;
        let links = parse_all_links(html, &base_url());
        assert!(links.contains("https://example.com/reed/page"));
    }

    #[test]
    fn test_no_nav_means_no_menu_links() {
        let html = r#"<html><body><a href="/a">A</a></body></html>"#;
        assert!(parse_menu_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let html = r#"<nav><a href="/a">A<nav><a href="/b"></div></body>"#;
        let links = parse_menu_links(html, &base_url());
        assert!(links.contains("https://example.com/a"));
    }
}
