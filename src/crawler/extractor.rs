//! Link extraction from live pages
//!
//! Fetches a page, gates on the HTML content type, and hands the document
//! to the parser. Every failure degrades to an empty result and is logged;
//! nothing here returns an error to the caller.

use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::parser::{parse_all_links, parse_menu_links};
use crate::url::parse_base;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// A link target paired with the page it was found on
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageLink {
    pub source_page: String,
    pub target: String,
}

/// Fetches the start page and returns the links in its navigation regions
pub async fn extract_menu_links(client: &Client, page_url: &str) -> HashSet<String> {
    match fetch_document(client, page_url).await {
        Some((base, body)) => parse_menu_links(&body, &base),
        None => HashSet::new(),
    }
}

/// Fetches a page and returns every link on it that is not a menu link
///
/// Each returned link carries `page_url` as its source.
pub async fn extract_body_links(
    client: &Client,
    page_url: &str,
    menu_links: &HashSet<String>,
) -> HashSet<PageLink> {
    let Some((base, body)) = fetch_document(client, page_url).await else {
        return HashSet::new();
    };

    parse_all_links(&body, &base)
        .into_iter()
        .filter(|target| !menu_links.contains(target))
        .map(|target| PageLink {
            source_page: page_url.to_string(),
            target,
        })
        .collect()
}

/// Fetches `page_url` and returns its parsed base URL and HTML body
///
/// Links resolve against the requested URL, not the post-redirect one.
async fn fetch_document(client: &Client, page_url: &str) -> Option<(Url, String)> {
    let base = match parse_base(page_url) {
        Ok(base) => base,
        Err(e) => {
            tracing::warn!("Skipping page with unusable URL {}: {}", page_url, e);
            return None;
        }
    };

    match fetch_page(client, page_url).await {
        Ok(FetchOutcome::Html {
            final_url,
            status_code,
            body,
        }) => {
            if final_url != page_url {
                tracing::debug!("{} redirected to {}", page_url, final_url);
            }
            tracing::trace!("Fetched {} (HTTP {}, {} bytes)", page_url, status_code, body.len());
            Some((base, body))
        }
        Ok(FetchOutcome::NotHtml {
            status_code,
            content_type,
        }) => {
            tracing::debug!(
                "Not HTML, skipping {} (HTTP {}, {})",
                page_url,
                status_code,
                content_type
            );
            None
        }
        Err(e) => {
            tracing::warn!("Error accessing {}: {}", page_url, e);
            None
        }
    }
}
