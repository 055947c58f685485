//! Link verification
//!
//! A link is `Working` only when a GET for it ends in HTTP 200. Every other
//! status and every transport failure makes it `Broken`. Verification
//! never fails.

use crate::crawler::fetcher::fetch_status;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Outcome of checking a single link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    Working,
    Broken,
}

impl LinkStatus {
    /// Maps a final HTTP status code to a verdict
    pub fn from_status_code(code: u16) -> Self {
        if code == 200 {
            Self::Working
        } else {
            Self::Broken
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "Working",
            Self::Broken => "Broken",
        }
    }

    /// Parses the status column of a report row
    pub fn from_report_str(s: &str) -> Option<Self> {
        match s {
            "Working" => Some(Self::Working),
            "Broken" => Some(Self::Broken),
            _ => None,
        }
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks whether a link is working
///
/// Uses the client's configured timeout. Transport failures are logged at
/// debug level and reported as `Broken`.
pub async fn check_link(client: &Client, url: &str) -> LinkStatus {
    match fetch_status(client, url).await {
        Ok(code) => {
            if code != 200 {
                tracing::debug!("{} answered HTTP {}", url, code);
            }
            LinkStatus::from_status_code(code)
        }
        Err(e) => {
            tracing::debug!("{}", e);
            LinkStatus::Broken
        }
    }
}

/// Verdicts already obtained during this run
///
/// Guarantees each URL is fetched for verification at most once per run.
#[derive(Debug, Default)]
pub struct VerdictCache {
    verdicts: HashMap<String, LinkStatus>,
}

impl VerdictCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, url: &str) -> Option<LinkStatus> {
        self.verdicts.get(url).copied()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.verdicts.contains_key(url)
    }

    pub fn insert(&mut self, url: impl Into<String>, status: LinkStatus) {
        self.verdicts.insert(url.into(), status);
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

/// Verdict for one link of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub url: String,
    pub status: LinkStatus,
    /// True if the verdict came from the cache rather than a fresh request
    pub reused: bool,
}

/// Verifies a batch of links with at most `max_concurrent` requests in flight
///
/// URLs already in `cache` are not fetched again. The returned verdicts are
/// in the same order as `urls`.
pub async fn verify_all(
    client: &Client,
    urls: &[String],
    cache: &mut VerdictCache,
    max_concurrent: usize,
) -> Vec<Verdict> {
    let mut seen = HashSet::new();
    let pending: Vec<&str> = urls
        .iter()
        .map(String::as_str)
        .filter(|url| !cache.contains(url) && seen.insert(*url))
        .collect();

    let checked: Vec<(&str, LinkStatus)> = stream::iter(pending)
        .map(|url| async move { (url, check_link(client, url).await) })
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let fresh: HashSet<&str> = checked.iter().map(|(url, _)| *url).collect();
    for (url, status) in checked {
        cache.insert(url, status);
    }

    urls.iter()
        .map(|url| Verdict {
            url: url.clone(),
            status: cache.get(url).unwrap_or(LinkStatus::Broken),
            reused: !fresh.contains(url.as_str()),
        })
        .collect()
}
