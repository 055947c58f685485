//! URL handling module for Link-Sweeper
//!
//! Pure predicates deciding what the crawler does with a URL (validity,
//! scope membership, HTML content type, exclusion) and href resolution
//! against the page a link was found on.

mod classify;
mod resolve;

pub use classify::{is_excluded, is_html, is_in_scope, is_valid_url};
pub use resolve::{parse_base, resolve_href};
