//! Browsing session abstraction.
//!
//! A [`BrowsingSession`] owns one browser context bound to a persistent
//! profile and offers the three primitives a scan needs: open a search page,
//! list the result cards, and read a detail page's text. A
//! [`SessionLauncher`] hands out a fresh session per scan.

mod chromium;
mod dedup;
mod types;
mod url;

pub use chromium::{ChromiumLauncher, ChromiumSession, MODEL_LINK_SELECTOR};
pub use dedup::{dedup_candidates, MAX_CANDIDATES};
pub use types::*;
pub use url::build_search_url;
