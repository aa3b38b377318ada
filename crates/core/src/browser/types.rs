//! Types for the browsing session.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A marketplace entry discovered on a search page, before deep inspection.
///
/// Identity is the `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub url: String,
    pub title: String,
    pub thumbnail_url: String,
}

/// Anchor data as collected in-page (before deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCandidate {
    /// Anchor href.
    pub url: String,
    /// Image alt text (may be empty).
    #[serde(default)]
    pub alt: String,
    /// Anchor inner text (may be empty).
    #[serde(default)]
    pub text: String,
    /// Image src.
    #[serde(default)]
    pub thumbnail_url: String,
}

/// Restricts results to models created in the last N days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RecencyWindow {
    /// No recency filter.
    AllTime,
    #[default]
    LastWeek,
    LastMonth,
}

impl RecencyWindow {
    /// Day count, 0 meaning unfiltered.
    pub fn days(&self) -> u32 {
        match self {
            RecencyWindow::AllTime => 0,
            RecencyWindow::LastWeek => 7,
            RecencyWindow::LastMonth => 30,
        }
    }
}

impl TryFrom<u32> for RecencyWindow {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        match days {
            0 => Ok(RecencyWindow::AllTime),
            7 => Ok(RecencyWindow::LastWeek),
            30 => Ok(RecencyWindow::LastMonth),
            other => Err(format!(
                "recency window must be 0, 7 or 30 days, got {}",
                other
            )),
        }
    }
}

impl From<RecencyWindow> for u32 {
    fn from(window: RecencyWindow) -> Self {
        window.days()
    }
}

/// Result ordering on the search page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Trending.
    #[serde(rename = "hotScore")]
    HotScore,
    /// Most liked.
    #[serde(rename = "likeCount")]
    LikeCount,
    /// Most downloaded.
    #[serde(rename = "downloadCount")]
    DownloadCount,
}

impl SortKey {
    /// Query parameter value understood by the site.
    pub fn as_param(&self) -> &'static str {
        match self {
            SortKey::HotScore => "hotScore",
            SortKey::LikeCount => "likeCount",
            SortKey::DownloadCount => "downloadCount",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_param())
    }
}

/// Errors surfaced by a browsing session.
///
/// All variants are recoverable from the scan's point of view: the caller
/// skips the affected term or candidate and keeps the session alive.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("in-page evaluation failed: {0}")]
    Evaluation(String),

    #[error("browser session already closed")]
    Closed,
}

/// One long-lived browser context driven by a single caller.
///
/// Methods take `&mut self`: navigation state belongs to exactly one driver.
#[async_trait]
pub trait BrowsingSession: Send {
    /// Open the search page for `term` and wait (bounded) for result anchors.
    ///
    /// A wait timeout is not an error: the page is used as-is.
    async fn go_to_search(
        &mut self,
        term: &str,
        recency: RecencyWindow,
        sort: Option<SortKey>,
    ) -> Result<(), BrowserError>;

    /// Collect result cards on the current page: unique by url, in page
    /// order, at most [`MAX_CANDIDATES`](super::MAX_CANDIDATES).
    async fn extract_candidates(&mut self) -> Result<Vec<Candidate>, BrowserError>;

    /// Open a detail page, pause, and return the full visible body text.
    async fn go_to_detail(&mut self, url: &str) -> Result<String, BrowserError>;

    /// Release the browser. Idempotent.
    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// Opens browsing sessions; one per scan.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    /// Launcher name for logging.
    fn name(&self) -> &str;

    async fn launch(&self) -> Result<Box<dyn BrowsingSession>, BrowserError>;
}
