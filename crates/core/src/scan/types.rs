//! Types for the extraction orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::browser::{BrowserError, RecencyWindow, SortKey};
use crate::store::StoreError;

/// Errors that end a scan early.
///
/// Per-term and per-candidate failures are not errors at this level; they
/// are reported in [`TermOutcome`] and logged.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The request contained no usable search term.
    #[error("no search terms in request")]
    NoTerms,

    /// The browsing session could not be launched.
    #[error("browser error: {0}")]
    Browser(#[from] BrowserError),

    /// Persisting results failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// A scan request as submitted by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Comma-separated search terms.
    pub keywords: String,
    #[serde(default)]
    pub recency_window: RecencyWindow,
    #[serde(default)]
    pub sort_key: Option<SortKey>,
}

impl ScanRequest {
    pub fn new(keywords: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            recency_window: RecencyWindow::default(),
            sort_key: None,
        }
    }

    pub fn with_recency_window(mut self, window: RecencyWindow) -> Self {
        self.recency_window = window;
        self
    }

    pub fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = Some(sort_key);
        self
    }

    /// The search terms of this request, in submission order.
    pub fn terms(&self) -> Vec<String> {
        split_keywords(&self.keywords)
    }
}

/// Split a comma-separated keyword string into trimmed, non-empty terms.
///
/// Order is preserved and duplicates are kept.
pub fn split_keywords(keywords: &str) -> Vec<String> {
    keywords
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// How a single term ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TermStatus {
    /// Results were written for the term, replacing earlier ones.
    Persisted {
        /// Records stored.
        stored: usize,
        /// Candidates dropped after a detail-page failure.
        skipped: usize,
    },
    /// The search phase failed; stored results were left untouched.
    Failed { error: String },
}

/// Outcome of one term within a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermOutcome {
    pub term: String,
    #[serde(flatten)]
    pub status: TermStatus,
}

impl TermOutcome {
    pub fn persisted(term: &str, stored: usize, skipped: usize) -> Self {
        Self {
            term: term.to_string(),
            status: TermStatus::Persisted { stored, skipped },
        }
    }

    pub fn failed(term: &str, error: impl Into<String>) -> Self {
        Self {
            term: term.to_string(),
            status: TermStatus::Failed {
                error: error.into(),
            },
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self.status, TermStatus::Persisted { .. })
    }
}

/// Summary of a completed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub scan_id: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    /// One entry per submitted term, in submission order.
    pub terms: Vec<TermOutcome>,
}

impl ScanReport {
    pub fn persisted_count(&self) -> usize {
        self.terms.iter().filter(|t| t.is_persisted()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.terms.len() - self.persisted_count()
    }
}
