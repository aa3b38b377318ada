//! Mock browsing session for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::browser::{
    BrowserError, BrowsingSession, Candidate, RecencyWindow, SessionLauncher, SortKey,
};

/// A recorded session call for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCall {
    Search {
        term: String,
        recency: RecencyWindow,
        sort: Option<SortKey>,
    },
    ExtractCandidates,
    Detail {
        url: String,
    },
    Close,
}

#[derive(Debug, Default)]
struct Script {
    candidates: HashMap<String, Vec<Candidate>>,
    search_errors: HashMap<String, String>,
    extract_errors: HashMap<String, String>,
    detail_texts: HashMap<String, String>,
    detail_errors: HashSet<String>,
    detail_delay: Option<Duration>,
    calls: Vec<SessionCall>,
}

/// Mock implementation of the BrowsingSession trait.
///
/// Clones share one script and one call log, so a test keeps a handle to
/// configure and inspect the session that a [`MockLauncher`] hands out:
/// - Candidates and failures are scripted per search term
/// - Detail-page text and failures are scripted per url
/// - Every call is recorded in order
///
/// Unscripted terms yield no candidates; unscripted urls yield empty text.
///
/// # Example
///
/// ```rust,ignore
/// use makerscan_core::testing::{fixtures, MockBrowsingSession, MockLauncher};
///
/// let session = MockBrowsingSession::new();
/// session.set_candidates("dragon", vec![fixtures::candidate("dragon-1")]).await;
/// session.set_detail_text(&fixtures::model_url("dragon-1"), "PLA, 0.2mm").await;
///
/// let launcher = Arc::new(MockLauncher::new(session.clone()));
/// // run a scan...
/// assert_eq!(session.close_count().await, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBrowsingSession {
    script: Arc<RwLock<Script>>,
    current_term: Option<String>,
    closed: bool,
}

impl MockBrowsingSession {
    /// Create a new mock session with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidates returned after searching for `term`.
    pub async fn set_candidates(&self, term: &str, candidates: Vec<Candidate>) {
        self.script
            .write()
            .await
            .candidates
            .insert(term.to_string(), candidates);
    }

    /// Make navigation to the search page for `term` fail.
    pub async fn fail_search(&self, term: &str, message: &str) {
        self.script
            .write()
            .await
            .search_errors
            .insert(term.to_string(), message.to_string());
    }

    /// Make candidate extraction fail after searching for `term`.
    pub async fn fail_extract(&self, term: &str, message: &str) {
        self.script
            .write()
            .await
            .extract_errors
            .insert(term.to_string(), message.to_string());
    }

    /// Set the body text returned for a detail page.
    pub async fn set_detail_text(&self, url: &str, text: &str) {
        self.script
            .write()
            .await
            .detail_texts
            .insert(url.to_string(), text.to_string());
    }

    /// Make navigation to a detail page fail.
    pub async fn fail_detail(&self, url: &str) {
        self.script
            .write()
            .await
            .detail_errors
            .insert(url.to_string());
    }

    /// Make every detail page take `delay` before returning.
    pub async fn set_detail_delay(&self, delay: Duration) {
        self.script.write().await.detail_delay = Some(delay);
    }

    /// Get recorded calls across all clones.
    pub async fn recorded_calls(&self) -> Vec<SessionCall> {
        self.script.read().await.calls.clone()
    }

    /// Terms searched, in order.
    pub async fn searched_terms(&self) -> Vec<String> {
        self.script
            .read()
            .await
            .calls
            .iter()
            .filter_map(|c| match c {
                SessionCall::Search { term, .. } => Some(term.clone()),
                _ => None,
            })
            .collect()
    }

    /// Detail urls visited, in order.
    pub async fn visited_urls(&self) -> Vec<String> {
        self.script
            .read()
            .await
            .calls
            .iter()
            .filter_map(|c| match c {
                SessionCall::Detail { url } => Some(url.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of times a session was closed.
    pub async fn close_count(&self) -> usize {
        self.script
            .read()
            .await
            .calls
            .iter()
            .filter(|c| matches!(c, SessionCall::Close))
            .count()
    }

    async fn record(&self, call: SessionCall) {
        self.script.write().await.calls.push(call);
    }

    fn ensure_open(&self) -> Result<(), BrowserError> {
        if self.closed {
            Err(BrowserError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BrowsingSession for MockBrowsingSession {
    async fn go_to_search(
        &mut self,
        term: &str,
        recency: RecencyWindow,
        sort: Option<SortKey>,
    ) -> Result<(), BrowserError> {
        self.ensure_open()?;
        self.record(SessionCall::Search {
            term: term.to_string(),
            recency,
            sort,
        })
        .await;

        self.current_term = Some(term.to_string());

        if let Some(message) = self.script.read().await.search_errors.get(term) {
            return Err(BrowserError::Navigation {
                url: format!("search:{}", term),
                message: message.clone(),
            });
        }
        Ok(())
    }

    async fn extract_candidates(&mut self) -> Result<Vec<Candidate>, BrowserError> {
        self.ensure_open()?;
        self.record(SessionCall::ExtractCandidates).await;

        let Some(term) = self.current_term.clone() else {
            return Ok(Vec::new());
        };

        let script = self.script.read().await;
        if let Some(message) = script.extract_errors.get(&term) {
            return Err(BrowserError::Evaluation(message.clone()));
        }
        Ok(script.candidates.get(&term).cloned().unwrap_or_default())
    }

    async fn go_to_detail(&mut self, url: &str) -> Result<String, BrowserError> {
        self.ensure_open()?;
        self.record(SessionCall::Detail {
            url: url.to_string(),
        })
        .await;

        let delay = self.script.read().await.detail_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let script = self.script.read().await;
        if script.detail_errors.contains(url) {
            return Err(BrowserError::Navigation {
                url: url.to_string(),
                message: "net::ERR_CONNECTION_RESET".to_string(),
            });
        }
        Ok(script.detail_texts.get(url).cloned().unwrap_or_default())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.record(SessionCall::Close).await;
        Ok(())
    }
}

/// Mock implementation of the SessionLauncher trait.
///
/// Every launch hands out a fresh, open clone of the configured session.
#[derive(Debug, Default)]
pub struct MockLauncher {
    session: MockBrowsingSession,
    launch_error: Arc<RwLock<Option<String>>>,
    launches: Arc<RwLock<usize>>,
}

impl MockLauncher {
    /// Create a launcher handing out clones of `session`.
    pub fn new(session: MockBrowsingSession) -> Self {
        Self {
            session,
            launch_error: Arc::new(RwLock::new(None)),
            launches: Arc::new(RwLock::new(0)),
        }
    }

    /// Make every subsequent launch fail.
    pub async fn set_launch_error(&self, message: &str) {
        *self.launch_error.write().await = Some(message.to_string());
    }

    /// Clear any launch error.
    pub async fn clear_launch_error(&self) {
        *self.launch_error.write().await = None;
    }

    /// Number of successful launches.
    pub async fn launch_count(&self) -> usize {
        *self.launches.read().await
    }
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn launch(&self) -> Result<Box<dyn BrowsingSession>, BrowserError> {
        if let Some(message) = self.launch_error.read().await.clone() {
            return Err(BrowserError::Launch(message));
        }
        *self.launches.write().await += 1;

        let mut session = self.session.clone();
        session.closed = false;
        session.current_term = None;
        Ok(Box::new(session))
    }
}
