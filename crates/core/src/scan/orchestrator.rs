//! Extraction orchestrator.
//!
//! Drives one browsing session through every term of a request:
//! - Terms run strictly one after another, in submission order
//! - Candidates of a term are visited one after another, in page order
//! - A failed search skips the term and leaves its stored results alone
//! - A failed detail page drops that candidate only

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::browser::{BrowserError, BrowsingSession, Candidate, SessionLauncher, MAX_CANDIDATES};
use crate::difficulty::classify;
use crate::extractor::extract_fields;
use crate::metrics;
use crate::store::{ModelRecord, ResultStore};

use super::types::{ScanError, ScanReport, ScanRequest, TermOutcome};

/// Runs scan requests against a browsing session and a result store.
pub struct ScanOrchestrator {
    launcher: Arc<dyn SessionLauncher>,
    store: Arc<dyn ResultStore>,
    max_candidates: usize,
}

impl ScanOrchestrator {
    /// Create a new orchestrator visiting at most [`MAX_CANDIDATES`] per term.
    pub fn new(launcher: Arc<dyn SessionLauncher>, store: Arc<dyn ResultStore>) -> Self {
        Self {
            launcher,
            store,
            max_candidates: MAX_CANDIDATES,
        }
    }

    /// Override the per-term candidate cap.
    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn store(&self) -> &Arc<dyn ResultStore> {
        &self.store
    }

    /// Run a full scan.
    ///
    /// One session is launched for the whole request and closed before this
    /// returns, whether the scan completed or a store failure cut it short.
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanReport, ScanError> {
        let terms = request.terms();
        if terms.is_empty() {
            return Err(ScanError::NoTerms);
        }

        let scan_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let timer = Instant::now();

        info!(
            scan_id = %scan_id,
            terms = terms.len(),
            recency_days = request.recency_window.days(),
            sort_key = ?request.sort_key,
            launcher = self.launcher.name(),
            "Starting scan"
        );

        let mut session = self.launcher.launch().await.map_err(|e| {
            warn!(scan_id = %scan_id, error = %e, "Failed to launch browsing session");
            e
        })?;

        let result = self.run_terms(session.as_mut(), &terms, request).await;

        if let Err(e) = session.close().await {
            warn!(scan_id = %scan_id, error = %e, "Failed to close browsing session");
        }

        let elapsed = timer.elapsed();
        metrics::SCAN_DURATION.observe(elapsed.as_secs_f64());

        let outcomes = result?;
        let report = ScanReport {
            scan_id,
            started_at,
            duration_ms: elapsed.as_millis() as u64,
            terms: outcomes,
        };

        info!(
            scan_id = %report.scan_id,
            persisted = report.persisted_count(),
            failed = report.failed_count(),
            duration_ms = report.duration_ms,
            "Scan complete"
        );

        Ok(report)
    }

    async fn run_terms(
        &self,
        session: &mut dyn BrowsingSession,
        terms: &[String],
        request: &ScanRequest,
    ) -> Result<Vec<TermOutcome>, ScanError> {
        let mut outcomes = Vec::with_capacity(terms.len());
        for term in terms {
            outcomes.push(self.scan_term(session, term, request).await?);
        }
        Ok(outcomes)
    }

    async fn scan_term(
        &self,
        session: &mut dyn BrowsingSession,
        term: &str,
        request: &ScanRequest,
    ) -> Result<TermOutcome, ScanError> {
        let candidates = match self.search(session, term, request).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(term = term, error = %e, "Search failed, skipping term");
                metrics::TERMS_TOTAL.with_label_values(&["failed"]).inc();
                return Ok(TermOutcome::failed(term, e.to_string()));
            }
        };

        info!(term = term, candidates = candidates.len(), "Found candidates");

        let mut records = Vec::with_capacity(candidates.len());
        let mut skipped = 0;

        for candidate in &candidates {
            match self.inspect(session, term, candidate).await {
                Ok(record) => {
                    metrics::CANDIDATES_TOTAL
                        .with_label_values(&["extracted"])
                        .inc();
                    metrics::DIFFICULTY_TOTAL
                        .with_label_values(&[record.difficulty.tier.as_str()])
                        .inc();
                    records.push(record);
                }
                Err(e) => {
                    warn!(
                        term = term,
                        url = %candidate.url,
                        error = %e,
                        "Failed to inspect candidate, skipping"
                    );
                    metrics::CANDIDATES_TOTAL.with_label_values(&["skipped"]).inc();
                    skipped += 1;
                }
            }
        }

        let stored = self.store.replace_for_term(term, &records)?;
        metrics::TERMS_TOTAL.with_label_values(&["persisted"]).inc();

        info!(term = term, stored = stored, skipped = skipped, "Stored results");

        Ok(TermOutcome::persisted(term, stored, skipped))
    }

    async fn search(
        &self,
        session: &mut dyn BrowsingSession,
        term: &str,
        request: &ScanRequest,
    ) -> Result<Vec<Candidate>, BrowserError> {
        session
            .go_to_search(term, request.recency_window, request.sort_key)
            .await?;
        let mut candidates = session.extract_candidates().await?;
        candidates.truncate(self.max_candidates);
        Ok(candidates)
    }

    async fn inspect(
        &self,
        session: &mut dyn BrowsingSession,
        term: &str,
        candidate: &Candidate,
    ) -> Result<ModelRecord, BrowserError> {
        let text = session.go_to_detail(&candidate.url).await?;
        let fields = extract_fields(&text);
        let difficulty = classify(&fields, &candidate.title);

        debug!(
            url = %candidate.url,
            material = %fields.material,
            tier = %difficulty.tier,
            "Classified candidate"
        );

        Ok(ModelRecord {
            search_term: term.to_string(),
            title: candidate.title.clone(),
            url: candidate.url.clone(),
            thumbnail_url: candidate.thumbnail_url.clone(),
            fields,
            difficulty,
        })
    }
}
