//! Scan lifecycle integration tests.
//!
//! These tests drive full scans through the orchestrator against a mock
//! browsing session and a real SQLite store:
//! search -> candidates -> detail pages -> extraction -> classification -> replace

use std::sync::Arc;

use tempfile::TempDir;

use makerscan_core::{
    testing::{fixtures, MockBrowsingSession, MockLauncher},
    DifficultyTier, ResultStore, ScanOrchestrator, ScanRequest, SqliteResultStore, TermStatus,
};

/// Test helper to create all dependencies for scan testing.
struct TestHarness {
    store: Arc<SqliteResultStore>,
    session: MockBrowsingSession,
    launcher: Arc<MockLauncher>,
    _temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = Arc::new(
            SqliteResultStore::new(&temp_dir.path().join("test.db"))
                .expect("Failed to create result store"),
        );
        let session = MockBrowsingSession::new();
        let launcher = Arc::new(MockLauncher::new(session.clone()));
        Self {
            store,
            session,
            launcher,
            _temp_dir: temp_dir,
        }
    }

    fn orchestrator(&self) -> ScanOrchestrator {
        ScanOrchestrator::new(self.launcher.clone(), self.store.clone())
    }

    async fn script_term(&self, term: &str, count: usize, text: &str) {
        let candidates = fixtures::candidates(term, count);
        for candidate in &candidates {
            self.session.set_detail_text(&candidate.url, text).await;
        }
        self.session.set_candidates(term, candidates).await;
    }
}

#[tokio::test]
async fn test_two_successes_three_failures_store_two() {
    let h = TestHarness::new();
    let candidates = fixtures::candidates("dragon", 5);
    h.session.set_candidates("dragon", candidates.clone()).await;
    h.session
        .set_detail_text(&candidates[1].url, &fixtures::detail_text("PETG", "0.2", "15"))
        .await;
    h.session
        .set_detail_text(&candidates[3].url, &fixtures::detail_text("ABS", "0.28", "20"))
        .await;
    for i in [0, 2, 4] {
        h.session.fail_detail(&candidates[i].url).await;
    }

    let report = h
        .orchestrator()
        .scan(&ScanRequest::new("dragon"))
        .await
        .unwrap();

    assert_eq!(
        report.terms[0].status,
        TermStatus::Persisted {
            stored: 2,
            skipped: 3
        }
    );

    let groups = h.store.read_all_grouped_by_term().unwrap();
    assert_eq!(groups.len(), 1);
    let records: Vec<_> = groups[0].records.iter().map(|r| &r.record).collect();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].url, candidates[1].url);
    assert_eq!(records[0].fields.material, "PETG");
    assert_eq!(records[0].fields.layer_height, "0.2mm");
    assert_eq!(records[0].fields.infill_percent, "15%");
    assert_eq!(records[0].fields.printer_model, "P1S");
    assert_eq!(records[0].difficulty.tier, DifficultyTier::Medium);

    assert_eq!(records[1].url, candidates[3].url);
    assert_eq!(records[1].difficulty.tier, DifficultyTier::High);
    assert_eq!(records[1].difficulty.reason, "ABS requires enclosure");
}

#[tokio::test]
async fn test_search_failure_leaves_prior_records_untouched() {
    let h = TestHarness::new();
    h.script_term("xyz", 3, &fixtures::detail_text("PLA", "0.2", "15"))
        .await;
    h.orchestrator()
        .scan(&ScanRequest::new("xyz"))
        .await
        .unwrap();
    let before = h.store.read_all_grouped_by_term().unwrap();

    h.session.fail_search("xyz", "Timeout 8000ms exceeded").await;
    let report = h
        .orchestrator()
        .scan(&ScanRequest::new("xyz"))
        .await
        .unwrap();

    assert!(matches!(report.terms[0].status, TermStatus::Failed { .. }));
    assert_eq!(h.store.read_all_grouped_by_term().unwrap(), before);
}

#[tokio::test]
async fn test_rescan_replaces_instead_of_appending() {
    let h = TestHarness::new();
    h.script_term("vase", 4, "Vase mode, PLA").await;
    h.orchestrator()
        .scan(&ScanRequest::new("vase"))
        .await
        .unwrap();
    assert_eq!(h.store.count_for_term("vase").unwrap(), 4);

    h.session
        .set_candidates("vase", vec![fixtures::candidate("vase-new")])
        .await;
    h.orchestrator()
        .scan(&ScanRequest::new("vase"))
        .await
        .unwrap();

    let groups = h.store.read_all_grouped_by_term().unwrap();
    assert_eq!(groups[0].records.len(), 1);
    assert_eq!(
        groups[0].records[0].record.url,
        fixtures::model_url("vase-new")
    );
}

#[tokio::test]
async fn test_multi_term_scan_isolates_terms() {
    let h = TestHarness::new();
    h.script_term("hinge", 2, "print in place hinge, PETG").await;
    h.script_term("vase", 1, "PLA").await;
    h.session.fail_search("broken", "net::ERR_NAME_NOT_RESOLVED").await;
    h.store
        .replace_for_term("other", &[fixtures::model_record("other", "kept")])
        .unwrap();

    let report = h
        .orchestrator()
        .scan(&ScanRequest::new("hinge, broken, vase"))
        .await
        .unwrap();

    assert_eq!(report.persisted_count(), 2);
    assert_eq!(report.failed_count(), 1);
    assert_eq!(
        h.session.searched_terms().await,
        vec!["hinge", "broken", "vase"]
    );

    let terms: Vec<_> = h
        .store
        .read_all_grouped_by_term()
        .unwrap()
        .into_iter()
        .map(|g| g.term)
        .collect();
    assert_eq!(terms, vec!["vase", "hinge", "other"]);
    assert_eq!(h.session.close_count().await, 1);
}

#[tokio::test]
async fn test_consecutive_scans_launch_fresh_sessions() {
    let h = TestHarness::new();
    let orchestrator = h.orchestrator();

    orchestrator.scan(&ScanRequest::new("a")).await.unwrap();
    orchestrator.scan(&ScanRequest::new("b")).await.unwrap();

    assert_eq!(h.launcher.launch_count().await, 2);
    assert_eq!(h.session.close_count().await, 2);
}
