use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use makerscan_core::{
    Config, RecencyWindow, ResultStore, SanitizedConfig, ScanOrchestrator, SessionLauncher,
    SortKey,
};

/// Shared application state
pub struct AppState {
    config: Config,
    store: Arc<dyn ResultStore>,
    orchestrator: ScanOrchestrator,
    /// Held for the whole of a scan; the browser profile supports one session at a time.
    scan_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn ResultStore>,
        launcher: Arc<dyn SessionLauncher>,
    ) -> Self {
        let orchestrator = ScanOrchestrator::new(launcher, Arc::clone(&store));
        Self {
            config,
            store,
            orchestrator,
            scan_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn store(&self) -> &dyn ResultStore {
        self.store.as_ref()
    }

    pub fn orchestrator(&self) -> &ScanOrchestrator {
        &self.orchestrator
    }

    pub fn scan_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.scan_lock)
    }

    /// Recency window applied when a request omits one.
    pub fn default_recency_window(&self) -> RecencyWindow {
        let days = self.config.scan.default_recency_window_days;
        RecencyWindow::try_from(days).unwrap_or_else(|e| {
            warn!("Ignoring configured recency window: {}", e);
            RecencyWindow::default()
        })
    }

    /// Sort key applied when a request omits one.
    pub fn default_sort_key(&self) -> Option<SortKey> {
        self.config.scan.default_sort_key
    }
}
