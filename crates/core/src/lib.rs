pub mod browser;
pub mod config;
pub mod difficulty;
pub mod extractor;
pub mod metrics;
pub mod scan;
pub mod store;
pub mod testing;

pub use browser::{
    BrowserError, BrowsingSession, Candidate, ChromiumLauncher, RecencyWindow, SessionLauncher,
    SortKey,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use difficulty::{classify, DifficultyAssessment, DifficultyTier};
pub use extractor::{extract_fields, ExtractedFields};
pub use scan::{ScanError, ScanOrchestrator, ScanReport, ScanRequest, TermOutcome, TermStatus};
pub use store::{ModelRecord, ResultStore, SqliteResultStore, StoreError, StoredRecord, TermGroup};
