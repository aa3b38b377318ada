//! Extraction orchestrator: turns a scan request into stored, classified records.

mod orchestrator;
mod types;

pub use orchestrator::ScanOrchestrator;
pub use types::{split_keywords, ScanError, ScanReport, ScanRequest, TermOutcome, TermStatus};
