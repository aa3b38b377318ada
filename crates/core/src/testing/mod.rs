//! Testing utilities and mock implementations.
//!
//! Provides a scriptable browsing session so scans can be exercised end to
//! end without a real browser.
//!
//! # Example
//!
//! ```rust,ignore
//! use makerscan_core::testing::{fixtures, MockBrowsingSession, MockLauncher};
//!
//! let session = MockBrowsingSession::new();
//! session.set_candidates("dragon", fixtures::candidates("dragon", 3)).await;
//!
//! let launcher = Arc::new(MockLauncher::new(session.clone()));
//! let orchestrator = ScanOrchestrator::new(launcher, store);
//! ```

mod mock_session;

pub use mock_session::{MockBrowsingSession, MockLauncher, SessionCall};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::browser::Candidate;
    use crate::difficulty::{DifficultyAssessment, DifficultyTier, BASELINE_REASON};
    use crate::extractor::ExtractedFields;
    use crate::store::ModelRecord;

    /// Detail page url for a model slug.
    pub fn model_url(slug: &str) -> String {
        format!("https://makerworld.com/es/models/{}", slug)
    }

    /// Create a candidate with reasonable defaults.
    pub fn candidate(slug: &str) -> Candidate {
        Candidate {
            url: model_url(slug),
            title: format!("Model {}", slug),
            thumbnail_url: format!("https://cdn.makerworld.test/{}.jpg", slug),
        }
    }

    /// Create a titled candidate.
    pub fn titled_candidate(slug: &str, title: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            ..candidate(slug)
        }
    }

    /// `count` candidates with slugs `{term}-1` .. `{term}-{count}`.
    pub fn candidates(term: &str, count: usize) -> Vec<Candidate> {
        (1..=count)
            .map(|i| candidate(&format!("{}-{}", term, i)))
            .collect()
    }

    /// Detail page text mentioning the usual print settings.
    pub fn detail_text(material: &str, layer_height: &str, infill: &str) -> String {
        format!(
            "Print profile\nMaterial: {}\nLayer height {} mm\n{}% infill\nPrinted on a P1S\n",
            material, layer_height, infill
        )
    }

    /// A low-difficulty PLA record stored under `term`.
    pub fn model_record(term: &str, slug: &str) -> ModelRecord {
        let candidate = candidate(slug);
        ModelRecord {
            search_term: term.to_string(),
            title: candidate.title,
            url: candidate.url,
            thumbnail_url: candidate.thumbnail_url,
            fields: ExtractedFields {
                material: "PLA".to_string(),
                layer_height: "0.2mm".to_string(),
                infill_percent: "15%".to_string(),
                printer_model: "P1S".to_string(),
                wall_count: String::new(),
            },
            difficulty: DifficultyAssessment {
                tier: DifficultyTier::Low,
                reason: BASELINE_REASON.to_string(),
            },
        }
    }
}
