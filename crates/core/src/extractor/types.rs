//! Structured fields parsed from a model detail page.

use serde::{Deserialize, Serialize};

/// Sentinel for a field whose pattern did not match.
pub const UNKNOWN: &str = "N/A";

/// Technical facts extracted from page text.
///
/// Every field is always present. A field whose pattern found nothing holds
/// [`UNKNOWN`], except `wall_count`, which holds an empty string: presentation
/// omits the wall fact entirely rather than printing a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Filament material, uppercased (e.g., "PETG").
    pub material: String,
    /// Layer height formatted as "X.Xmm".
    pub layer_height: String,
    /// Infill formatted as "NN%".
    pub infill_percent: String,
    /// Printer model, uppercased (e.g., "X1C").
    pub printer_model: String,
    /// Wall/loop count digits, or empty.
    pub wall_count: String,
}

impl ExtractedFields {
    /// All fields set to their not-found sentinel.
    pub fn unknown() -> Self {
        Self {
            material: UNKNOWN.to_string(),
            layer_height: UNKNOWN.to_string(),
            infill_percent: UNKNOWN.to_string(),
            printer_model: UNKNOWN.to_string(),
            wall_count: String::new(),
        }
    }
}

impl Default for ExtractedFields {
    fn default() -> Self {
        Self::unknown()
    }
}
