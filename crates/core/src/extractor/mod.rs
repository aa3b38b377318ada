//! Text extractor: page text to [`ExtractedFields`].
//!
//! Each field has one independent, case-insensitive pattern. The first match
//! in document order wins; later matches are ignored. A missing match leaves
//! the field's sentinel in place, so extraction never fails.

mod types;

pub use types::{ExtractedFields, UNKNOWN};

use once_cell::sync::Lazy;
use regex_lite::Regex;

// Compound entries come first so "PETG-CF" is not cut short at "PETG".
static MATERIAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(PETG-CF|PLA-CF|PETG|PLA|ABS|TPU|ASA|PVA)\b").expect("material pattern")
});

static LAYER_HEIGHT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+\.\d+)\s*mm").expect("layer height pattern"));

static INFILL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)%\s*(?:infill|relleno)?").expect("infill pattern")
});

// "A1 Mini" before "A1" for the same reason as the material list.
static PRINTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(A1\s*Mini|X1-Carbon|X1C|P1S|P1P|A1)\b").expect("printer pattern")
});

static WALLS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:walls|paredes|loops|muros)").expect("wall count pattern")
});

/// Extract structured print settings from a detail page's visible text.
pub fn extract_fields(text: &str) -> ExtractedFields {
    let mut fields = ExtractedFields::unknown();

    if let Some(m) = MATERIAL.find(text) {
        fields.material = m.as_str().to_uppercase();
    }

    if let Some(caps) = LAYER_HEIGHT.captures(text) {
        fields.layer_height = format!("{}mm", &caps[1]);
    }

    if let Some(caps) = INFILL.captures(text) {
        fields.infill_percent = format!("{}%", &caps[1]);
    }

    if let Some(m) = PRINTER.find(text) {
        fields.printer_model = normalize_printer(m.as_str());
    }

    if let Some(caps) = WALLS.captures(text) {
        fields.wall_count = caps[1].to_string();
    }

    fields
}

/// Uppercase and collapse inner whitespace ("a1  mini" -> "A1 MINI").
fn normalize_printer(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
