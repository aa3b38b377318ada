//! Rule-based print difficulty classifier.
//!
//! Points come from two independent rule groups: the material's technical
//! tier, and keywords in the model title. The total maps onto a tier via
//! [`DifficultyTier::from_score`]. No I/O, no randomness.

mod types;

pub use types::{DifficultyAssessment, DifficultyTier};

use crate::extractor::ExtractedFields;

/// Reason reported for a zero score.
pub const BASELINE_REASON: &str = "Standard material, simple geometry";

/// A title keyword rule: any of `needles` in the lowercased title scores `points`.
struct KeywordRule {
    needles: &'static [&'static str],
    points: u32,
    reason: &'static str,
}

const KEYWORD_RULES: &[KeywordRule] = &[
    KeywordRule {
        needles: &["support", "soporte"],
        points: 1,
        reason: "Requires supports",
    },
    KeywordRule {
        needles: &["articulated", "articulado"],
        points: 2,
        reason: "Articulated (precise calibration)",
    },
    KeywordRule {
        needles: &["print in place"],
        points: 1,
        reason: "Print-in-place",
    },
];

/// Score a material. Returns points and an optional reason.
fn material_rule(material: &str) -> (u32, Option<String>) {
    match material {
        "ABS" | "ASA" | "NYLON" => (3, Some(format!("{} requires enclosure", material))),
        "TPU" | "FLEX" => (2, Some("Flexible (difficult extrusion)".to_string())),
        // Slightly harder than PLA; no reason of its own.
        "PETG" => (1, None),
        _ => (0, None),
    }
}

/// Classify print difficulty from extracted fields and the model title.
pub fn classify(fields: &ExtractedFields, title: &str) -> DifficultyAssessment {
    let mut score = 0u32;
    let mut reasons: Vec<String> = Vec::new();

    let material = fields.material.to_uppercase();
    let (points, reason) = material_rule(&material);
    score += points;
    reasons.extend(reason);

    let title = title.to_lowercase();
    for rule in KEYWORD_RULES {
        if rule.needles.iter().any(|needle| title.contains(needle)) {
            score += rule.points;
            reasons.push(rule.reason.to_string());
        }
    }

    let tier = DifficultyTier::from_score(score);
    let reason = match tier {
        DifficultyTier::Low => BASELINE_REASON.to_string(),
        DifficultyTier::Medium | DifficultyTier::High => reasons.join(". "),
    };

    DifficultyAssessment { tier, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_material(material: &str) -> ExtractedFields {
        ExtractedFields {
            material: material.to_string(),
            ..ExtractedFields::unknown()
        }
    }

    #[test]
    fn test_simple_pla_is_low() {
        let result = classify(&with_material("PLA"), "Simple Vase");
        assert_eq!(result.tier, DifficultyTier::Low);
        assert_eq!(result.reason, "Standard material, simple geometry");
    }

    #[test]
    fn test_unknown_material_plain_title_is_low() {
        let result = classify(&ExtractedFields::unknown(), "Desk Organizer");
        assert_eq!(result.tier, DifficultyTier::Low);
        assert_eq!(result.reason, BASELINE_REASON);
    }

    #[test]
    fn test_tpu_articulated_is_high() {
        let result = classify(&with_material("TPU"), "Articulated Dragon");
        assert_eq!(result.tier, DifficultyTier::High);
        assert_eq!(
            result.reason,
            "Flexible (difficult extrusion). Articulated (precise calibration)"
        );
    }

    #[test]
    fn test_enclosure_materials_are_high_alone() {
        for material in ["ABS", "ASA", "NYLON"] {
            let result = classify(&with_material(material), "Bracket");
            assert_eq!(result.tier, DifficultyTier::High, "material {}", material);
            assert_eq!(result.reason, format!("{} requires enclosure", material));
        }
    }

    #[test]
    fn test_flex_counts_as_flexible() {
        let result = classify(&with_material("FLEX"), "Phone case");
        assert_eq!(result.tier, DifficultyTier::Medium);
        assert_eq!(result.reason, "Flexible (difficult extrusion)");
    }

    #[test]
    fn test_petg_alone_is_medium_with_silent_reason() {
        let result = classify(&with_material("PETG"), "Cable clip");
        assert_eq!(result.tier, DifficultyTier::Medium);
        assert_eq!(result.reason, "");
    }

    #[test]
    fn test_petg_with_supports_reports_only_keyword_reason() {
        let result = classify(&with_material("PETG"), "Headphone stand (needs supports)");
        assert_eq!(result.tier, DifficultyTier::Medium);
        assert_eq!(result.reason, "Requires supports");
    }

    #[test]
    fn test_spanish_keywords() {
        let result = classify(&with_material("PLA"), "Dragón articulado con soporte");
        assert_eq!(result.tier, DifficultyTier::High);
        assert_eq!(
            result.reason,
            "Requires supports. Articulated (precise calibration)"
        );
    }

    #[test]
    fn test_print_in_place_keyword_case_insensitive() {
        let result = classify(&with_material("PLA"), "Print In Place Hinge Box");
        assert_eq!(result.tier, DifficultyTier::Medium);
        assert_eq!(result.reason, "Print-in-place");
    }

    #[test]
    fn test_keywords_only_read_title() {
        let mut fields = with_material("PLA");
        fields.printer_model = "support".to_string();
        let result = classify(&fields, "Plain Cube");
        assert_eq!(result.tier, DifficultyTier::Low);
    }

    #[test]
    fn test_reason_order_is_material_then_rule_order() {
        let result = classify(&with_material("ABS"), "print in place articulated support arm");
        assert_eq!(result.tier, DifficultyTier::High);
        assert_eq!(
            result.reason,
            "ABS requires enclosure. Requires supports. Articulated (precise calibration). Print-in-place"
        );
    }

    #[test]
    fn test_lowercase_material_is_normalized() {
        let result = classify(&with_material("abs"), "Bracket");
        assert_eq!(result.tier, DifficultyTier::High);
        assert_eq!(result.reason, "ABS requires enclosure");
    }

    #[test]
    fn test_classify_is_deterministic() {
        let fields = with_material("TPU");
        let first = classify(&fields, "Articulated support snake");
        for _ in 0..10 {
            assert_eq!(classify(&fields, "Articulated support snake"), first);
        }
    }
}
