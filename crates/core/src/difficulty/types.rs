//! Types for the difficulty classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Print difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Low,
    Medium,
    High,
}

impl DifficultyTier {
    /// Map a total score onto a tier: 0 is Low, 1-2 Medium, 3 and above High.
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => DifficultyTier::Low,
            1..=2 => DifficultyTier::Medium,
            _ => DifficultyTier::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Low => "Low",
            DifficultyTier::Medium => "Medium",
            DifficultyTier::High => "High",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(DifficultyTier::Low),
            "Medium" => Ok(DifficultyTier::Medium),
            "High" => Ok(DifficultyTier::High),
            other => Err(format!("unknown difficulty tier: {}", other)),
        }
    }
}

/// Tier plus the human-readable explanation of how it was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyAssessment {
    pub tier: DifficultyTier,
    pub reason: String,
}
