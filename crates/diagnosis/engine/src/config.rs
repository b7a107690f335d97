//! Engine configuration.

use serde::{Deserialize, Serialize};

/// How results with exactly equal certainty are ordered.
///
/// Either way the sort is stable, so anything still tied keeps the order
/// its rules were evaluated in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Ascending damage code.
    #[default]
    DamageId,
    /// Rule evaluation order only.
    RuleOrder,
}

/// Tunables for [`DiagnosisEngine`](crate::DiagnosisEngine).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Secondary ordering for equal certainty factors.
    #[serde(default)]
    pub tie_break: TieBreak,

    /// Reject user confidences outside `[0, 1]` and matched expert
    /// confidences outside `[-1, 1]` instead of carrying them through.
    #[serde(default)]
    pub strict_ranges: bool,
}

impl EngineConfig {
    /// Configuration that rejects out-of-range confidences.
    pub fn strict() -> Self {
        Self {
            strict_ranges: true,
            ..Default::default()
        }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}
