//! Human-facing confidence buckets.
//!
//! Thresholds are inclusive lower bounds on `cf * 100`. Values are not
//! clamped; anything below the lowest bound (including NaN) lands in the
//! bottom bucket.

use serde::{Deserialize, Serialize};

/// Six-step verbal scale for a certainty factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    NotConfident,
    LowConfidence,
    SomewhatConfident,
    FairlyConfident,
    Confident,
    VeryConfident,
}

impl ConfidenceLevel {
    /// All levels, lowest first.
    pub const ALL: [ConfidenceLevel; 6] = [
        Self::NotConfident,
        Self::LowConfidence,
        Self::SomewhatConfident,
        Self::FairlyConfident,
        Self::Confident,
        Self::VeryConfident,
    ];

    /// Inclusive lower bound in percent.
    pub fn threshold(self) -> f64 {
        match self {
            Self::VeryConfident => 90.0,
            Self::Confident => 80.0,
            Self::FairlyConfident => 70.0,
            Self::SomewhatConfident => 60.0,
            Self::LowConfidence => 50.0,
            Self::NotConfident => f64::NEG_INFINITY,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryConfident => "Very confident",
            Self::Confident => "Confident",
            Self::FairlyConfident => "Fairly confident",
            Self::SomewhatConfident => "Somewhat confident",
            Self::LowConfidence => "Low confidence",
            Self::NotConfident => "Not confident",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Four-tier colour tag for a certainty factor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceColor {
    /// ≥ 80%.
    Tier1,
    /// ≥ 60%.
    Tier2,
    /// ≥ 40%.
    Tier3,
    /// Everything else.
    Tier4,
}

impl ConfidenceColor {
    pub fn hex(self) -> &'static str {
        match self {
            Self::Tier1 => "#10b981",
            Self::Tier2 => "#f59e0b",
            Self::Tier3 => "#ef4444",
            Self::Tier4 => "#6b7280",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tier1 => "green",
            Self::Tier2 => "orange",
            Self::Tier3 => "red",
            Self::Tier4 => "gray",
        }
    }
}

impl std::fmt::Display for ConfidenceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hex())
    }
}

/// Verbal level for `cf`.
pub fn confidence_level(cf: f64) -> ConfidenceLevel {
    let percentage = cf * 100.0;

    if percentage >= 90.0 {
        ConfidenceLevel::VeryConfident
    } else if percentage >= 80.0 {
        ConfidenceLevel::Confident
    } else if percentage >= 70.0 {
        ConfidenceLevel::FairlyConfident
    } else if percentage >= 60.0 {
        ConfidenceLevel::SomewhatConfident
    } else if percentage >= 50.0 {
        ConfidenceLevel::LowConfidence
    } else {
        ConfidenceLevel::NotConfident
    }
}

/// Colour tier for `cf`.
pub fn confidence_color(cf: f64) -> ConfidenceColor {
    let percentage = cf * 100.0;

    if percentage >= 80.0 {
        ConfidenceColor::Tier1
    } else if percentage >= 60.0 {
        ConfidenceColor::Tier2
    } else if percentage >= 40.0 {
        ConfidenceColor::Tier3
    } else {
        ConfidenceColor::Tier4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_labels() {
        assert_eq!(confidence_level(0.95).label(), "Very confident");
        assert_eq!(confidence_level(0.55).label(), "Low confidence");
        assert_eq!(confidence_level(0.10).label(), "Not confident");
    }

    #[test]
    fn level_bounds_are_inclusive() {
        assert_eq!(confidence_level(0.9), ConfidenceLevel::VeryConfident);
        assert_eq!(confidence_level(0.8), ConfidenceLevel::Confident);
        assert_eq!(confidence_level(0.7), ConfidenceLevel::FairlyConfident);
        assert_eq!(confidence_level(0.6), ConfidenceLevel::SomewhatConfident);
        assert_eq!(confidence_level(0.5), ConfidenceLevel::LowConfidence);
        assert_eq!(confidence_level(0.499), ConfidenceLevel::NotConfident);
    }

    #[test]
    fn no_clamping_outside_unit_range() {
        assert_eq!(confidence_level(1.7), ConfidenceLevel::VeryConfident);
        assert_eq!(confidence_level(-3.0), ConfidenceLevel::NotConfident);
        assert_eq!(confidence_level(f64::NAN), ConfidenceLevel::NotConfident);
        assert_eq!(confidence_color(f64::NAN), ConfidenceColor::Tier4);
    }

    #[test]
    fn color_tiers() {
        assert_eq!(confidence_color(0.8), ConfidenceColor::Tier1);
        assert_eq!(confidence_color(0.79), ConfidenceColor::Tier2);
        assert_eq!(confidence_color(0.6), ConfidenceColor::Tier2);
        assert_eq!(confidence_color(0.4), ConfidenceColor::Tier3);
        assert_eq!(confidence_color(0.39), ConfidenceColor::Tier4);
        assert_eq!(confidence_color(0.95).hex(), "#10b981");
        assert_eq!(confidence_color(0.0).name(), "gray");
    }

    #[test]
    fn thresholds_agree_with_classifier() {
        for level in ConfidenceLevel::ALL.into_iter().skip(1) {
            assert_eq!(confidence_level(level.threshold() / 100.0), level);
        }
    }
}
