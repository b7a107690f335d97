//! What the user reports: which symptoms are present and how sure they are.

use serde::{Deserialize, Serialize};

use crate::catalog::{Symptom, UNKNOWN_SYMPTOM_NAME};
use crate::ids::SymptomId;

/// One symptom the user marked as present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserSymptomSelection {
    pub symptom_id: SymptomId,
    /// Self-reported certainty factor. Forms constrain this to
    /// [`UserConfidence::LEVELS`], but any float is carried through.
    pub cf_user: f64,
}

impl UserSymptomSelection {
    pub fn new(symptom_id: impl Into<SymptomId>, cf_user: f64) -> Self {
        Self {
            symptom_id: symptom_id.into(),
            cf_user,
        }
    }
}

/// A selection echoed back with its catalog name and answer level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NamedSelection {
    pub symptom_id: SymptomId,
    pub name: String,
    pub cf_user: f64,
    /// Set when `cf_user` is exactly one of the answer levels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<UserConfidence>,
}

impl NamedSelection {
    /// Name `selection` from `symptom`, or `"Unknown"` when the catalog has no record.
    pub fn new(selection: &UserSymptomSelection, symptom: Option<&Symptom>) -> Self {
        Self {
            symptom_id: selection.symptom_id.clone(),
            name: symptom.map_or(UNKNOWN_SYMPTOM_NAME, |s| s.name.as_str()).to_string(),
            cf_user: selection.cf_user,
            answer: UserConfidence::from_cf(selection.cf_user),
        }
    }
}

/// The discrete answer scale offered to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserConfidence {
    /// 0.2
    Unsure,
    /// 0.4
    SlightlySure,
    /// 0.6
    FairlySure,
    /// 0.8
    Sure,
    /// 1.0
    Certain,
}

impl UserConfidence {
    /// All levels, lowest first.
    pub const LEVELS: [UserConfidence; 5] = [
        UserConfidence::Unsure,
        UserConfidence::SlightlySure,
        UserConfidence::FairlySure,
        UserConfidence::Sure,
        UserConfidence::Certain,
    ];

    /// Level preselected in forms.
    pub const DEFAULT: UserConfidence = UserConfidence::FairlySure;

    pub fn cf(self) -> f64 {
        match self {
            Self::Unsure => 0.2,
            Self::SlightlySure => 0.4,
            Self::FairlySure => 0.6,
            Self::Sure => 0.8,
            Self::Certain => 1.0,
        }
    }

    /// Map a raw value back onto the scale, if it is one of the five levels.
    pub fn from_cf(cf: f64) -> Option<Self> {
        Self::LEVELS
            .into_iter()
            .find(|level| (level.cf() - cf).abs() < 1e-9)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unsure => "Unsure",
            Self::SlightlySure => "Slightly sure",
            Self::FairlySure => "Fairly sure",
            Self::Sure => "Sure",
            Self::Certain => "Certain",
        }
    }
}

impl std::fmt::Display for UserConfidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.cf())
    }
}
