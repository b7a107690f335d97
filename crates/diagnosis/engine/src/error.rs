//! Error types for the diagnosis engine.

use diagnosis_types::{RuleId, SymptomId};
use thiserror::Error;

/// Broad classes of engine failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied unusable input. Never worth retrying.
    InputValidation,
}

/// Errors that stop a diagnosis run before any result is produced.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// The rule catalog is empty.
    #[error("no diagnosis rules are available")]
    NoRulesAvailable,

    /// The user selected no symptoms.
    #[error("no symptoms were selected")]
    NoSymptomsSelected,

    /// Strict mode: a user confidence is outside `[0, 1]` or not finite.
    #[error("user confidence {value} for symptom {symptom_id} is outside [0, 1]")]
    UserConfidenceOutOfRange { symptom_id: SymptomId, value: f64 },

    /// Strict mode: an expert confidence is outside `[-1, 1]` or not finite.
    #[error("expert confidence {value} for symptom {symptom_id} in rule {rule_id} is outside [-1, 1]")]
    ExpertConfidenceOutOfRange {
        rule_id: RuleId,
        symptom_id: SymptomId,
        value: f64,
    },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoRulesAvailable
            | Self::NoSymptomsSelected
            | Self::UserConfidenceOutOfRange { .. }
            | Self::ExpertConfidenceOutOfRange { .. } => ErrorKind::InputValidation,
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
