//! # diagnosis-engine
//!
//! Certainty factor (CF) evaluation of expert rules against reported symptoms.
//!
//! ## Pipeline
//!
//! ```text
//!   ┌──────────────────────┐     ┌──────────────────────┐
//!   │ UserSymptomSelection │     │ Rule / Damage        │
//!   │ (symptom, cf_user)   │     │ catalog snapshot     │
//!   └──────────┬───────────┘     └──────────┬───────────┘
//!              │                            │
//!              └─────────┬─────────────────┘
//!                        ▼
//!              ┌─────────────────────┐
//!              │  Match              │  ← cf_expert × cf_user per shared symptom
//!              └─────────┬───────────┘
//!                        ▼
//!              ┌─────────────────────┐
//!              │  Combine            │  ← a + b(1 - a), rule declaration order
//!              └─────────┬───────────┘
//!                        ▼
//!              ┌─────────────────────┐
//!              │  Rank               │  ← cf descending, then tie-break
//!              └─────────┬───────────┘
//!                        ▼
//!   ┌────────────────┬───┴────────────┬──────────────────┐
//!   ▼                ▼                ▼                  ▼
//! DiagnosisResult  ConfidenceLevel  CalculationSteps  SessionSummary
//! ```
//!
//! The engine is pure: it owns no catalog and keeps no state between calls.

#![deny(unsafe_code)]

pub mod cf;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod explain;
pub mod recommend;
pub mod summary;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use classify::{confidence_color, confidence_level, ConfidenceColor, ConfidenceLevel};
pub use config::{EngineConfig, TieBreak};
pub use engine::{diagnose, Diagnosis, DiagnosisEngine, EvaluationStats};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use explain::{
    format_calculation_steps, format_conclusion, CalculationStep, CalculationSteps, StepKind,
};
pub use recommend::{Recommendation, RecommendationTier};
pub use summary::{RankedDamage, SessionSummary, SymptomConfidence};
