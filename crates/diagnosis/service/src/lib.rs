//! # diagnosis-service
//!
//! Async front of the diagnosis engine. Each call takes a fresh catalog
//! snapshot, evaluates it, and hands a [`SessionSummary`] to a
//! [`SessionRecorder`] on a background task.
//!
//! ```text
//! CatalogProvider ──snapshot──▶ DiagnosisEngine ──results──▶ caller
//!                                      │
//!                                      └──summary──▶ tokio::spawn ──▶ SessionRecorder
//! ```
//!
//! [`SessionSummary`]: diagnosis_engine::SessionSummary

#![deny(unsafe_code)]

pub mod error;
pub mod recorder;
pub mod service;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use error::{RecorderError, RecorderResult, ServiceError, ServiceResult};
pub use recorder::{
    JsonlSessionRecorder, MemorySessionRecorder, SessionId, SessionRecord, SessionRecorder,
};
pub use service::{DiagnosisService, RecordingHandle, ServiceOutcome};
