//! # diagnosis-catalog
//!
//! Where symptoms, damages and rules live, and how they become the immutable
//! [`CatalogSnapshot`] the engine evaluates against.
//!
//! - [`CatalogProvider`] is the seam the diagnosis service reads through.
//! - [`InMemoryCatalog`] supports expert edits with cascading removal.
//! - [`FileCatalog`] reads a JSON or TOML [`CatalogDocument`] from disk.
//!
//! Assembly never fails on inconsistent data. Dangling references, duplicates
//! and out-of-range confidences are reported as warnings on the snapshot.

#![deny(unsafe_code)]

pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod provider;
pub mod snapshot;

// ── Re-exports ──────────────────────────────────────────────────────────

pub use document::{CatalogDocument, CatalogFormat};
pub use error::{CatalogError, CatalogResult};
pub use file::FileCatalog;
pub use memory::InMemoryCatalog;
pub use provider::CatalogProvider;
pub use snapshot::CatalogSnapshot;
