//! Stable catalog codes.
//!
//! Codes are assigned by whoever owns the catalog. This crate only carries
//! them around; it never mints new ones.

use serde::{Deserialize, Serialize};

macro_rules! catalog_code {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Wrap an existing catalog code.
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            /// The raw code.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self(code.to_string())
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

catalog_code!(
    /// Code of an observable symptom (e.g. `G01`).
    SymptomId
);

catalog_code!(
    /// Code of a candidate root cause (e.g. `K03`).
    DamageId
);

catalog_code!(
    /// Code of an expert-authored rule.
    RuleId
);
