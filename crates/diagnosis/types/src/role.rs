//! Capability passed to operations that distinguish experts from end users.

use serde::{Deserialize, Serialize};

/// Who is acting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Maintains symptoms, damages and rules.
    Expert,
    /// Runs diagnoses only.
    #[default]
    User,
}

impl Role {
    pub fn can_edit_catalog(self) -> bool {
        matches!(self, Self::Expert)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expert => write!(f, "expert"),
            Self::User => write!(f, "user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_experts_edit() {
        assert!(Role::Expert.can_edit_catalog());
        assert!(!Role::User.can_edit_catalog());
        assert_eq!(Role::default(), Role::User);
    }
}
