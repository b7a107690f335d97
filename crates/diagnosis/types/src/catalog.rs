//! Expert-authored catalog records: symptoms, damages and the rules linking them.

use serde::{Deserialize, Serialize};

use crate::ids::{DamageId, RuleId, SymptomId};

/// Display name used when a rule symptom arrives without its catalog record.
pub const UNKNOWN_SYMPTOM_NAME: &str = "Unknown";

// ── Symptom ─────────────────────────────────────────────────────────────

/// An observable condition the user can report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    /// Catalog code.
    pub id: SymptomId,
    /// Short name shown in selection lists.
    pub name: String,
    /// Longer explanation of what to look for.
    #[serde(default)]
    pub description: String,
}

impl Symptom {
    pub fn new(id: impl Into<SymptomId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }
}

// ── Damage ──────────────────────────────────────────────────────────────

/// A candidate root cause, together with how to fix it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    /// Catalog code.
    pub id: DamageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Recommended repair.
    #[serde(default)]
    pub solution: String,
}

impl Damage {
    pub fn new(id: impl Into<DamageId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            solution: String::new(),
        }
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = solution.into();
        self
    }
}

// ── Rules ───────────────────────────────────────────────────────────────

/// One (symptom, expert confidence) entry of a rule, in its stored form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSymptomDefinition {
    pub symptom_id: SymptomId,
    /// Expert-asserted certainty factor, conventionally in `[-1, 1]`.
    pub cf_expert: f64,
}

/// A rule as a catalog stores it: ids only, no joined records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub id: RuleId,
    pub damage_id: DamageId,
    #[serde(default)]
    pub symptoms: Vec<RuleSymptomDefinition>,
}

impl RuleDefinition {
    pub fn new(id: impl Into<RuleId>, damage_id: impl Into<DamageId>) -> Self {
        Self {
            id: id.into(),
            damage_id: damage_id.into(),
            symptoms: Vec::new(),
        }
    }

    /// Append a symptom entry. Declaration order is significant: it is the
    /// order certainty factors are combined in.
    pub fn with_symptom(mut self, symptom_id: impl Into<SymptomId>, cf_expert: f64) -> Self {
        self.symptoms.push(RuleSymptomDefinition {
            symptom_id: symptom_id.into(),
            cf_expert,
        });
        self
    }
}

/// A rule symptom entry joined with its symptom record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleSymptom {
    pub symptom_id: SymptomId,
    pub cf_expert: f64,
    /// Joined symptom record, if the catalog had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptom: Option<Symptom>,
}

impl RuleSymptom {
    pub fn new(symptom_id: impl Into<SymptomId>, cf_expert: f64) -> Self {
        Self {
            symptom_id: symptom_id.into(),
            cf_expert,
            symptom: None,
        }
    }

    /// Name to show for this entry.
    pub fn display_name(&self) -> &str {
        self.symptom
            .as_ref()
            .map_or(UNKNOWN_SYMPTOM_NAME, |s| s.name.as_str())
    }
}

/// A rule pre-joined with its damage and symptom records.
///
/// This is what the engine evaluates. A rule with no symptom entries is
/// inert and never produces a result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub damage_id: DamageId,
    /// Joined damage record. When absent the engine falls back to a lookup
    /// in the damage list by `damage_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Damage>,
    #[serde(default)]
    pub symptoms: Vec<RuleSymptom>,
}

impl Rule {
    pub fn new(id: impl Into<RuleId>, damage_id: impl Into<DamageId>) -> Self {
        Self {
            id: id.into(),
            damage_id: damage_id.into(),
            damage: None,
            symptoms: Vec::new(),
        }
    }

    pub fn with_damage(mut self, damage: Damage) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_symptom(mut self, symptom_id: impl Into<SymptomId>, cf_expert: f64) -> Self {
        self.symptoms.push(RuleSymptom::new(symptom_id, cf_expert));
        self
    }

    pub fn with_joined_symptom(mut self, symptom: Symptom, cf_expert: f64) -> Self {
        self.symptoms.push(RuleSymptom {
            symptom_id: symptom.id.clone(),
            cf_expert,
            symptom: Some(symptom),
        });
        self
    }

    pub fn is_inert(&self) -> bool {
        self.symptoms.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_unknown() {
        let bare = RuleSymptom::new("G01", 0.8);
        assert_eq!(bare.display_name(), UNKNOWN_SYMPTOM_NAME);

        let rule = Rule::new("R1", "K01")
            .with_joined_symptom(Symptom::new("G01", "Engine won't start"), 0.8);
        assert_eq!(rule.symptoms[0].display_name(), "Engine won't start");
    }

    #[test]
    fn rule_without_symptoms_is_inert() {
        assert!(Rule::new("R1", "K01").is_inert());
        assert!(!Rule::new("R1", "K01").with_symptom("G01", 0.4).is_inert());
    }

    #[test]
    fn definition_deserializes_without_optional_fields() {
        let json = r#"{"id":"R9","damage_id":"K09"}"#;
        let def: RuleDefinition = serde_json::from_str(json).unwrap();
        assert!(def.symptoms.is_empty());

        let damage: Damage =
            serde_json::from_str(r#"{"id":"K09","name":"Clogged carburettor"}"#).unwrap();
        assert!(damage.solution.is_empty());
    }
}
