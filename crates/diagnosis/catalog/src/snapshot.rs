//! Immutable, pre-joined view of a catalog.
//!
//! A snapshot is assembled once from flat records and then only read. Rules
//! carry their damage and symptom records so evaluation needs no further
//! lookups. Anything inconsistent found during assembly is kept as a
//! [`DataIntegrityWarning`] instead of failing.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use diagnosis_types::{
    DataIntegrityWarning, Damage, DamageId, Rule, RuleDefinition, RuleSymptom, Symptom,
    SymptomId,
};

/// Pre-joined catalog at one revision.
#[derive(Clone, Debug, Default)]
pub struct CatalogSnapshot {
    revision: u64,
    symptoms: Vec<Symptom>,
    damages: Vec<Damage>,
    rules: Vec<Rule>,
    symptom_index: HashMap<SymptomId, usize>,
    damage_index: HashMap<DamageId, usize>,
    warnings: Vec<DataIntegrityWarning>,
}

impl CatalogSnapshot {
    /// Join `definitions` against the symptom and damage lists.
    ///
    /// For duplicated codes the first record wins. Rules keep their order.
    pub fn assemble(
        symptoms: Vec<Symptom>,
        damages: Vec<Damage>,
        definitions: &[RuleDefinition],
        revision: u64,
    ) -> Self {
        let mut warnings = Vec::new();

        let mut symptom_index = HashMap::with_capacity(symptoms.len());
        for (i, symptom) in symptoms.iter().enumerate() {
            if symptom_index.contains_key(&symptom.id) {
                warnings.push(duplicate("symptom", symptom.id.as_str()));
            } else {
                symptom_index.insert(symptom.id.clone(), i);
            }
        }

        let mut damage_index = HashMap::with_capacity(damages.len());
        for (i, damage) in damages.iter().enumerate() {
            if damage_index.contains_key(&damage.id) {
                warnings.push(duplicate("damage", damage.id.as_str()));
            } else {
                damage_index.insert(damage.id.clone(), i);
            }
        }

        let mut seen_rules = HashSet::with_capacity(definitions.len());
        let mut rules = Vec::with_capacity(definitions.len());
        for definition in definitions {
            if !seen_rules.insert(definition.id.clone()) {
                warnings.push(duplicate("rule", definition.id.as_str()));
            }
            if definition.symptoms.is_empty() {
                warnings.push(DataIntegrityWarning::EmptyRule {
                    rule_id: definition.id.clone(),
                });
            }

            let damage = damage_index
                .get(&definition.damage_id)
                .map(|&i| damages[i].clone());
            if damage.is_none() {
                warnings.push(DataIntegrityWarning::UnknownDamage {
                    rule_id: definition.id.clone(),
                    damage_id: definition.damage_id.clone(),
                });
            }

            let mut listed = HashSet::with_capacity(definition.symptoms.len());
            let mut entries = Vec::with_capacity(definition.symptoms.len());
            for entry in &definition.symptoms {
                if !listed.insert(entry.symptom_id.clone()) {
                    warnings.push(DataIntegrityWarning::RepeatedRuleSymptom {
                        rule_id: definition.id.clone(),
                        symptom_id: entry.symptom_id.clone(),
                    });
                }
                if !(entry.cf_expert.is_finite() && (-1.0..=1.0).contains(&entry.cf_expert)) {
                    warnings.push(DataIntegrityWarning::ExpertConfidenceOutOfRange {
                        rule_id: definition.id.clone(),
                        symptom_id: entry.symptom_id.clone(),
                        cf_expert: entry.cf_expert,
                    });
                }

                let symptom = symptom_index
                    .get(&entry.symptom_id)
                    .map(|&i| symptoms[i].clone());
                if symptom.is_none() {
                    warnings.push(DataIntegrityWarning::UnknownSymptom {
                        rule_id: definition.id.clone(),
                        symptom_id: entry.symptom_id.clone(),
                    });
                }
                entries.push(RuleSymptom {
                    symptom_id: entry.symptom_id.clone(),
                    cf_expert: entry.cf_expert,
                    symptom,
                });
            }

            rules.push(Rule {
                id: definition.id.clone(),
                damage_id: definition.damage_id.clone(),
                damage,
                symptoms: entries,
            });
        }

        for warning in &warnings {
            debug!(revision, %warning, "Catalog integrity issue");
        }
        if !warnings.is_empty() {
            warn!(
                revision,
                issues = warnings.len(),
                "Catalog snapshot assembled with integrity issues"
            );
        }

        Self {
            revision,
            symptoms,
            damages,
            rules,
            symptom_index,
            damage_index,
            warnings,
        }
    }

    /// Monotonic edit counter of the source catalog.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn symptoms(&self) -> &[Symptom] {
        &self.symptoms
    }

    pub fn damages(&self) -> &[Damage] {
        &self.damages
    }

    /// Joined rules in catalog order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn symptom(&self, id: &str) -> Option<&Symptom> {
        self.symptom_index.get(id).map(|&i| &self.symptoms[i])
    }

    pub fn damage(&self, id: &str) -> Option<&Damage> {
        self.damage_index.get(id).map(|&i| &self.damages[i])
    }

    /// Problems found while assembling.
    pub fn warnings(&self) -> &[DataIntegrityWarning] {
        &self.warnings
    }

    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn duplicate(collection: &str, code: &str) -> DataIntegrityWarning {
    DataIntegrityWarning::DuplicateCode {
        collection: collection.to_string(),
        code: code.to_string(),
    }
}
