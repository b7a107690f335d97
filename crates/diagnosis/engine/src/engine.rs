//! Rule evaluation and ranking.
//!
//! For every rule the engine collects the rule symptoms the user reported,
//! scores each as `cf_expert * cf_user`, folds those scores with the
//! certainty factor combination operator in rule declaration order, and emits
//! one candidate per rule with at least one match. Candidates are ranked by
//! descending certainty.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use diagnosis_types::{
    DataIntegrityWarning, Damage, DiagnosisResult, MatchedSymptom, Rule, UserSymptomSelection,
};

use crate::cf;
use crate::config::{EngineConfig, TieBreak};
use crate::error::{EngineError, EngineResult};

// ── Diagnosis ───────────────────────────────────────────────────────────

/// Counters describing one evaluation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationStats {
    /// Rules in the catalog.
    pub rules_total: usize,
    /// Rules skipped because they have no symptom entries.
    pub rules_inert: usize,
    /// Rules with entries but no reported symptom among them.
    pub rules_unmatched: usize,
    /// Matching rules dropped because their damage could not be resolved.
    pub rules_dropped: usize,
}

/// Ranked results plus anything odd noticed along the way.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Candidates ordered by descending `cf`, ranked from 1.
    pub results: Vec<DiagnosisResult>,
    /// Non-fatal catalog problems; each one dropped a candidate.
    pub warnings: Vec<DataIntegrityWarning>,
    pub stats: EvaluationStats,
}

impl Diagnosis {
    /// Highest ranked candidate, if any rule matched.
    pub fn top(&self) -> Option<&DiagnosisResult> {
        self.results.first()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

// ── Engine ──────────────────────────────────────────────────────────────

/// Stateless certainty factor evaluator.
///
/// Catalogs are borrowed per call, so one engine can serve any number of
/// snapshots from any number of threads.
#[derive(Clone, Debug, Default)]
pub struct DiagnosisEngine {
    config: EngineConfig,
}

impl DiagnosisEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rank candidate damages for a symptom selection.
    ///
    /// Fails when `rules` or `selection` is empty. An empty `Ok` means the
    /// inputs were fine but no rule shares a symptom with the selection.
    pub fn diagnose(
        &self,
        selection: &[UserSymptomSelection],
        rules: &[Rule],
        damages: &[Damage],
    ) -> EngineResult<Vec<DiagnosisResult>> {
        self.evaluate(selection, rules, damages)
            .map(|diagnosis| diagnosis.results)
    }

    /// Like [`diagnose`](Self::diagnose) but also returns the integrity
    /// warnings and counters from the pass.
    pub fn evaluate(
        &self,
        selection: &[UserSymptomSelection],
        rules: &[Rule],
        damages: &[Damage],
    ) -> EngineResult<Diagnosis> {
        if rules.is_empty() {
            return Err(EngineError::NoRulesAvailable);
        }
        if selection.is_empty() {
            return Err(EngineError::NoSymptomsSelected);
        }
        if self.config.strict_ranges {
            validate_selection(selection)?;
        }

        // First entry wins when the same symptom is reported twice.
        let mut reported: HashMap<&str, f64> = HashMap::with_capacity(selection.len());
        for entry in selection {
            reported
                .entry(entry.symptom_id.as_str())
                .or_insert(entry.cf_user);
        }

        let mut damage_index: HashMap<&str, &Damage> = HashMap::with_capacity(damages.len());
        for damage in damages {
            damage_index.entry(damage.id.as_str()).or_insert(damage);
        }

        let mut stats = EvaluationStats {
            rules_total: rules.len(),
            ..Default::default()
        };
        let mut warnings = Vec::new();
        let mut results = Vec::new();

        for rule in rules {
            if rule.is_inert() {
                stats.rules_inert += 1;
                continue;
            }

            let matches = self.match_rule(rule, &reported)?;
            let Some(cf) = cf::fold(matches.iter().map(|m| m.cf_combined)) else {
                stats.rules_unmatched += 1;
                continue;
            };

            let damage = rule
                .damage
                .as_ref()
                .or_else(|| damage_index.get(rule.damage_id.as_str()).copied());
            let Some(damage) = damage else {
                warn!(
                    rule_id = %rule.id,
                    damage_id = %rule.damage_id,
                    "Dropping candidate with unknown damage"
                );
                stats.rules_dropped += 1;
                warnings.push(DataIntegrityWarning::UnknownDamage {
                    rule_id: rule.id.clone(),
                    damage_id: rule.damage_id.clone(),
                });
                continue;
            };

            results.push(DiagnosisResult {
                damage_id: damage.id.clone(),
                rule_id: rule.id.clone(),
                name: damage.name.clone(),
                description: damage.description.clone(),
                solution: damage.solution.clone(),
                cf,
                percentage: cf::percentage(cf),
                matched_symptoms: matches.len(),
                total_symptoms: rule.symptoms.len(),
                matching_symptoms: matches,
                rank: 0,
            });
        }

        self.rank(&mut results);

        debug!(
            selected = selection.len(),
            rules = stats.rules_total,
            results = results.len(),
            dropped = stats.rules_dropped,
            top = results.first().map(|r| r.damage_id.as_str()),
            "Diagnosis evaluated"
        );

        Ok(Diagnosis {
            results,
            warnings,
            stats,
        })
    }

    /// Matched entries of one rule, in declaration order.
    fn match_rule(
        &self,
        rule: &Rule,
        reported: &HashMap<&str, f64>,
    ) -> EngineResult<Vec<MatchedSymptom>> {
        let mut matches = Vec::new();
        for entry in &rule.symptoms {
            let Some(&cf_user) = reported.get(entry.symptom_id.as_str()) else {
                continue;
            };
            if self.config.strict_ranges && !cf::is_valid_expert_cf(entry.cf_expert) {
                return Err(EngineError::ExpertConfidenceOutOfRange {
                    rule_id: rule.id.clone(),
                    symptom_id: entry.symptom_id.clone(),
                    value: entry.cf_expert,
                });
            }
            matches.push(MatchedSymptom {
                symptom_id: entry.symptom_id.clone(),
                symptom_name: entry.display_name().to_string(),
                cf_expert: entry.cf_expert,
                cf_user,
                cf_combined: cf::product(entry.cf_expert, cf_user),
            });
        }
        Ok(matches)
    }

    /// Sort by descending `cf` and assign 1-based ranks. NaN sorts last.
    fn rank(&self, results: &mut [DiagnosisResult]) {
        let tie_break = self.config.tie_break;
        results.sort_by(|a, b| {
            sort_key(b.cf).total_cmp(&sort_key(a.cf)).then_with(|| match tie_break {
                TieBreak::DamageId => a.damage_id.cmp(&b.damage_id),
                TieBreak::RuleOrder => Ordering::Equal,
            })
        });
        for (index, result) in results.iter_mut().enumerate() {
            result.rank = index + 1;
        }
    }
}

fn sort_key(cf: f64) -> f64 {
    if cf.is_nan() {
        f64::NEG_INFINITY
    } else {
        cf
    }
}

fn validate_selection(selection: &[UserSymptomSelection]) -> EngineResult<()> {
    match selection.iter().find(|s| !cf::is_valid_user_cf(s.cf_user)) {
        Some(bad) => Err(EngineError::UserConfidenceOutOfRange {
            symptom_id: bad.symptom_id.clone(),
            value: bad.cf_user,
        }),
        None => Ok(()),
    }
}

/// [`DiagnosisEngine::diagnose`] with the default configuration.
pub fn diagnose(
    selection: &[UserSymptomSelection],
    rules: &[Rule],
    damages: &[Damage],
) -> EngineResult<Vec<DiagnosisResult>> {
    DiagnosisEngine::default().diagnose(selection, rules, damages)
}
