//! `cfdx diagnose`

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use colored::*;
use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use diagnosis_engine::{
    confidence_color, confidence_level, format_calculation_steps, format_conclusion,
    CalculationStep, ConfidenceLevel, Recommendation, RecommendationTier, TieBreak,
};
use diagnosis_service::{
    DiagnosisService, JsonlSessionRecorder, MemorySessionRecorder, ServiceOutcome, SessionRecorder,
};
use diagnosis_types::{
    DataIntegrityWarning, DiagnosisResult, NamedSelection, UserConfidence, UserSymptomSelection,
};

use super::open_catalog;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{colorize, print_json, print_table, print_warning, OutputFormat};

/// Arguments for `cfdx diagnose`
#[derive(Debug, Args)]
pub struct DiagnoseArgs {
    /// Catalog file (.json or .toml)
    #[arg(short, long, env = "CFDX_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Reported symptom as CODE=CF, or CODE alone for "fairly sure" (0.6)
    #[arg(short = 's', long = "symptom", value_name = "CODE[=CF]", value_parser = parse_selection)]
    pub symptoms: Vec<UserSymptomSelection>,

    /// Show the step-by-step calculation for each result
    #[arg(long)]
    pub explain: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Reject confidences outside their valid ranges
    #[arg(long)]
    pub strict: bool,

    /// Ordering for results with equal certainty
    #[arg(long, value_enum)]
    pub tie_break: Option<TieBreakArg>,

    /// Do not write this session to the configured store
    #[arg(long)]
    pub no_record: bool,
}

/// Tie-break choices on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TieBreakArg {
    DamageId,
    RuleOrder,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::DamageId => TieBreak::DamageId,
            TieBreakArg::RuleOrder => TieBreak::RuleOrder,
        }
    }
}

/// Parse `G01=0.8` or `G01`.
pub fn parse_selection(raw: &str) -> Result<UserSymptomSelection, String> {
    let (code, cf) = match raw.split_once('=') {
        Some((code, value)) => {
            let cf = value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("invalid confidence `{value}` for symptom {code}"))?;
            (code.trim(), cf)
        }
        None => (raw.trim(), UserConfidence::DEFAULT.cf()),
    };
    if code.is_empty() {
        return Err(format!("missing symptom code in `{raw}`"));
    }
    Ok(UserSymptomSelection::new(code, cf))
}

/// Table row for a ranked result
#[derive(Debug, Tabled)]
struct ResultRow {
    #[tabled(rename = "#")]
    rank: usize,
    code: String,
    damage: String,
    cf: String,
    #[tabled(rename = "%")]
    percentage: String,
    level: String,
    matched: String,
}

impl From<&DiagnosisResult> for ResultRow {
    fn from(r: &DiagnosisResult) -> Self {
        Self {
            rank: r.rank,
            code: r.damage_id.to_string(),
            damage: r.name.clone(),
            cf: format!("{:.4}", r.cf),
            percentage: format!("{}%", r.percentage),
            level: confidence_level(r.cf).to_string(),
            matched: format!(
                "{}/{} ({:.0}%)",
                r.matched_symptoms,
                r.total_symptoms,
                r.coverage() * 100.0
            ),
        }
    }
}

/// Table row for an echoed symptom
#[derive(Debug, Tabled)]
struct SelectionRow {
    code: String,
    symptom: String,
    cf: f64,
    answer: String,
}

impl From<&NamedSelection> for SelectionRow {
    fn from(s: &NamedSelection) -> Self {
        Self {
            code: s.symptom_id.to_string(),
            symptom: s.name.clone(),
            cf: s.cf_user,
            answer: s
                .answer
                .map(|answer| answer.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultReport<'a> {
    #[serde(flatten)]
    result: &'a DiagnosisResult,
    level: ConfidenceLevel,
    color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<Vec<CalculationStep>>,
}

#[derive(Debug, Serialize)]
struct DiagnoseReport<'a> {
    catalog_revision: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    session: Option<String>,
    selection: &'a [NamedSelection],
    results: Vec<ResultReport<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<&'a Recommendation>,
    warnings: &'a [DataIntegrityWarning],
}

/// Execute `cfdx diagnose`
pub async fn execute(args: DiagnoseArgs, config: &CliConfig) -> CliResult<()> {
    let catalog = Arc::new(open_catalog(args.catalog, config)?);

    let recorder: Arc<dyn SessionRecorder> = match (&config.sessions.store, args.no_record) {
        (Some(path), false) => match JsonlSessionRecorder::open(path).await {
            Ok(store) => Arc::new(store),
            Err(error) => {
                warn!(%error, "Session store unavailable, this session will not be kept");
                Arc::new(MemorySessionRecorder::new())
            }
        },
        _ => Arc::new(MemorySessionRecorder::new()),
    };

    let mut engine_config = config.engine.clone();
    if args.strict {
        engine_config.strict_ranges = true;
    }
    if let Some(tie_break) = args.tie_break {
        engine_config.tie_break = tie_break.into();
    }

    let service = DiagnosisService::with_config(catalog, recorder, engine_config);
    let ServiceOutcome {
        selection,
        results,
        recommendation,
        warnings,
        catalog_revision,
        recording,
        ..
    } = service.diagnose(&args.symptoms).await?;

    // The process exits right after printing, so let the write land first.
    let session = recording.wait().await;

    match args.format {
        OutputFormat::Json => {
            let report = DiagnoseReport {
                catalog_revision,
                session: session.map(|s| s.id.to_string()),
                selection: &selection,
                results: results
                    .iter()
                    .map(|result| ResultReport {
                        result,
                        level: confidence_level(result.cf),
                        color: confidence_color(result.cf).hex(),
                        explanation: args
                            .explain
                            .then(|| format_calculation_steps(result).collect()),
                    })
                    .collect(),
                recommendation: recommendation.as_ref(),
                warnings: &warnings,
            };
            print_json(&report)
        }
        OutputFormat::Table => {
            for warning in &warnings {
                print_warning(&warning.to_string());
            }
            println!("Selected symptoms:");
            print_table(selection.iter().map(SelectionRow::from).collect());
            if results.is_empty() {
                print_warning("No damage matches the selected symptoms");
                return Ok(());
            }

            println!();
            print_table(results.iter().map(ResultRow::from).collect());
            if let Some(recommendation) = &recommendation {
                println!();
                print_recommendation(recommendation);
            }
            if args.explain {
                for result in &results {
                    print_explanation(result);
                }
            }
            Ok(())
        }
    }
}

fn print_recommendation(recommendation: &Recommendation) {
    let marker = match recommendation.tier {
        RecommendationTier::Repair => "✓".green(),
        RecommendationTier::Inspect => "⚠".yellow(),
        RecommendationTier::CheckOtherSymptoms => "?".dimmed(),
    };
    println!("{marker} {recommendation}");
    println!(
        "  {}",
        "This result is predictive and does not replace an inspection by a mechanic.".dimmed()
    );
}

fn print_explanation(result: &DiagnosisResult) {
    let color = confidence_color(result.cf);
    let headline = format!(
        "#{} {} {} - {}% ({})",
        result.rank,
        result.damage_id,
        result.name,
        result.percentage,
        confidence_level(result.cf)
    );
    println!();
    println!("{}", colorize(&headline, color).bold());
    if !result.solution.is_empty() {
        println!("  Solution: {}", result.solution);
    }
    for step in format_calculation_steps(result) {
        println!("  {step}");
    }
    println!("  {}", format_conclusion(result));
}
