//! `cfdx levels`

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use diagnosis_engine::{confidence_color, ConfidenceLevel};
use diagnosis_types::UserConfidence;

use crate::error::CliResult;
use crate::output::{print_json, print_table, OutputFormat};

/// Arguments for `cfdx levels`
#[derive(Debug, Args)]
pub struct LevelsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Answer a user can give for a symptom
#[derive(Debug, Serialize, Tabled)]
struct AnswerRow {
    answer: &'static str,
    cf: f64,
}

/// Verbal level for a result
#[derive(Debug, Serialize, Tabled)]
struct LevelRow {
    level: &'static str,
    from: String,
    color: &'static str,
}

#[derive(Debug, Serialize)]
struct Scales {
    answers: Vec<AnswerRow>,
    levels: Vec<LevelRow>,
}

fn scales() -> Scales {
    Scales {
        answers: UserConfidence::LEVELS
            .into_iter()
            .map(|answer| AnswerRow {
                answer: answer.label(),
                cf: answer.cf(),
            })
            .collect(),
        levels: ConfidenceLevel::ALL
            .into_iter()
            .rev()
            .map(|level| {
                let threshold = level.threshold();
                LevelRow {
                    level: level.label(),
                    from: if threshold.is_finite() {
                        format!("{threshold}%")
                    } else {
                        "-".to_string()
                    },
                    color: confidence_color(threshold / 100.0).name(),
                }
            })
            .collect(),
    }
}

/// Execute `cfdx levels`
pub fn execute(args: LevelsArgs) -> CliResult<()> {
    let scales = scales();
    match args.format {
        OutputFormat::Json => print_json(&scales),
        OutputFormat::Table => {
            println!("Symptom answers");
            print_table(scales.answers);
            println!();
            println!("Result levels");
            print_table(scales.levels);
            Ok(())
        }
    }
}
