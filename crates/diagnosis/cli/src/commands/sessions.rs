//! `cfdx sessions`

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use diagnosis_service::{JsonlSessionRecorder, SessionRecord, SessionRecorder};

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{print_json, print_table, OutputFormat};

/// Arguments for `cfdx sessions`
#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// JSON-lines session store (defaults to `sessions.store` from config)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// List the most recent sessions instead of only counting them
    #[arg(short, long)]
    pub list: bool,

    /// How many sessions to list
    #[arg(short = 'n', long, default_value_t = 20)]
    pub limit: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

/// Table row for a recorded session
#[derive(Debug, Tabled)]
struct SessionRow {
    session: String,
    recorded: String,
    symptoms: usize,
    results: usize,
    top: String,
}

impl From<&SessionRecord> for SessionRow {
    fn from(record: &SessionRecord) -> Self {
        Self {
            session: record.id.to_string(),
            recorded: record.recorded_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            symptoms: record.summary.total_symptoms,
            results: record.summary.total_results,
            top: record
                .summary
                .top()
                .map(|top| format!("{} ({}%)", top.damage_id, top.percentage))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct SessionsReport<'a> {
    count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    sessions: Option<&'a [SessionRecord]>,
}

/// Execute `cfdx sessions`
pub async fn execute(args: SessionsArgs, config: &CliConfig) -> CliResult<()> {
    let path = args
        .store
        .or_else(|| config.sessions.store.clone())
        .ok_or(CliError::MissingSessionStore)?;
    let recorder = JsonlSessionRecorder::open(path).await?;
    let count = recorder.session_count().await?;

    let recent: Vec<SessionRecord> = if args.list {
        let records = recorder.read_all().await?;
        let skip = records.len().saturating_sub(args.limit);
        records.into_iter().skip(skip).rev().collect()
    } else {
        Vec::new()
    };

    match args.format {
        OutputFormat::Json => print_json(&SessionsReport {
            count,
            sessions: args.list.then_some(recent.as_slice()),
        }),
        OutputFormat::Table => {
            println!("{count} recorded session(s) in {}", recorder.path().display());
            if args.list {
                print_table(recent.iter().map(SessionRow::from).collect());
            }
            Ok(())
        }
    }
}
