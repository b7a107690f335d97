//! The diagnosis service: snapshot, evaluate, record.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use diagnosis_catalog::{CatalogProvider, CatalogSnapshot};
use diagnosis_engine::{
    DiagnosisEngine, EngineConfig, EvaluationStats, Recommendation, SessionSummary,
};
use diagnosis_types::{
    DataIntegrityWarning, DiagnosisResult, NamedSelection, UserSymptomSelection,
};

use crate::error::ServiceResult;
use crate::recorder::{SessionRecord, SessionRecorder};

/// Background write of one session.
///
/// Dropping the handle does not cancel the write.
#[derive(Debug)]
pub struct RecordingHandle {
    task: Option<JoinHandle<Option<SessionRecord>>>,
}

impl RecordingHandle {
    /// Handle for a diagnosis that had nothing worth recording.
    pub fn skipped() -> Self {
        Self { task: None }
    }

    pub fn is_skipped(&self) -> bool {
        self.task.is_none()
    }

    /// Wait for the write. `None` if it was skipped or failed.
    pub async fn wait(self) -> Option<SessionRecord> {
        match self.task {
            Some(task) => match task.await {
                Ok(record) => record,
                Err(error) => {
                    warn!(%error, "Session recording task did not complete");
                    None
                }
            },
            None => None,
        }
    }
}

/// What a diagnosis returns to its caller.
#[derive(Debug)]
pub struct ServiceOutcome {
    /// The evaluated selection with catalog names, first entry per symptom.
    pub selection: Vec<NamedSelection>,
    /// Ranked results; empty when no rule matched.
    pub results: Vec<DiagnosisResult>,
    /// Advice for the top result.
    pub recommendation: Option<Recommendation>,
    /// Catalog and engine integrity warnings from this run.
    pub warnings: Vec<DataIntegrityWarning>,
    pub stats: EvaluationStats,
    /// Revision of the catalog snapshot that was evaluated.
    pub catalog_revision: u64,
    pub recording: RecordingHandle,
}

/// Ties a catalog, the engine and a session recorder together.
pub struct DiagnosisService {
    catalog: Arc<dyn CatalogProvider>,
    recorder: Arc<dyn SessionRecorder>,
    engine: DiagnosisEngine,
}

impl DiagnosisService {
    pub fn new(catalog: Arc<dyn CatalogProvider>, recorder: Arc<dyn SessionRecorder>) -> Self {
        Self::with_config(catalog, recorder, EngineConfig::default())
    }

    pub fn with_config(
        catalog: Arc<dyn CatalogProvider>,
        recorder: Arc<dyn SessionRecorder>,
        config: EngineConfig,
    ) -> Self {
        Self {
            catalog,
            recorder,
            engine: DiagnosisEngine::new(config),
        }
    }

    pub fn engine(&self) -> &DiagnosisEngine {
        &self.engine
    }

    pub fn recorder(&self) -> &Arc<dyn SessionRecorder> {
        &self.recorder
    }

    /// Diagnose `selection` against the current catalog.
    ///
    /// When there are results, the session is recorded on a spawned task and
    /// this returns without waiting for it. A failed recording is logged and
    /// never turns into an error here. Must be called inside a tokio runtime.
    pub async fn diagnose(
        &self,
        selection: &[UserSymptomSelection],
    ) -> ServiceResult<ServiceOutcome> {
        let snapshot = self.catalog.snapshot().await?;
        let diagnosis = self
            .engine
            .evaluate(selection, snapshot.rules(), snapshot.damages())?;

        let mut warnings = snapshot.warnings().to_vec();
        for warning in diagnosis.warnings {
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }

        debug!(
            revision = snapshot.revision(),
            symptoms = selection.len(),
            results = diagnosis.results.len(),
            warnings = warnings.len(),
            "Diagnosis finished"
        );

        let recording = if diagnosis.results.is_empty() {
            RecordingHandle::skipped()
        } else {
            self.spawn_recording(SessionSummary::from_diagnosis(selection, &diagnosis.results))
        };

        Ok(ServiceOutcome {
            selection: name_selection(selection, &snapshot),
            recommendation: Recommendation::for_results(&diagnosis.results),
            results: diagnosis.results,
            warnings,
            stats: diagnosis.stats,
            catalog_revision: snapshot.revision(),
            recording,
        })
    }

    fn spawn_recording(&self, summary: SessionSummary) -> RecordingHandle {
        let recorder = Arc::clone(&self.recorder);
        let task = tokio::spawn(async move {
            match recorder.record_session(summary).await {
                Ok(record) => {
                    info!(session = %record.id, "Recorded diagnosis session");
                    Some(record)
                }
                Err(error) => {
                    warn!(%error, "Failed to record diagnosis session");
                    None
                }
            }
        });
        RecordingHandle { task: Some(task) }
    }
}

fn name_selection(
    selection: &[UserSymptomSelection],
    snapshot: &CatalogSnapshot,
) -> Vec<NamedSelection> {
    let mut seen = HashSet::with_capacity(selection.len());
    let mut named = Vec::with_capacity(selection.len());
    for entry in selection {
        if seen.insert(entry.symptom_id.as_str()) {
            named.push(NamedSelection::new(entry, snapshot.symptom(entry.symptom_id.as_str())));
        }
    }
    named
}
