use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use diagnosis_catalog::{CatalogDocument, CatalogProvider, InMemoryCatalog};
use diagnosis_engine::{EngineConfig, EngineError, SessionSummary};
use diagnosis_service::{
    DiagnosisService, JsonlSessionRecorder, MemorySessionRecorder, RecorderError,
    RecorderResult, ServiceError, SessionRecord, SessionRecorder,
};
use diagnosis_types::{
    DataIntegrityWarning, Damage, Role, RuleDefinition, Symptom, UserSymptomSelection,
};

/// Recorder whose store is always down.
#[derive(Default)]
struct BrokenRecorder {
    attempts: AtomicUsize,
}

#[async_trait]
impl SessionRecorder for BrokenRecorder {
    async fn record_session(&self, _summary: SessionSummary) -> RecorderResult<SessionRecord> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(RecorderError::Unavailable("database offline".into()))
    }

    async fn session_count(&self) -> RecorderResult<u64> {
        Err(RecorderError::Unavailable("database offline".into()))
    }
}

fn motorcycle_catalog() -> Arc<InMemoryCatalog> {
    Arc::new(InMemoryCatalog::from_document(CatalogDocument {
        symptoms: vec![
            Symptom::new("G01", "Engine hard to start"),
            Symptom::new("G02", "Engine dies at idle"),
            Symptom::new("G03", "Black exhaust smoke"),
        ],
        damages: vec![
            Damage::new("K01", "Fouled spark plug").with_solution("Clean or replace the plug"),
            Damage::new("K02", "Dirty carburettor").with_solution("Clean the carburettor"),
        ],
        rules: vec![
            RuleDefinition::new("R01", "K01")
                .with_symptom("G01", 0.8)
                .with_symptom("G02", 0.4),
            RuleDefinition::new("R02", "K02")
                .with_symptom("G02", 0.6)
                .with_symptom("G03", 0.8),
        ],
    }))
}

fn selection() -> Vec<UserSymptomSelection> {
    vec![
        UserSymptomSelection::new("G01", 0.6),
        UserSymptomSelection::new("G02", 0.8),
    ]
}

#[tokio::test]
async fn results_survive_a_failing_recorder() {
    let recorder = Arc::new(BrokenRecorder::default());
    let service = DiagnosisService::new(motorcycle_catalog(), recorder.clone());

    let outcome = service.diagnose(&selection()).await.unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].damage_id.as_str(), "K01");
    assert_eq!(outcome.results[0].percentage, 65);
    assert_eq!(outcome.results[1].damage_id.as_str(), "K02");
    assert_eq!(outcome.results[1].percentage, 48);

    assert!(outcome.recording.wait().await.is_none());
    assert_eq!(recorder.attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn engine_errors_are_returned() {
    let service = DiagnosisService::new(
        motorcycle_catalog(),
        Arc::new(MemorySessionRecorder::new()),
    );
    let err = service.diagnose(&[]).await.unwrap_err();
    assert!(matches!(err, ServiceError::Engine(EngineError::NoSymptomsSelected)));

    let empty = Arc::new(InMemoryCatalog::new());
    let service = DiagnosisService::new(empty, Arc::new(MemorySessionRecorder::new()));
    let err = service.diagnose(&selection()).await.unwrap_err();
    assert!(matches!(err, ServiceError::Engine(EngineError::NoRulesAvailable)));
}

#[tokio::test]
async fn strict_config_rejects_out_of_range_confidence() {
    let service = DiagnosisService::with_config(
        motorcycle_catalog(),
        Arc::new(MemorySessionRecorder::new()),
        EngineConfig::strict(),
    );
    let err = service
        .diagnose(&[UserSymptomSelection::new("G01", 1.5)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Engine(EngineError::UserConfidenceOutOfRange { .. })
    ));
}

#[tokio::test]
async fn dangling_damage_is_reported_not_fatal() {
    let catalog = motorcycle_catalog();
    catalog
        .upsert_rule(
            Role::Expert,
            RuleDefinition::new("R03", "K99").with_symptom("G01", 0.9),
        )
        .unwrap();
    let service = DiagnosisService::new(catalog, Arc::new(MemorySessionRecorder::new()));

    let outcome = service.diagnose(&selection()).await.unwrap();

    assert_eq!(outcome.results.len(), 2);
    assert!(outcome.results.iter().all(|r| r.damage_id.as_str() != "K99"));
    let unknown = DataIntegrityWarning::UnknownDamage {
        rule_id: "R03".into(),
        damage_id: "K99".into(),
    };
    assert_eq!(outcome.warnings.iter().filter(|w| **w == unknown).count(), 1);
    outcome.recording.wait().await;
}

#[tokio::test]
async fn catalog_edits_apply_to_the_next_diagnosis() {
    let catalog = motorcycle_catalog();
    let service = DiagnosisService::new(catalog.clone(), Arc::new(MemorySessionRecorder::new()));

    let before = service.diagnose(&selection()).await.unwrap();
    catalog.remove_damage(Role::Expert, "K02").unwrap();
    let after = service.diagnose(&selection()).await.unwrap();

    assert_eq!(before.results.len(), 2);
    assert_eq!(after.results.len(), 1);
    assert!(after.catalog_revision > before.catalog_revision);
    assert_eq!(catalog.revision().await.unwrap(), after.catalog_revision);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_diagnoses_are_all_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let recorder = Arc::new(
        JsonlSessionRecorder::open(dir.path().join("sessions.jsonl"))
            .await
            .unwrap(),
    );
    let service = Arc::new(DiagnosisService::new(motorcycle_catalog(), recorder.clone()));

    let mut tasks = Vec::new();
    for _ in 0..16 {
        let service = Arc::clone(&service);
        tasks.push(tokio::spawn(async move {
            let outcome = service.diagnose(&selection()).await.unwrap();
            outcome.recording.wait().await.unwrap();
            outcome.results
        }));
    }

    let mut first = None;
    for task in tasks {
        let results = task.await.unwrap();
        let expected = first.get_or_insert_with(|| results.clone());
        assert_eq!(&results, expected);
    }

    assert_eq!(recorder.session_count().await.unwrap(), 16);
    assert_eq!(recorder.read_all().await.unwrap().len(), 16);
}
