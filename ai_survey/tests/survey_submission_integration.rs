//! Integration tests for survey submission.
//!
//! Tests the local-then-remote dual write, form reset rules, and the
//! in-flight guard.

use ai_survey::storage::{
    KeyValueStore, MemoryStore, SURVEYS_KEY, StorageError, StorageResult,
};
use ai_survey::survey::{
    AiType, EducationLevel, FieldUpdate, Gender, SubmitResponse, SurveyError, SurveyForm,
    SurveyFormEngine, SurveyResult, SurveyService, SurveySubmission,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Survey service that records payloads and answers with a fixed outcome
struct RecordingService {
    outcome: Result<u16, String>,
    payloads: Mutex<Vec<serde_json::Value>>,
    gate: Option<Arc<Notify>>,
}

impl RecordingService {
    fn with_status(status: u16) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(status),
            payloads: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(message.to_string()),
            payloads: Mutex::new(Vec::new()),
            gate: None,
        })
    }

    fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(200),
            payloads: Mutex::new(Vec::new()),
            gate: Some(gate),
        })
    }

    fn payloads(&self) -> Vec<serde_json::Value> {
        self.payloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl SurveyService for RecordingService {
    async fn submit_survey_result(
        &self,
        payload: &SurveySubmission,
    ) -> SurveyResult<SubmitResponse> {
        self.payloads
            .lock()
            .unwrap()
            .push(serde_json::to_value(payload).unwrap());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &self.outcome {
            Ok(status) => Ok(SubmitResponse { status: *status }),
            Err(message) => Err(SurveyError::Transport(message.clone())),
        }
    }
}

/// Store whose writes always fail
struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    async fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable("disk full".to_string()))
    }

    async fn remove_item(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}

/// Fill every required field of the engine's form
fn fill_valid_form(engine: &SurveyFormEngine) {
    engine
        .update_field(FieldUpdate::Name("Ada".to_string()))
        .unwrap();
    engine
        .update_field(FieldUpdate::Surname("Lovelace".to_string()))
        .unwrap();
    engine
        .update_field(FieldUpdate::DateOfBirth(NaiveDate::from_ymd_opt(1992, 12, 10)))
        .unwrap();
    engine
        .update_field(FieldUpdate::EducationLevel(Some(EducationLevel::HighSchool)))
        .unwrap();
    engine
        .update_field(FieldUpdate::City("Istanbul".to_string()))
        .unwrap();
    engine
        .update_field(FieldUpdate::Gender(Some(Gender::Female)))
        .unwrap();
    engine.toggle_ai_model(AiType::ChatGpt);
    engine
        .update_model_description(AiType::ChatGpt, "Invents citations")
        .unwrap();
    engine
        .update_field(FieldUpdate::UseCaseOfAi("Planning trips".to_string()))
        .unwrap();
}

async fn stored_log(store: &MemoryStore) -> Vec<serde_json::Value> {
    let json = store.get_item(SURVEYS_KEY).await.unwrap().unwrap_or_default();
    if json.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(&json).unwrap()
}

#[tokio::test]
async fn test_successful_submit_writes_both_and_resets() {
    let store = MemoryStore::new();
    let service = RecordingService::with_status(200);
    let engine = SurveyFormEngine::new(Arc::new(store.clone()), service.clone());
    fill_valid_form(&engine);
    let submitted = engine.form();

    let receipt = engine.submit().await.expect("Submission should succeed");

    assert_eq!(receipt.status, 200);
    assert!(receipt.saved_locally);

    let log = stored_log(&store).await;
    assert_eq!(log.len(), 1, "Local log should gain exactly one entry");
    assert_eq!(log[0], serde_json::to_value(&submitted).unwrap());

    let payloads = service.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(
        payloads[0]["aiModel"],
        serde_json::json!([{"aiType": "chatGPT", "description": "Invents citations"}])
    );
    assert_eq!(payloads[0]["educationLevel"], "High School");
    assert_eq!(payloads[0]["dateOfBirth"], "1992-12-10");

    assert_eq!(engine.form(), SurveyForm::default(), "Form should reset on 200");
    assert!(!engine.is_valid());
}

#[tokio::test]
async fn test_rejected_submit_keeps_local_entry_and_form() {
    let store = MemoryStore::new();
    let service = RecordingService::with_status(500);
    let engine = SurveyFormEngine::new(Arc::new(store.clone()), service.clone());
    fill_valid_form(&engine);
    let before = engine.form();

    let result = engine.submit().await;

    assert!(matches!(result, Err(SurveyError::Rejected { status: 500 })));
    assert_eq!(stored_log(&store).await.len(), 1, "Local append is not rolled back");
    assert_eq!(engine.form(), before, "Form must stay populated for a retry");
    assert!(engine.is_valid());
    assert!(!engine.is_sending());

    // Retry appends again; the log is an audit trail, not a dedup set
    let _ = engine.submit().await;
    assert_eq!(stored_log(&store).await.len(), 2);
    assert_eq!(service.payloads().len(), 2);
}

#[tokio::test]
async fn test_transport_error_keeps_form() {
    let store = MemoryStore::new();
    let engine = SurveyFormEngine::new(
        Arc::new(store.clone()),
        RecordingService::failing("connection reset"),
    );
    fill_valid_form(&engine);

    let err = engine.submit().await.unwrap_err();

    assert!(matches!(err, SurveyError::Transport(_)));
    assert_eq!(err.client_message(), "Failed to submit survey");
    assert_eq!(stored_log(&store).await.len(), 1);
    assert!(engine.is_valid());
}

#[tokio::test]
async fn test_local_write_failure_still_sends() {
    let service = RecordingService::with_status(200);
    let engine = SurveyFormEngine::new(Arc::new(ReadOnlyStore), service.clone());
    fill_valid_form(&engine);

    let receipt = engine.submit().await.expect("Remote step is independent");

    assert!(!receipt.saved_locally);
    assert_eq!(service.payloads().len(), 1);
}

#[tokio::test]
async fn test_existing_log_is_appended_not_replaced() {
    let previous = serde_json::json!([
        {"name": "Old", "aiModel": [], "futureField": 1}
    ]);
    let store = MemoryStore::with_item(SURVEYS_KEY, &previous.to_string());
    let engine =
        SurveyFormEngine::new(Arc::new(store.clone()), RecordingService::with_status(200));
    fill_valid_form(&engine);

    engine.submit().await.unwrap();

    let log = stored_log(&store).await;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0]["futureField"], 1, "Unknown fields survive the rewrite");

    let history = engine.local_submissions().await.unwrap();
    assert_eq!(history[0].name, "Old");
    assert_eq!(history[1].name, "Ada");
}

#[tokio::test]
async fn test_legacy_entries_do_not_hide_history() {
    let previous = serde_json::json!([
        {
            "name": "Legacy",
            "surname": "",
            "dateOfBirth": "1990-05-17T10:00:00.000Z",
            "educationLevel": "PhD",
            "city": "Bursa",
            "gender": "male",
            "aiModel": [{"aiType": "bard", "description": "outdated", "isSelected": true}],
            "useCaseOfAi": "Homework"
        },
        {"name": "Broken", "educationLevel": 42},
        {"name": "Recent", "dateOfBirth": "1988-01-02", "aiModel": []}
    ]);
    let store = MemoryStore::with_item(SURVEYS_KEY, &previous.to_string());
    let engine =
        SurveyFormEngine::new(Arc::new(store.clone()), RecordingService::with_status(200));

    let history = engine.local_submissions().await.unwrap();

    let names: Vec<_> = history.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Legacy", "Recent"], "Unreadable entries are skipped");
    assert_eq!(history[0].date_of_birth, NaiveDate::from_ymd_opt(1990, 5, 17));

    fill_valid_form(&engine);
    engine.submit().await.unwrap();
    assert_eq!(stored_log(&store).await.len(), 4, "Skipped entries stay in the log");
    assert_eq!(engine.local_submissions().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_corrupt_log_treated_as_empty() {
    let store = MemoryStore::with_item(SURVEYS_KEY, "{not json");
    let engine =
        SurveyFormEngine::new(Arc::new(store.clone()), RecordingService::with_status(200));
    fill_valid_form(&engine);

    let receipt = engine.submit().await.unwrap();

    assert!(receipt.saved_locally);
    assert_eq!(stored_log(&store).await.len(), 1);
}

#[tokio::test]
async fn test_local_submissions_empty_without_key() {
    let engine = SurveyFormEngine::new(
        Arc::new(MemoryStore::new()),
        RecordingService::with_status(200),
    );
    assert!(engine.local_submissions().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_submit_is_rejected() {
    let gate = Arc::new(Notify::new());
    let service = RecordingService::gated(gate.clone());
    let engine = Arc::new(SurveyFormEngine::new(
        Arc::new(MemoryStore::new()),
        service.clone(),
    ));
    fill_valid_form(&engine);

    let first = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.submit().await }
    });

    while service.payloads().is_empty() {
        tokio::task::yield_now().await;
    }
    assert!(engine.is_sending());

    let second = engine.submit().await;
    assert!(matches!(second, Err(SurveyError::SubmissionInProgress)));

    gate.notify_one();
    first.await.unwrap().expect("First submission should complete");

    assert!(!engine.is_sending());
    assert_eq!(service.payloads().len(), 1, "Second call must not reach the service");
}

#[tokio::test]
async fn test_dropped_submit_clears_flag() {
    let gate = Arc::new(Notify::new());
    let service = RecordingService::gated(gate);
    let engine = Arc::new(SurveyFormEngine::new(
        Arc::new(MemoryStore::new()),
        service.clone(),
    ));
    fill_valid_form(&engine);

    let task = tokio::spawn({
        let engine = Arc::clone(&engine);
        async move { engine.submit().await }
    });
    while service.payloads().is_empty() {
        tokio::task::yield_now().await;
    }

    task.abort();
    let _ = task.await;

    assert!(!engine.is_sending());
    assert!(engine.is_valid(), "Aborted submission leaves the form intact");
}
