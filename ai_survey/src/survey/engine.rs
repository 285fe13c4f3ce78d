//! Survey form state, editing operations and dual-write submission.

use super::{
    errors::{SurveyError, SurveyResult},
    models::{
        AiModelEntry, AiType, FieldUpdate, FormField, SubmissionReceipt, SurveyForm,
        SurveySubmission,
    },
    service::SurveyService,
    validity::{compute_validity, missing_fields},
};
use crate::storage::{KeyValueStore, SURVEYS_KEY};
use chrono::{Local, NaiveDate};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, Ordering},
};

/// Clears the in-flight flag when the submission ends, however it ends
struct SendingGuard<'a>(&'a AtomicBool);

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Survey screen engine
///
/// Holds the form being edited and submits it in two fixed steps: append to
/// the local log, then send to the survey service. The steps are independent;
/// a failed send does not roll back the local append, so the log may contain
/// surveys the service never accepted.
pub struct SurveyFormEngine {
    form: Mutex<SurveyForm>,
    sending: AtomicBool,
    local_store: Arc<dyn KeyValueStore>,
    service: Arc<dyn SurveyService>,
}

impl SurveyFormEngine {
    /// Create an engine with an empty form
    ///
    /// # Arguments
    ///
    /// * `local_store` - Store holding the append-only log under `"surveys"`
    /// * `service` - Remote survey service
    pub fn new(local_store: Arc<dyn KeyValueStore>, service: Arc<dyn SurveyService>) -> Self {
        Self {
            form: Mutex::new(SurveyForm::default()),
            sending: AtomicBool::new(false),
            local_store,
            service,
        }
    }

    fn lock_form(&self) -> MutexGuard<'_, SurveyForm> {
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current form
    pub fn form(&self) -> SurveyForm {
        self.lock_form().clone()
    }

    /// Assign one field
    ///
    /// # Errors
    ///
    /// * `SurveyError::DateOfBirthInFuture` - Birth date after today; the
    ///   field keeps its previous value
    pub fn update_field(&self, update: FieldUpdate) -> SurveyResult<()> {
        if let FieldUpdate::DateOfBirth(Some(date)) = update {
            check_birth_date(date, Local::now().date_naive())?;
        }

        self.lock_form().apply(update);
        Ok(())
    }

    /// Select `ai_type`, or deselect it and discard its description
    ///
    /// Returns whether the model is selected afterwards.
    pub fn toggle_ai_model(&self, ai_type: AiType) -> bool {
        let mut form = self.lock_form();

        if form.is_selected(ai_type) {
            form.ai_models.retain(|m| m.ai_type != ai_type);
            false
        } else {
            form.ai_models.push(AiModelEntry::new(ai_type));
            true
        }
    }

    /// Replace the defect description of a selected model
    ///
    /// # Errors
    ///
    /// * `SurveyError::ModelNotSelected` - `ai_type` is not selected
    pub fn update_model_description(&self, ai_type: AiType, text: &str) -> SurveyResult<()> {
        let mut form = self.lock_form();

        let entry = form
            .ai_models
            .iter_mut()
            .find(|m| m.ai_type == ai_type)
            .ok_or(SurveyError::ModelNotSelected(ai_type))?;
        entry.description = text.to_string();

        Ok(())
    }

    /// Validity of the current form
    pub fn is_valid(&self) -> bool {
        compute_validity(&self.lock_form())
    }

    /// Fields keeping the current form from being submitted
    pub fn missing_fields(&self) -> Vec<FormField> {
        missing_fields(&self.lock_form())
    }

    /// Whether a submission is in flight
    pub fn is_sending(&self) -> bool {
        self.sending.load(Ordering::SeqCst)
    }

    /// Clear the form
    pub fn reset(&self) {
        *self.lock_form() = SurveyForm::default();
    }

    /// Submit the current form
    ///
    /// Takes one snapshot of the form, appends it to the local log, then sends
    /// it to the survey service. The form is reset only when the service
    /// answers 200; on any failure it stays populated for a retry.
    ///
    /// # Errors
    ///
    /// * `SurveyError::SubmissionInProgress` - Another call is in flight
    /// * `SurveyError::Incomplete` - Required fields missing; nothing written
    /// * `SurveyError::Rejected` - Non-200 status
    /// * `SurveyError::Transport` - Request failed
    pub async fn submit(&self) -> SurveyResult<SubmissionReceipt> {
        let _guard = self.begin_sending()?;

        let snapshot = self.form();
        let missing = missing_fields(&snapshot);
        if !missing.is_empty() {
            return Err(SurveyError::Incomplete { missing });
        }

        let saved_locally = match self.append_local(&snapshot).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to save survey locally: {}", e);
                false
            }
        };

        let payload = SurveySubmission::from(&snapshot);
        let response = self
            .service
            .submit_survey_result(&payload)
            .await
            .inspect_err(|e| log::error!("Error submitting survey: {}", e))?;

        if response.status != 200 {
            log::error!("Survey service answered with status {}", response.status);
            return Err(SurveyError::Rejected {
                status: response.status,
            });
        }

        self.reset();
        log::info!("Survey submitted (saved locally: {})", saved_locally);

        Ok(SubmissionReceipt {
            status: response.status,
            saved_locally,
        })
    }

    /// Surveys recorded in the local log, oldest first
    ///
    /// A missing key reads as an empty log. Entries that do not parse as a
    /// form are skipped; the rest of the history is still returned.
    pub async fn local_submissions(&self) -> SurveyResult<Vec<SurveyForm>> {
        let Some(json) = self.local_store.get_item(SURVEYS_KEY).await? else {
            return Ok(Vec::new());
        };

        let entries: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        let forms = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                serde_json::from_value(entry)
                    .inspect_err(|e| {
                        log::warn!("Skipping unreadable survey log entry {}: {}", index, e);
                    })
                    .ok()
            })
            .collect();

        Ok(forms)
    }

    fn begin_sending(&self) -> SurveyResult<SendingGuard<'_>> {
        self.sending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| SurveyError::SubmissionInProgress)?;
        Ok(SendingGuard(&self.sending))
    }

    /// Read-modify-write of the local log
    ///
    /// Entries are kept as raw JSON so records this version cannot parse are
    /// carried over untouched. An unreadable log starts over as empty.
    async fn append_local(&self, form: &SurveyForm) -> SurveyResult<()> {
        let mut entries: Vec<serde_json::Value> =
            match self.local_store.get_item(SURVEYS_KEY).await {
                Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                    log::warn!("Local survey log is unreadable, starting a new one: {}", e);
                    Vec::new()
                }),
                Ok(None) => Vec::new(),
                Err(e) => {
                    log::warn!("Failed to read local survey log, starting a new one: {}", e);
                    Vec::new()
                }
            };

        entries.push(serde_json::to_value(form)?);
        let json = serde_json::to_string(&entries)?;
        self.local_store.set_item(SURVEYS_KEY, &json).await?;

        Ok(())
    }
}

fn check_birth_date(date: NaiveDate, today: NaiveDate) -> SurveyResult<()> {
    if date > today {
        return Err(SurveyError::DateOfBirthInFuture(date));
    }
    Ok(())
}
