//! Survey module: form model, derived validity and submission.
//!
//! This module implements:
//! - The survey form and its wire formats
//! - [`compute_validity`], a pure rule recomputed after every edit
//! - [`SurveyFormEngine`], which edits the form and submits it by appending
//!   to the local log and then calling the [`SurveyService`]
//!
//! ## Example
//!
//! ```no_run
//! use ai_survey::storage::MemoryStore;
//! use ai_survey::survey::{AiType, FieldUpdate, SurveyFormEngine, SurveyService};
//! use std::sync::Arc;
//!
//! # async fn example(service: Arc<dyn SurveyService>) {
//! let engine = SurveyFormEngine::new(Arc::new(MemoryStore::new()), service);
//!
//! engine.update_field(FieldUpdate::Name("Ada".to_string())).unwrap();
//! engine.toggle_ai_model(AiType::Claude);
//! engine.update_model_description(AiType::Claude, "Too verbose").unwrap();
//!
//! if engine.is_valid() {
//!     match engine.submit().await {
//!         Ok(_) => println!("Survey submitted successfully!"),
//!         Err(e) => println!("{}", e.client_message()),
//!     }
//! }
//! # }
//! ```

pub mod engine;
pub mod errors;
pub mod models;
pub mod service;
pub mod validity;

pub use engine::SurveyFormEngine;
pub use errors::{SurveyError, SurveyResult};
pub use models::{
    AiModelEntry, AiModelPayload, AiType, EducationLevel, FieldUpdate, FormField, Gender,
    SubmissionReceipt, SubmitResponse, SurveyForm, SurveySubmission, USE_CASE_MAX_CHARS,
};
pub use service::SurveyService;
pub use validity::{clamp_use_case, compute_validity, missing_fields};
