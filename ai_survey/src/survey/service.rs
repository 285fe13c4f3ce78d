//! Survey service seam.

use super::{
    errors::SurveyResult,
    models::{SubmitResponse, SurveySubmission},
};
use async_trait::async_trait;

/// Remote survey submission endpoint
///
/// Implementations return the status verbatim; only failures to deliver the
/// request are errors ([`super::SurveyError::Transport`]).
#[async_trait]
pub trait SurveyService: Send + Sync {
    /// Send one completed survey
    async fn submit_survey_result(&self, payload: &SurveySubmission)
    -> SurveyResult<SubmitResponse>;
}
