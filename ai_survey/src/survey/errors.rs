//! Survey error types.

use super::models::{AiType, FormField};
use crate::storage::StorageError;
use chrono::NaiveDate;
use thiserror::Error;

/// Survey form errors
#[derive(Debug, Error)]
pub enum SurveyError {
    /// Submission attempted with required fields missing
    #[error("Survey incomplete: missing {}", join_fields(.missing))]
    Incomplete { missing: Vec<FormField> },

    /// Description edited for a model that is not selected
    #[error("AI model {0} is not selected")]
    ModelNotSelected(AiType),

    /// Birth date after today
    #[error("Birth date {0} is in the future")]
    DateOfBirthInFuture(NaiveDate),

    /// Another submission is still in flight
    #[error("A survey submission is already in progress")]
    SubmissionInProgress,

    /// Survey service answered with a non-200 status
    #[error("Survey service rejected the submission with status {status}")]
    Rejected { status: u16 },

    /// Request could not be delivered or its response read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Local store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Local log could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn join_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl SurveyError {
    /// Get a message safe to show in the failure alert
    pub fn client_message(&self) -> String {
        match self {
            SurveyError::Rejected { .. }
            | SurveyError::Transport(_)
            | SurveyError::Storage(_)
            | SurveyError::Serialization(_) => "Failed to submit survey".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for survey operations
pub type SurveyResult<T> = Result<T, SurveyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_lists_fields() {
        let err = SurveyError::Incomplete {
            missing: vec![FormField::City, FormField::AiModelDescription(AiType::Bard)],
        };
        assert_eq!(err.to_string(), "Survey incomplete: missing city, bard defects");
    }

    #[test]
    fn test_submission_failures_share_one_message() {
        assert_eq!(
            SurveyError::Rejected { status: 500 }.client_message(),
            "Failed to submit survey"
        );
        assert_eq!(
            SurveyError::Transport("timeout".to_string()).client_message(),
            "Failed to submit survey"
        );
    }
}
