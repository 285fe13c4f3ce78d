//! Derived validity of a survey form.
//!
//! Validity is never stored: callers recompute it from the current form
//! after every mutation.

use super::models::{FormField, SurveyForm, USE_CASE_MAX_CHARS};
use std::collections::HashSet;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Fields that keep `form` from being submitted, in form order
///
/// Includes models listed more than once, which only a form built outside
/// the engine can contain.
pub fn missing_fields(form: &SurveyForm) -> Vec<FormField> {
    let mut missing = Vec::new();

    if is_blank(&form.name) {
        missing.push(FormField::Name);
    }
    if form.date_of_birth.is_none() {
        missing.push(FormField::DateOfBirth);
    }
    if form.education_level.is_none() {
        missing.push(FormField::EducationLevel);
    }
    if is_blank(&form.city) {
        missing.push(FormField::City);
    }
    if form.gender.is_none() {
        missing.push(FormField::Gender);
    }
    if form.ai_models.is_empty() {
        missing.push(FormField::AiModels);
    }
    let mut seen = HashSet::new();
    for entry in &form.ai_models {
        let duplicate = FormField::DuplicateAiModel(entry.ai_type);
        if !seen.insert(entry.ai_type) && !missing.contains(&duplicate) {
            missing.push(duplicate);
        }
    }
    missing.extend(
        form.ai_models
            .iter()
            .filter(|m| is_blank(&m.description))
            .map(|m| FormField::AiModelDescription(m.ai_type)),
    );
    if is_blank(&form.use_case_of_ai) || form.use_case_of_ai.chars().count() > USE_CASE_MAX_CHARS {
        missing.push(FormField::UseCaseOfAi);
    }

    missing
}

/// Whether `form` may be submitted
pub fn compute_validity(form: &SurveyForm) -> bool {
    missing_fields(form).is_empty()
}

/// Truncate use-case input to [`USE_CASE_MAX_CHARS`] characters
///
/// Applied at the input boundary, like the text field's length cap.
pub fn clamp_use_case(text: &str) -> String {
    text.chars().take(USE_CASE_MAX_CHARS).collect()
}
