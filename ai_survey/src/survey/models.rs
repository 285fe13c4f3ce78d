//! Survey form data models and wire formats.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Maximum length of the "beneficial AI use cases" answer, in characters
pub const USE_CASE_MAX_CHARS: usize = 300;

/// AI assistants the survey asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AiType {
    #[serde(rename = "chatGPT")]
    ChatGpt,
    #[serde(rename = "bard")]
    Bard,
    #[serde(rename = "claude")]
    Claude,
    #[serde(rename = "copilot")]
    Copilot,
    #[serde(rename = "deepSeek")]
    DeepSeek,
}

impl AiType {
    /// All choices in display order
    pub const ALL: [AiType; 5] = [
        AiType::ChatGpt,
        AiType::Bard,
        AiType::Claude,
        AiType::Copilot,
        AiType::DeepSeek,
    ];

    /// Wire name, also used as the checkbox title
    pub fn as_str(&self) -> &'static str {
        match self {
            AiType::ChatGpt => "chatGPT",
            AiType::Bard => "bard",
            AiType::Claude => "claude",
            AiType::Copilot => "copilot",
            AiType::DeepSeek => "deepSeek",
        }
    }
}

impl fmt::Display for AiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Highest completed education level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "Primary School")]
    PrimarySchool,
    #[serde(rename = "High School")]
    HighSchool,
    #[serde(rename = "Bachelor Degree")]
    BachelorDegree,
    #[serde(rename = "Master Degree")]
    MasterDegree,
    #[serde(rename = "PhD")]
    PhD,
    #[serde(rename = "Other")]
    Other,
}

impl EducationLevel {
    /// All choices in display order
    pub const ALL: [EducationLevel; 6] = [
        EducationLevel::PrimarySchool,
        EducationLevel::HighSchool,
        EducationLevel::BachelorDegree,
        EducationLevel::MasterDegree,
        EducationLevel::PhD,
        EducationLevel::Other,
    ];

    /// Human label, identical to the wire value
    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::PrimarySchool => "Primary School",
            EducationLevel::HighSchool => "High School",
            EducationLevel::BachelorDegree => "Bachelor Degree",
            EducationLevel::MasterDegree => "Master Degree",
            EducationLevel::PhD => "PhD",
            EducationLevel::Other => "Other",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// All choices in display order
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];
}

/// One selected AI model and the defects the respondent describes for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModelEntry {
    pub ai_type: AiType,
    pub description: String,
}

impl AiModelEntry {
    /// Freshly selected entry with an empty description
    pub fn new(ai_type: AiType) -> Self {
        Self {
            ai_type,
            description: String::new(),
        }
    }
}

/// Survey form as edited on screen and stored in the local log
///
/// Unknown or missing keys in stored entries fall back to empty values, so
/// older log entries still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurveyForm {
    pub name: String,
    pub surname: String,
    /// Also read from full RFC 3339 timestamps written by older clients
    #[serde(deserialize_with = "date_or_timestamp")]
    pub date_of_birth: Option<NaiveDate>,
    pub education_level: Option<EducationLevel>,
    pub city: String,
    pub gender: Option<Gender>,

    /// Selected models in selection order; at most one entry per type
    #[serde(rename = "aiModel")]
    pub ai_models: Vec<AiModelEntry>,

    pub use_case_of_ai: String,
}

impl SurveyForm {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `ai_type`, if selected
    pub fn ai_model(&self, ai_type: AiType) -> Option<&AiModelEntry> {
        self.ai_models.iter().find(|m| m.ai_type == ai_type)
    }

    /// Whether `ai_type` is selected
    pub fn is_selected(&self, ai_type: AiType) -> bool {
        self.ai_model(ai_type).is_some()
    }

    /// Assign a single field
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Name(value) => self.name = value,
            FieldUpdate::Surname(value) => self.surname = value,
            FieldUpdate::DateOfBirth(value) => self.date_of_birth = value,
            FieldUpdate::EducationLevel(value) => self.education_level = value,
            FieldUpdate::City(value) => self.city = value,
            FieldUpdate::Gender(value) => self.gender = value,
            FieldUpdate::UseCaseOfAi(value) => self.use_case_of_ai = value,
        }
    }
}

/// `YYYY-MM-DD`, or the date part of an RFC 3339 timestamp
fn date_or_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(|e| serde::de::Error::custom(format!("invalid date {raw:?}: {e}")))
}

/// A single scalar field assignment
///
/// Model selection and descriptions are edited through dedicated engine
/// operations instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Surname(String),
    DateOfBirth(Option<NaiveDate>),
    EducationLevel(Option<EducationLevel>),
    City(String),
    Gender(Option<Gender>),
    UseCaseOfAi(String),
}

/// Fields that take part in the validity rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    DateOfBirth,
    EducationLevel,
    City,
    Gender,

    /// No model selected
    AiModels,

    /// Selected model without a description
    AiModelDescription(AiType),

    /// Model listed more than once
    DuplicateAiModel(AiType),

    /// Blank, or longer than [`USE_CASE_MAX_CHARS`]
    UseCaseOfAi,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormField::Name => f.write_str("name"),
            FormField::DateOfBirth => f.write_str("birth date"),
            FormField::EducationLevel => f.write_str("education level"),
            FormField::City => f.write_str("city"),
            FormField::Gender => f.write_str("gender"),
            FormField::AiModels => f.write_str("AI models"),
            FormField::AiModelDescription(ai_type) => write!(f, "{ai_type} defects"),
            FormField::DuplicateAiModel(ai_type) => write!(f, "{ai_type} selected twice"),
            FormField::UseCaseOfAi => f.write_str("AI use cases"),
        }
    }
}

/// Model entry as sent to the survey service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiModelPayload {
    pub ai_type: AiType,
    pub description: String,
}

/// Body of a survey submission
///
/// The full form with each model entry reduced to its type and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub name: String,
    pub surname: String,
    pub date_of_birth: Option<NaiveDate>,
    pub education_level: Option<EducationLevel>,
    pub city: String,
    pub gender: Option<Gender>,
    pub ai_model: Vec<AiModelPayload>,
    pub use_case_of_ai: String,
}

impl From<&SurveyForm> for SurveySubmission {
    fn from(form: &SurveyForm) -> Self {
        Self {
            name: form.name.clone(),
            surname: form.surname.clone(),
            date_of_birth: form.date_of_birth,
            education_level: form.education_level,
            city: form.city.clone(),
            gender: form.gender,
            ai_model: form
                .ai_models
                .iter()
                .map(|m| AiModelPayload {
                    ai_type: m.ai_type,
                    description: m.description.clone(),
                })
                .collect(),
            use_case_of_ai: form.use_case_of_ai.clone(),
        }
    }
}

/// Survey service answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub status: u16,
}

/// Successful submission summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Status returned by the survey service
    pub status: u16,

    /// Whether the local log append succeeded
    pub saved_locally: bool,
}
