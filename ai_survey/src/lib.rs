//! # AI Survey
//!
//! Core of a two-screen survey client: sign-in with brute-force throttling,
//! and a survey form with client-side validation, local persistence and
//! remote submission.
//!
//! ## Architecture
//!
//! The two screens share no runtime state:
//!
//! - **Login**: [`auth::LoginFlow`] checks the email format, asks the
//!   [`auth::AuthService`], feeds the outcome to a
//!   [`security::LoginThrottle`] and stores the session on success. Five
//!   failures block the screen for a ten-second countdown.
//! - **Survey**: [`survey::SurveyFormEngine`] edits the form, derives its
//!   validity after every change and submits it to the local log and then to
//!   the [`survey::SurveyService`].
//!
//! Remote services and on-device storage are traits; the `survey_client`
//! crate provides the HTTP implementations.
//!
//! ## Core Modules
//!
//! - [`auth`]: Credentials, email rule, login flow
//! - [`security`]: Failed-login throttle
//! - [`survey`]: Form model, validity, submission engine
//! - [`storage`]: Key-value persistence

pub mod auth;
pub mod security;
pub mod storage;
pub mod survey;

pub use auth::{AuthError, AuthService, LoginFlow, validate_email_format};
pub use security::{LoginAttemptState, LoginThrottle, ThrottleConfig};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use survey::{SurveyError, SurveyForm, SurveyFormEngine, SurveyService, compute_validity};
