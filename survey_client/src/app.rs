//! Both screens wired to the HTTP API and on-disk stores.

use crate::{api_client::ApiClient, config::ClientConfig, logging};
use ai_survey::auth::{AuthError, AuthResult, AuthenticatedUser, LoginFlow};
use ai_survey::security::LoginThrottle;
use ai_survey::storage::JsonFileStore;
use ai_survey::survey::SurveyFormEngine;
use anyhow::Result;
use std::sync::Arc;

/// Login flow and survey engine sharing one API client
///
/// The two halves share no state beyond the HTTP client. Session secrets and
/// the survey log live in separate files.
pub struct SurveyApp {
    api: Arc<ApiClient>,
    login: LoginFlow,
    survey: SurveyFormEngine,
}

impl SurveyApp {
    /// Build the app from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let api = Arc::new(ApiClient::from_config(config)?);
        let secure_store = Arc::new(JsonFileStore::new(config.secure_store_path.clone()));
        let local_store = Arc::new(JsonFileStore::new(config.store_path.clone()));

        tracing::info!(
            api = %api.base_url(),
            store = %config.store_path.display(),
            "Survey client ready"
        );

        Ok(Self {
            login: LoginFlow::new(
                LoginThrottle::with_config(config.throttle),
                api.clone(),
                secure_store,
            ),
            survey: SurveyFormEngine::new(local_store, api.clone()),
            api,
        })
    }

    /// API client used by both screens
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Login screen
    pub fn login_flow(&self) -> &LoginFlow {
        &self.login
    }

    /// Survey screen
    pub fn survey(&self) -> &SurveyFormEngine {
        &self.survey
    }

    /// Log in, recording rejected emails and throttle changes as security events
    ///
    /// # Errors
    ///
    /// Same as [`LoginFlow::login`]
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthenticatedUser> {
        let result = self.login.login(email, password).await;

        match &result {
            Err(AuthError::InvalidEmailFormat) => {
                logging::log_security_event("invalid_email", None, "Rejected before sending");
            }
            Err(AuthError::InvalidCredentials) => {
                logging::log_throttle_state(Some(email), &self.login.attempt_state());
            }
            Err(AuthError::Blocked { remaining_secs }) => {
                tracing::debug!(remaining_secs, "Login attempted during cooldown");
            }
            _ => {}
        }

        result
    }
}
