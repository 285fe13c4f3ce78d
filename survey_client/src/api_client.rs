//! HTTP API client for the auth and survey services.

use crate::config::ClientConfig;
use ai_survey::auth::{AuthError, AuthResult, AuthService, Credentials, LoginData, LoginResponse};
use ai_survey::survey::{SubmitResponse, SurveyError, SurveyResult, SurveyService, SurveySubmission};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Login endpoint, relative to the base URL
pub const LOGIN_PATH: &str = "/auth/login";

/// Survey submission endpoint, relative to the base URL
pub const SURVEY_PATH: &str = "/survey";

/// API client for communicating with the survey backend
///
/// Status codes are passed through untouched; only failures to reach the
/// server or to read a 200 body become errors.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client honoring the configured base URL and timeout
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
    }

    async fn login_request(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let response = self
            .post_json(LOGIN_PATH, credentials)
            .await
            .context("Failed to send login request")?;

        let status = response.status().as_u16();
        if status != 200 {
            return Ok(LoginResponse { status, data: None });
        }

        let data: LoginData = response
            .json()
            .await
            .context("Failed to parse login response")?;

        Ok(LoginResponse {
            status,
            data: Some(data),
        })
    }

    async fn survey_request(&self, payload: &SurveySubmission) -> Result<SubmitResponse> {
        let response = self
            .post_json(SURVEY_PATH, payload)
            .await
            .context("Failed to send survey")?;

        Ok(SubmitResponse {
            status: response.status().as_u16(),
        })
    }
}

#[async_trait]
impl AuthService for ApiClient {
    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse> {
        self.login_request(credentials)
            .await
            .map_err(|e| AuthError::Transport(format!("{e:#}")))
    }
}

#[async_trait]
impl SurveyService for ApiClient {
    async fn submit_survey_result(
        &self,
        payload: &SurveySubmission,
    ) -> SurveyResult<SubmitResponse> {
        self.survey_request(payload)
            .await
            .map_err(|e| SurveyError::Transport(format!("{e:#}")))
    }
}
