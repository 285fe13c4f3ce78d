//! Login screen flow: format check, throttle, auth call, session capture.

use super::{
    errors::{AuthError, AuthResult},
    models::{AuthenticatedUser, Credentials},
    service::AuthService,
    validation::validate_email_format,
};
use crate::{
    security::{LoginAttemptState, LoginThrottle},
    storage::{KeyValueStore, USER_INFO_KEY, USER_TOKEN_KEY},
};
use std::sync::Arc;

/// Drives one login screen
///
/// Owns the screen's [`LoginThrottle`]; dropping the flow stops any running
/// cooldown.
pub struct LoginFlow {
    throttle: LoginThrottle,
    auth: Arc<dyn AuthService>,
    secure_store: Arc<dyn KeyValueStore>,
}

impl LoginFlow {
    /// Create a login flow
    ///
    /// # Arguments
    ///
    /// * `throttle` - Attempt throttle owned by this screen
    /// * `auth` - Remote auth service
    /// * `secure_store` - Store receiving `userToken` and `userInfo`
    pub fn new(
        throttle: LoginThrottle,
        auth: Arc<dyn AuthService>,
        secure_store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            throttle,
            auth,
            secure_store,
        }
    }

    /// Throttle backing this screen
    pub fn throttle(&self) -> &LoginThrottle {
        &self.throttle
    }

    /// Current throttle state, for rendering the login button
    pub fn attempt_state(&self) -> LoginAttemptState {
        self.throttle.state()
    }

    /// Attempt a login
    ///
    /// # Errors
    ///
    /// * `AuthError::Blocked` - Cooldown running; nothing sent
    /// * `AuthError::InvalidEmailFormat` - Email rejected locally; not counted
    /// * `AuthError::InvalidCredentials` - Any non-200 response; counted
    /// * `AuthError::Transport` - Request failed; not counted
    /// * `AuthError::Storage` - Session could not be persisted; not counted
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<AuthenticatedUser> {
        let state = self.throttle.state();
        if state.blocked {
            return Err(AuthError::Blocked {
                remaining_secs: state.remaining_seconds,
            });
        }

        if !validate_email_format(email) {
            return Err(AuthError::InvalidEmailFormat);
        }

        let credentials = Credentials::new(email, password);
        match self.authenticate(&credentials).await {
            Ok(user) => {
                self.throttle.record_attempt(true);
                log::info!("User {} logged in", user.user.id);
                Ok(user)
            }
            Err(e) => {
                if e.counts_as_attempt() {
                    let state = self.throttle.record_attempt(false);
                    log::warn!("Login rejected (attempt {})", state.attempt_count);
                } else {
                    log::error!("Login failed: {}", e);
                }
                Err(e)
            }
        }
    }

    /// Auth call and session capture, without touching the throttle
    async fn authenticate(&self, credentials: &Credentials) -> AuthResult<AuthenticatedUser> {
        let response = self.auth.login(credentials).await?;

        let status = response.status;
        let Some(data) = response.into_session() else {
            log::debug!("Auth service answered with status {}", status);
            return Err(AuthError::InvalidCredentials);
        };

        let user = AuthenticatedUser::from(data);
        self.persist_session(&user).await?;
        Ok(user)
    }

    async fn persist_session(&self, user: &AuthenticatedUser) -> AuthResult<()> {
        let user_info = serde_json::to_string(&user.user)?;

        self.secure_store
            .set_item(USER_TOKEN_KEY, &user.token)
            .await
            .inspect_err(|e| log::error!("Failed to store session token: {}", e))?;
        self.secure_store
            .set_item(USER_INFO_KEY, &user_info)
            .await
            .inspect_err(|e| log::error!("Failed to store user info: {}", e))?;

        Ok(())
    }
}
