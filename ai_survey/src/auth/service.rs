//! Auth service seam.

use super::{errors::AuthResult, models::{Credentials, LoginResponse}};
use async_trait::async_trait;

/// Remote authentication endpoint
///
/// Implementations return the status verbatim; only failures to deliver the
/// request or read the response are errors ([`super::AuthError::Transport`]).
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Submit credentials
    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse>;
}
