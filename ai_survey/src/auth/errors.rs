//! Authentication error types.

use crate::storage::StorageError;
use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed the format rule; no request was sent
    #[error("Email format is incorrect. Email must contain one '@', characters before '@' and after '@'.")]
    InvalidEmailFormat,

    /// Server rejected the credentials (any non-200 status)
    #[error("Login failed. Wrong email or password.")]
    InvalidCredentials,

    /// Login disabled during the cooldown
    #[error("Try again in {remaining_secs} seconds")]
    Blocked { remaining_secs: u32 },

    /// Request could not be delivered or its response read
    #[error("Transport error: {0}")]
    Transport(String),

    /// Secure store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Session data could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AuthError {
    /// Get a message safe to show on the login screen
    ///
    /// Transport and storage details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Transport(_) | AuthError::Storage(_) | AuthError::Serialization(_) => {
                "Login failed".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Whether this outcome counts toward the throttle
    pub fn counts_as_attempt(&self) -> bool {
        matches!(self, AuthError::InvalidCredentials)
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
