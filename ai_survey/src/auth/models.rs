//! Authentication data models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier as issued by the auth service
///
/// Services differ on whether ids are numbers or strings; both are kept
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{id}"),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

/// Login request body
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Raw auth service response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// HTTP status; only 200 is a successful login
    pub status: u16,

    /// Session payload, present on success
    pub data: Option<LoginData>,
}

impl LoginResponse {
    /// Session payload if this response is a successful login
    pub fn into_session(self) -> Option<LoginData> {
        if self.status == 200 { self.data } else { None }
    }
}

/// Session payload returned by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub username: String,
    pub email: String,
    pub id: UserId,
}

/// User identity persisted under `userInfo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    pub email: String,
    pub id: UserId,
}

/// Outcome of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub token: String,
    pub user: UserInfo,
}

impl From<LoginData> for AuthenticatedUser {
    fn from(data: LoginData) -> Self {
        Self {
            token: data.token,
            user: UserInfo {
                username: data.username,
                email: data.email,
                id: data.id,
            },
        }
    }
}
