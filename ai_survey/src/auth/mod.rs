//! Authentication module for the login screen.
//!
//! This module implements:
//! - The email format rule checked before any request is sent
//! - The [`AuthService`] seam to the remote auth endpoint
//! - [`LoginFlow`], which combines the rule, the attempt throttle and
//!   session capture into the secure store
//!
//! Authentication failures are deliberately generic: the screen never learns
//! whether the email or the password was wrong.
//!
//! ## Example
//!
//! ```no_run
//! use ai_survey::auth::{AuthService, LoginFlow};
//! use ai_survey::security::LoginThrottle;
//! use ai_survey::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example(auth: Arc<dyn AuthService>) {
//! let flow = LoginFlow::new(LoginThrottle::new(), auth, Arc::new(MemoryStore::new()));
//!
//! match flow.login("ada@example.com", "secret").await {
//!     Ok(user) => println!("Welcome {}", user.user.username),
//!     Err(e) => println!("{}", e.client_message()),
//! }
//! # }
//! ```

pub mod errors;
pub mod flow;
pub mod models;
pub mod service;
pub mod validation;

pub use errors::{AuthError, AuthResult};
pub use flow::LoginFlow;
pub use models::{AuthenticatedUser, Credentials, LoginData, LoginResponse, UserId, UserInfo};
pub use service::AuthService;
pub use validation::validate_email_format;
