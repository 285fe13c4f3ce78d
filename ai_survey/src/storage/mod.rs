//! Opaque key-value persistence used by both screens.
//!
//! The login screen keeps the session token and user identity in a secure
//! store; the survey screen keeps its append-only log of past submissions
//! under [`SURVEYS_KEY`]. Both are the same [`KeyValueStore`] seam:
//!
//! - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
//! - [`JsonFileStore`]: a single JSON object on disk, replaced atomically
//!
//! ## Example
//!
//! ```
//! use ai_survey::storage::{KeyValueStore, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!     store.set_item("userToken", "abc123").await?;
//!     assert_eq!(store.get_item("userToken").await?.as_deref(), Some("abc123"));
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod file;
pub mod memory;
pub mod store;

pub use errors::{StorageError, StorageResult};
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use store::KeyValueStore;

/// Key of the local survey submission log
pub const SURVEYS_KEY: &str = "surveys";

/// Secure-store key holding the session token
pub const USER_TOKEN_KEY: &str = "userToken";

/// Secure-store key holding the serialized user identity
pub const USER_INFO_KEY: &str = "userInfo";
