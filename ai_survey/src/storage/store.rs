//! Key-value store trait.

use super::errors::StorageResult;
use async_trait::async_trait;

/// Opaque string key-value persistence
///
/// Mirrors the `getItem` / `setItem` contract of on-device storage: values
/// are strings, a missing key reads as `None`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing an absent key is not an error
    async fn remove_item(&self, key: &str) -> StorageResult<()>;
}
