use async_trait::async_trait;

use crate::domain::errors::CacheError;

/// Durable key-value blob storage that survives restarts.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read the blob stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(blob))` if present
    /// * `Ok(None)` if nothing was ever stored
    /// * `Err(CacheError)` on I/O failure
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Replace the blob stored under `key`.
    async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;
}
