use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// The backend answered but the value could not be read.
    ExistsButNoValue,
}

impl<T> CacheResult<T> {
    pub fn found(self) -> Option<T> {
        match self {
            CacheResult::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// String-valued key/value cache shared by every backend.
///
/// `ttl` is in seconds; `0` means the backend default.
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

impl dyn ObjectCache {
    /// Reads and deserializes a JSON value. Undecodable entries count as misses.
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key).await.found()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Dropping undecodable cache entry '{}': {}", key, e);
                self.remove(key).await;
                None
            }
        }
    }

    pub async fn insert_json<T: Serialize>(&self, key: String, value: &T, ttl: u64) {
        match serde_json::to_string(value) {
            Ok(raw) => self.insert_raw(key, raw, ttl).await,
            Err(e) => tracing::error!("Failed to serialize cache entry '{}': {}", key, e),
        }
    }
}
