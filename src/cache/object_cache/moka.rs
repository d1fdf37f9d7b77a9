use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// Value plus its TTL in seconds (`0` falls back to the cache-wide TTL).
type Entry = (String, u64);

struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        (value.1 > 0).then(|| Duration::from_secs(value.1))
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_limits(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_limits(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(default_ttl))
            .expire_after(EntryTtl)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default TTL: {}s",
            max_capacity, default_ttl
        );
        Self { inner }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        match self.inner.get(key).await {
            Some((value, _)) => {
                debug!("Cache hit: {}", key);
                CacheResult::Found(value)
            }
            None => {
                debug!("Cache miss: {}", key);
                CacheResult::NotFound
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        self.inner.insert(key, (value, ttl)).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn insert_get_remove() {
        let cache = MokaCacheWrapper::with_limits(100, 3600);
        cache
            .insert_raw("dashboard:kpis".into(), "{}".into(), 0)
            .await;
        assert!(matches!(
            cache.get_raw("dashboard:kpis").await,
            CacheResult::Found(ref v) if v == "{}"
        ));

        cache.remove("dashboard:kpis").await;
        assert!(matches!(
            cache.get_raw("dashboard:kpis").await,
            CacheResult::NotFound
        ));
    }

    #[tokio::test]
    async fn typed_helpers_go_through_json() {
        let cache: Box<dyn ObjectCache> = Box::new(MokaCacheWrapper::with_limits(100, 3600));
        cache
            .insert_json("numbers".into(), &vec![1, 2, 3], 0)
            .await;
        let numbers: Option<Vec<i32>> = cache.get_json("numbers").await;
        assert_eq!(numbers, Some(vec![1, 2, 3]));

        cache.insert_raw("broken".into(), "not json".into(), 0).await;
        let broken: Option<Vec<i32>> = cache.get_json("broken").await;
        assert!(broken.is_none());
    }
}
