use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tracing::{debug, error, warn};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("redis", RedisObjectCache);

/// Shared cache for multi-instance deployments. Keys are namespaced with
/// `cache.redis.key_prefix` so one Redis database can serve several sites.
pub struct RedisObjectCache {
    client: redis::Client,
    key_prefix: String,
    default_ttl: u64,
}

impl RedisObjectCache {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        let redis = &config.cache.redis;

        let client = redis::Client::open(redis.url.as_str())
            .map_err(|e| format!("Invalid Redis URL '{}': {e}", redis.url))?;
        Self::ping(&client).map_err(|e| {
            error!("Redis at {} is unreachable: {}", redis.url, e);
            format!("Redis ping failed: {e}")
        })?;

        debug!(
            "Redis cache ready (prefix '{}', ttl {}s)",
            redis.key_prefix, config.cache.default_ttl
        );
        Ok(Self {
            client,
            key_prefix: redis.key_prefix.clone(),
            default_ttl: config.cache.default_ttl,
        })
    }

    fn ping(client: &redis::Client) -> redis::RedisResult<String> {
        let mut conn = client.get_connection()?;
        redis::cmd("PING").query(&mut conn)
    }

    async fn connection(&self) -> Option<MultiplexedConnection> {
        match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!("Redis connection failed: {}", e);
                None
            }
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl ObjectCache for RedisObjectCache {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let Some(mut conn) = self.connection().await else {
            return CacheResult::ExistsButNoValue;
        };

        match conn.get::<_, Option<String>>(self.namespaced(key)).await {
            Ok(Some(data)) => CacheResult::Found(data),
            Ok(None) => CacheResult::NotFound,
            Err(e) => {
                error!("Redis GET {} failed: {}", key, e);
                CacheResult::ExistsButNoValue
            }
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let ttl = if ttl == 0 { self.default_ttl } else { ttl };
        if let Err(e) = conn
            .set_ex::<_, _, ()>(self.namespaced(&key), value, ttl)
            .await
        {
            error!("Redis SET {} failed: {}", key, e);
        }
    }

    async fn remove(&self, key: &str) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        if let Err(e) = conn.del::<_, i64>(self.namespaced(key)).await {
            error!("Redis DEL {} failed: {}", key, e);
        }
    }

    async fn invalidate_all(&self) {
        let Some(mut conn) = self.connection().await else {
            return;
        };

        let pattern = format!("{}*", self.key_prefix);
        let keys: Vec<String> = match conn.keys(&pattern).await {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Redis KEYS {} failed: {}", pattern, e);
                return;
            }
        };
        if keys.is_empty() {
            return;
        }

        match conn.del::<_, i64>(keys).await {
            Ok(count) => debug!("Dropped {} cached entries", count),
            Err(e) => error!("Redis cache flush failed: {}", e),
        }
    }
}
