//! Pluggable object cache.
//!
//! Backends register themselves at load time through
//! [`declare_object_cache_plugin!`]; `runtime::startup` picks one by the
//! `cache.type` config key.

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// Registers a cache backend under `$name`. The type must expose
/// `fn new() -> Result<Self, String>`.
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::CoopError::cache_connection)?;
                        Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                    })
                }),
            );
        }
    };
}

/// Key under which an authenticated user is cached, per access token.
pub fn user_key(token: &str) -> String {
    format!("user:{token}")
}

/// Key of the dashboard KPI snapshot.
pub const DASHBOARD_KEY: &str = "dashboard:kpis";

/// Seconds the dashboard snapshot stays fresh.
pub const DASHBOARD_TTL: u64 = 60;
