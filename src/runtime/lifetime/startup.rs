use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::{ObjectCache, register::get_object_cache_plugin};
use crate::config::AppConfig;
use crate::errors::{CoopError, Result};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::notifications::sender::{LogSender, NotificationSender};
use crate::services::system::DynamicConfig;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::random_code::generate_password;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
    pub sender: Arc<dyn NotificationSender>,
}

async fn build_cache(name: &str) -> Result<Arc<dyn ObjectCache>> {
    let constructor = get_object_cache_plugin(name).ok_or_else(|| {
        CoopError::cache_plugin_not_found(format!("Cache backend '{name}' is not registered"))
    })?;
    Ok(Arc::from(constructor().await?))
}

/// Configured backend, falling back to the in-memory cache.
async fn create_cache() -> Result<Arc<dyn ObjectCache>> {
    let cache_type = AppConfig::get().cache.cache_type.as_str();
    warn!("Attempting to create {} cache backend", cache_type);

    match build_cache(cache_type).await {
        Ok(cache) => {
            warn!("Successfully created {} cache backend", cache_type);
            Ok(cache)
        }
        Err(e) if cache_type != "moka" => {
            warn!("{}; falling back to the Moka in-memory cache", e);
            build_cache("moka").await
        }
        Err(e) => Err(e),
    }
}

/// Loads `system_settings` into the runtime settings cache.
pub async fn init_dynamic_config(storage: &Arc<dyn Storage>) {
    match storage.list_all_settings().await {
        Ok(settings) => {
            DynamicConfig::init(settings.into_iter().map(|s| (s.key, s.value)).collect()).await;
        }
        Err(e) => {
            warn!("Failed to load runtime settings: {}, using static configuration", e);
            DynamicConfig::init(vec![]).await;
        }
    }
}

/// Creates the `admin` account on an empty user table.
///
/// The password comes from `ADMIN_PASSWORD`; otherwise one is generated and
/// logged once.
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("{} user(s) present, skipping admin seed", count);
            return;
        }
        Ok(_) => info!("No users found, creating the default admin account"),
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let generated = generate_password();
        warn!("==========================================================");
        warn!("  ADMIN_PASSWORD not set, generated admin password: {}", generated);
        warn!("  Change it after the first login");
        warn!("==========================================================");
        generated
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = CreateUserRequest {
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password: password_hash,
        user_type: UserRole::Admin,
        full_name: Some("Administrator".to_string()),
        phone: None,
        instructor_id: None,
        member_id: None,
    };

    match storage.create_user(admin).await {
        Ok(user) => info!(
            "Default admin account created (id: {}, username: {})",
            user.id, user.username
        ),
        Err(e) => warn!("Failed to create admin account: {}", e),
    }
}

/// Opens the storage (running migrations) and loads runtime settings.
///
/// Shared by the server and the CLI commands.
pub async fn open_storage() -> Result<Arc<dyn Storage>> {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    init_dynamic_config(&storage).await;
    Ok(storage)
}

pub async fn prepare_server_startup() -> Result<StartupContext> {
    if cfg!(debug_assertions) {
        crate::cache::register::debug_object_cache_registry();
    }

    let storage = open_storage().await?;
    seed_admin(&storage).await;

    let cache = create_cache().await?;
    warn!("Cache backend initialized");

    let sender: Arc<dyn NotificationSender> = Arc::new(LogSender);
    warn!("Notification sender: {}", sender.name());

    Ok(StartupContext {
        storage,
        cache,
        sender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    #[tokio::test]
    async fn test_admin_seeded_once() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);

        seed_admin(&storage).await;
        seed_admin(&storage).await;

        assert_eq!(storage.count_users().await.unwrap(), 1);
        let admin = storage.get_user_by_username("admin").await.unwrap().unwrap();
        assert_eq!(admin.user_type, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_moka_cache_is_registered() {
        assert!(build_cache("moka").await.is_ok());
        assert!(build_cache("no-such-backend").await.is_err());
    }
}
