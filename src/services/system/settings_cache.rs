//! Runtime settings cache.
//!
//! Values come from the `system_settings` table at startup and are replaced
//! in place whenever an administrator edits a key. Every accessor falls back
//! to the static configuration when the key is missing or unparsable.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::OnceLock;
use tokio::sync::RwLock;

use crate::config::AppConfig;

static DYNAMIC_CONFIG: OnceLock<RwLock<DynamicConfigCache>> = OnceLock::new();

#[derive(Debug, Default)]
struct DynamicConfigCache {
    settings: HashMap<String, String>,
    initialized: bool,
}

pub struct DynamicConfig;

impl DynamicConfig {
    /// Replaces the whole cache, called once the database is reachable.
    pub async fn init(settings: Vec<(String, String)>) {
        let cache = DYNAMIC_CONFIG.get_or_init(|| RwLock::new(DynamicConfigCache::default()));

        let mut guard = cache.write().await;
        guard.settings.clear();
        guard.settings.extend(settings);
        guard.initialized = true;

        tracing::info!(
            "Runtime settings loaded: {} entries",
            guard.settings.len()
        );
    }

    pub async fn update(key: &str, value: &str) {
        if let Some(cache) = DYNAMIC_CONFIG.get() {
            let mut guard = cache.write().await;
            guard.settings.insert(key.to_string(), value.to_string());
            tracing::debug!("Runtime setting updated: {} = {}", key, value);
        }
    }

    async fn get_string(key: &str) -> Option<String> {
        let cache = DYNAMIC_CONFIG.get()?;
        let guard = cache.read().await;
        guard.settings.get(key).cloned()
    }

    async fn get_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
        Self::get_string(key)
            .await
            .and_then(|v| v.trim().parse().ok())
    }

    async fn get_json<T: DeserializeOwned>(key: &str) -> Option<T> {
        Self::get_string(key)
            .await
            .and_then(|v| serde_json::from_str(&v).ok())
    }

    pub async fn system_name() -> String {
        AppConfig::get().app.system_name.clone()
    }

    pub async fn cooperative_name() -> String {
        Self::get_string("cooperative.name")
            .await
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| AppConfig::get().cooperative.name.clone())
    }

    pub async fn cooperative_address() -> String {
        Self::get_string("cooperative.address")
            .await
            .unwrap_or_else(|| AppConfig::get().cooperative.address.clone())
    }

    pub async fn cooperative_phone() -> String {
        Self::get_string("cooperative.phone")
            .await
            .unwrap_or_else(|| AppConfig::get().cooperative.phone.clone())
    }

    pub async fn cooperative_email() -> String {
        Self::get_string("cooperative.email")
            .await
            .unwrap_or_else(|| AppConfig::get().cooperative.email.clone())
    }

    /// Label appended to amounts in documents and messages
    pub async fn currency() -> String {
        Self::get_string("finance.currency")
            .await
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| AppConfig::get().cooperative.currency.clone())
    }

    /// Percent applied to instructors created without an explicit rate
    pub async fn default_tax_rate() -> Decimal {
        Self::get_parsed("finance.default_tax_rate")
            .await
            .unwrap_or(AppConfig::get().finance.default_tax_rate)
    }

    pub async fn retained_earnings_percentage() -> Decimal {
        Self::get_parsed("finance.retained_earnings_percentage")
            .await
            .unwrap_or(AppConfig::get().finance.retained_earnings_percentage)
    }

    /// Minutes
    pub async fn access_token_expiry() -> i64 {
        Self::get_parsed("jwt.access_token_expiry")
            .await
            .unwrap_or(AppConfig::get().jwt.access_token_expiry)
    }

    /// Days
    pub async fn refresh_token_expiry() -> i64 {
        Self::get_parsed("jwt.refresh_token_expiry")
            .await
            .unwrap_or(AppConfig::get().jwt.refresh_token_expiry)
    }

    pub async fn refresh_token_remember_me_expiry() -> i64 {
        AppConfig::get().jwt.refresh_token_remember_me_expiry
    }

    /// Days before the due date on which a reminder goes out
    pub async fn reminder_payment_days() -> Vec<i64> {
        Self::get_json("reminders.payment_days")
            .await
            .unwrap_or_else(|| AppConfig::get().reminders.payment_days.clone())
    }

    /// Days after the due date on which an overdue notice goes out
    pub async fn reminder_overdue_days() -> Vec<i64> {
        Self::get_json("reminders.overdue_days")
            .await
            .unwrap_or_else(|| AppConfig::get().reminders.overdue_days.clone())
    }

    pub async fn is_initialized() -> bool {
        match DYNAMIC_CONFIG.get() {
            Some(cache) => cache.read().await.initialized,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_override_static_config() {
        DynamicConfig::init(vec![
            ("finance.currency".to_string(), "MAD".to_string()),
            ("finance.default_tax_rate".to_string(), "12.5".to_string()),
            ("reminders.payment_days".to_string(), "[5, 2]".to_string()),
            ("reminders.overdue_days".to_string(), "not json".to_string()),
        ])
        .await;
        assert!(DynamicConfig::is_initialized().await);

        assert_eq!(DynamicConfig::currency().await, "MAD");
        assert_eq!(DynamicConfig::default_tax_rate().await, Decimal::new(125, 1));
        assert_eq!(DynamicConfig::reminder_payment_days().await, vec![5, 2]);
        // unparsable values fall back
        assert_eq!(
            DynamicConfig::reminder_overdue_days().await,
            AppConfig::get().reminders.overdue_days
        );

        DynamicConfig::update("finance.default_tax_rate", "15").await;
        assert_eq!(DynamicConfig::default_tax_rate().await, Decimal::from(15));
    }
}
