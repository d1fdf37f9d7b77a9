//! Runtime settings and their audit trail.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

use crate::entity::{system_settings, system_settings_audit};
use crate::errors::{CoopError, Result};
use crate::models::{
    PaginatedResponse, page_params,
    system::{
        entities::{SettingAudit, SystemSetting},
        requests::SettingAuditQuery,
    },
};

use super::{SeaOrmStorage, db_error, now_ts};

impl SeaOrmStorage {
    pub async fn list_all_settings_impl(&self) -> Result<Vec<SystemSetting>> {
        let settings = system_settings::Entity::find()
            .order_by_asc(system_settings::Column::Key)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list settings"))?;

        Ok(settings.into_iter().map(|s| s.into_setting()).collect())
    }

    pub async fn get_setting_by_key_impl(&self, key: &str) -> Result<Option<SystemSetting>> {
        let setting = system_settings::Entity::find_by_id(key.to_string())
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load setting"))?;

        Ok(setting.map(|s| s.into_setting()))
    }

    /// Stores a new value and writes the audit row in the same transaction.
    pub async fn update_setting_impl(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        let now = now_ts();
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start setting update"))?;

        let existing = system_settings::Entity::find_by_id(key.to_string())
            .one(&txn)
            .await
            .map_err(db_error("Failed to load setting"))?
            .ok_or_else(|| CoopError::not_found(format!("Setting not found: {key}")))?;

        let old_value = existing.value.clone();

        let mut model = existing.into_active_model();
        model.value = Set(value.to_string());
        model.updated_at = Set(now);
        model.updated_by = Set(Some(user_id));

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to update setting"))?;

        system_settings_audit::ActiveModel {
            setting_key: Set(key.to_string()),
            old_value: Set(Some(old_value)),
            new_value: Set(value.to_string()),
            changed_by: Set(user_id),
            changed_at: Set(now),
            ip_address: Set(ip_address),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to write setting audit"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit setting update"))?;

        Ok(updated.into_setting())
    }

    pub async fn list_setting_audits_impl(
        &self,
        query: SettingAuditQuery,
    ) -> Result<PaginatedResponse<SettingAudit>> {
        use system_settings_audit::Column as A;

        let (page, size) = page_params(query.page, query.size);

        let mut select = system_settings_audit::Entity::find();
        if let Some(key) = &query.key {
            select = select.filter(A::SettingKey.eq(key));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(A::ChangedAt).order_by_desc(A::Id),
                page,
                size,
                "Failed to list setting audits",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|a| a.into_audit()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    #[tokio::test]
    async fn test_update_writes_audit() {
        let storage = memory_storage().await;
        let before = storage
            .get_setting_by_key_impl("finance.currency")
            .await
            .unwrap()
            .unwrap();

        let updated = storage
            .update_setting_impl("finance.currency", "EUR", 1, Some("127.0.0.1".into()))
            .await
            .unwrap();
        assert_eq!(updated.value, "EUR");
        assert_eq!(updated.updated_by, Some(1));

        let audits = storage
            .list_setting_audits_impl(SettingAuditQuery {
                key: Some("finance.currency".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(audits.items.len(), 1);
        assert_eq!(audits.items[0].old_value.as_deref(), Some(before.value.as_str()));
        assert_eq!(audits.items[0].new_value, "EUR");
    }

    #[tokio::test]
    async fn test_unknown_key_is_not_found() {
        let storage = memory_storage().await;
        let result = storage.update_setting_impl("nope", "1", 1, None).await;
        assert!(matches!(result, Err(CoopError::NotFound(_))));
    }
}
