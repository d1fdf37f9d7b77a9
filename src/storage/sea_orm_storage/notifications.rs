//! Outbound notification queue and message templates.

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::notification_templates;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{CoopError, Result};
use crate::models::{
    PaginatedResponse, page_params,
    notifications::{
        entities::{NewNotification, Notification, NotificationStatus, NotificationTemplate},
        requests::{
            CreateTemplateRequest, NotificationListQuery, TemplateListQuery,
            UpdateNotificationRequest, UpdateTemplateRequest,
        },
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

impl SeaOrmStorage {
    pub async fn create_notification_impl(&self, new: NewNotification) -> Result<Notification> {
        let now = now_ts();

        let model = ActiveModel {
            notification_type: Set(new.notification_type.to_string()),
            channel: Set(new.channel.to_string()),
            recipient_type: Set(new.recipient_type.to_string()),
            recipient_id: Set(new.recipient_id),
            recipient_contact: Set(new.recipient_contact),
            subject: Set(new.subject),
            message: Set(new.message),
            status: Set(NotificationStatus::Pending.to_string()),
            scheduled_time: Set(new.scheduled_time.map(|t| t.timestamp())),
            delivery_attempts: Set(0),
            related_payment_id: Set(new.related_payment_id),
            reminder_key: Set(new.reminder_key),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to queue notification"))?;

        Ok(model.into_notification())
    }

    /// Queues `new` unless a notification with the same reminder key exists.
    ///
    /// Returns `None` for a duplicate, including one that loses an insert race.
    pub async fn queue_notification_once_impl(
        &self,
        new: NewNotification,
    ) -> Result<Option<Notification>> {
        if let Some(key) = new.reminder_key.as_deref()
            && self.reminder_key_exists_impl(key).await?
        {
            return Ok(None);
        }

        match self.create_notification_impl(new).await {
            Ok(n) => Ok(Some(n)),
            Err(CoopError::Conflict(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn reminder_key_exists_impl(&self, key: &str) -> Result<bool> {
        let count = Notifications::find()
            .filter(Column::ReminderKey.eq(key))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to check reminder key"))?;

        Ok(count > 0)
    }

    pub async fn get_notification_by_id_impl(&self, id: i64) -> Result<Option<Notification>> {
        let result = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load notification"))?;

        Ok(result.map(|m| m.into_notification()))
    }

    pub async fn list_notifications_impl(
        &self,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<Notification>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Notifications::find();
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(kind) = query.notification_type {
            select = select.filter(Column::NotificationType.eq(kind.to_string()));
        }
        if let Some(channel) = query.channel {
            select = select.filter(Column::Channel.eq(channel.to_string()));
        }
        if let Some(recipient_type) = query.recipient_type {
            select = select.filter(Column::RecipientType.eq(recipient_type.to_string()));
        }
        if let Some(id) = query.recipient_id {
            select = select.filter(Column::RecipientId.eq(id));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id),
                page,
                size,
                "Failed to list notifications",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_notification()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_notification_impl(
        &self,
        id: i64,
        update: UpdateNotificationRequest,
    ) -> Result<Option<Notification>> {
        let Some(row) = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load notification"))?
        else {
            return Ok(None);
        };

        let mut model = row.into_active_model();
        if let Some(v) = update.recipient_contact {
            model.recipient_contact = Set(v);
        }
        if let Some(v) = update.subject {
            model.subject = Set(Some(v));
        }
        if let Some(v) = update.message {
            model.message = Set(v);
        }
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.scheduled_time {
            model.scheduled_time = Set(Some(v.timestamp()));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update notification"))?;

        Ok(Some(updated.into_notification()))
    }

    pub async fn delete_notification_impl(&self, id: i64) -> Result<bool> {
        let result = Notifications::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete notification"))?;

        Ok(result.rows_affected > 0)
    }

    /// Pending notifications whose scheduled time (if any) has passed, oldest first.
    pub async fn list_due_notifications_impl(&self, now: i64, limit: u64) -> Result<Vec<Notification>> {
        let rows = Notifications::find()
            .filter(Column::Status.eq(NotificationStatus::Pending.to_string()))
            .filter(
                Condition::any()
                    .add(Column::ScheduledTime.is_null())
                    .add(Column::ScheduledTime.lte(now)),
            )
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load due notifications"))?;

        Ok(rows.into_iter().map(|m| m.into_notification()).collect())
    }

    pub async fn mark_notification_sent_impl(&self, id: i64) -> Result<Option<Notification>> {
        let Some(row) = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load notification"))?
        else {
            return Ok(None);
        };

        let now = now_ts();
        let attempts = row.delivery_attempts + 1;
        let mut model = row.into_active_model();
        model.status = Set(NotificationStatus::Sent.to_string());
        model.sent_time = Set(Some(now));
        model.delivery_attempts = Set(attempts);
        model.error_message = Set(None);
        model.updated_at = Set(now);

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to mark notification sent"))?;

        Ok(Some(updated.into_notification()))
    }

    /// Records a failed delivery attempt. The notification stays pending for
    /// a retry until `max_attempts` is reached, then becomes `failed`.
    pub async fn mark_notification_failed_impl(
        &self,
        id: i64,
        error: &str,
        max_attempts: i32,
    ) -> Result<Option<Notification>> {
        let Some(row) = Notifications::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load notification"))?
        else {
            return Ok(None);
        };

        let attempts = row.delivery_attempts + 1;
        let status = if attempts >= max_attempts.max(1) {
            NotificationStatus::Failed
        } else {
            NotificationStatus::Pending
        };

        let mut model = row.into_active_model();
        model.status = Set(status.to_string());
        model.delivery_attempts = Set(attempts);
        model.error_message = Set(Some(error.to_string()));
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to mark notification failed"))?;

        Ok(Some(updated.into_notification()))
    }

    // Templates

    pub async fn create_template_impl(
        &self,
        req: CreateTemplateRequest,
    ) -> Result<NotificationTemplate> {
        let now = now_ts();

        let model = notification_templates::ActiveModel {
            name: Set(req.name),
            notification_type: Set(req.notification_type.to_string()),
            channel: Set(req.channel.to_string()),
            subject: Set(req.subject),
            body: Set(req.body),
            is_active: Set(req.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to create template"))?;

        Ok(model.into_template())
    }

    pub async fn get_template_by_id_impl(&self, id: i64) -> Result<Option<NotificationTemplate>> {
        let result = notification_templates::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load template"))?;

        Ok(result.map(|m| m.into_template()))
    }

    pub async fn get_template_by_name_impl(
        &self,
        name: &str,
    ) -> Result<Option<NotificationTemplate>> {
        let result = notification_templates::Entity::find()
            .filter(notification_templates::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load template"))?;

        Ok(result.map(|m| m.into_template()))
    }

    pub async fn list_templates_impl(
        &self,
        query: TemplateListQuery,
    ) -> Result<PaginatedResponse<NotificationTemplate>> {
        use notification_templates::Column as T;

        let (page, size) = page_params(query.page, query.size);

        let mut select = notification_templates::Entity::find();
        if let Some(kind) = query.notification_type {
            select = select.filter(T::NotificationType.eq(kind.to_string()));
        }
        if let Some(channel) = query.channel {
            select = select.filter(T::Channel.eq(channel.to_string()));
        }
        if let Some(active) = query.is_active {
            select = select.filter(T::IsActive.eq(active));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_asc(T::Name),
                page,
                size,
                "Failed to list templates",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_template()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_template_impl(
        &self,
        id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<NotificationTemplate>> {
        let Some(row) = notification_templates::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load template"))?
        else {
            return Ok(None);
        };

        let mut model = row.into_active_model();
        if let Some(v) = update.name {
            model.name = Set(v);
        }
        if let Some(v) = update.notification_type {
            model.notification_type = Set(v.to_string());
        }
        if let Some(v) = update.channel {
            model.channel = Set(v.to_string());
        }
        if let Some(v) = update.subject {
            model.subject = Set(Some(v));
        }
        if let Some(v) = update.body {
            model.body = Set(v);
        }
        if let Some(v) = update.is_active {
            model.is_active = Set(v);
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update template"))?;

        Ok(Some(updated.into_template()))
    }

    pub async fn delete_template_impl(&self, id: i64) -> Result<bool> {
        let result = notification_templates::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete template"))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::entities::{
        NotificationChannel, NotificationType, RecipientType,
    };
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    fn reminder(key: Option<&str>) -> NewNotification {
        NewNotification {
            notification_type: NotificationType::PaymentReminder,
            channel: NotificationChannel::Sms,
            recipient_type: RecipientType::Parent,
            recipient_id: 1,
            recipient_contact: "+212600000000".into(),
            subject: None,
            message: "Payment due".into(),
            scheduled_time: None,
            related_payment_id: None,
            reminder_key: key.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_reminder_key_deduplicates() {
        let storage = memory_storage().await;
        let first = storage
            .queue_notification_once_impl(reminder(Some("payment:1:2025-01-10")))
            .await
            .unwrap();
        assert!(first.is_some());

        let second = storage
            .queue_notification_once_impl(reminder(Some("payment:1:2025-01-10")))
            .await
            .unwrap();
        assert!(second.is_none());

        // keyless notifications are never deduplicated
        assert!(storage.queue_notification_once_impl(reminder(None)).await.unwrap().is_some());
        assert!(storage.queue_notification_once_impl(reminder(None)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_failed_delivery_retries_until_limit() {
        let storage = memory_storage().await;
        let n = storage.create_notification_impl(reminder(None)).await.unwrap();

        let once = storage
            .mark_notification_failed_impl(n.id, "gateway timeout", 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(once.status, NotificationStatus::Pending);
        assert_eq!(once.delivery_attempts, 1);
        assert_eq!(storage.list_due_notifications_impl(now_ts(), 10).await.unwrap().len(), 1);

        let twice = storage
            .mark_notification_failed_impl(n.id, "gateway timeout", 2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(twice.status, NotificationStatus::Failed);
        assert_eq!(twice.error_message.as_deref(), Some("gateway timeout"));
        assert!(storage.list_due_notifications_impl(now_ts(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_future_notifications_are_not_due() {
        let storage = memory_storage().await;
        let mut later = reminder(None);
        later.scheduled_time = Some(chrono::Utc::now() + chrono::Duration::hours(2));
        storage.create_notification_impl(later).await.unwrap();

        assert!(storage.list_due_notifications_impl(now_ts(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seeded_templates_present() {
        let storage = memory_storage().await;
        let template = storage
            .get_template_by_name_impl("payment_reminder_sms")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(template.notification_type, NotificationType::PaymentReminder);
        assert!(template.body.contains("{parent_name}"));
        assert!(storage.get_template_by_name_impl("payment_overdue_sms").await.unwrap().is_some());
    }
}
