//! Outbound notifications

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub notification_type: String,
    pub channel: String,
    pub recipient_type: String,
    pub recipient_id: i64,
    pub recipient_contact: String,
    pub subject: Option<String>,
    pub message: String,
    pub status: String,
    pub scheduled_time: Option<i64>,
    pub sent_time: Option<i64>,
    pub delivery_attempts: i32,
    pub error_message: Option<String>,
    pub related_payment_id: Option<i64>,
    /// De-duplication key of generated reminders
    #[sea_orm(unique)]
    pub reminder_key: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_notification(self) -> crate::models::notifications::entities::Notification {
        use crate::models::notifications::entities::{
            Notification, NotificationChannel, NotificationStatus, NotificationType,
            RecipientType,
        };

        Notification {
            id: self.id,
            notification_type: self
                .notification_type
                .parse::<NotificationType>()
                .unwrap_or(NotificationType::General),
            channel: self
                .channel
                .parse::<NotificationChannel>()
                .unwrap_or(NotificationChannel::InApp),
            recipient_type: self
                .recipient_type
                .parse::<RecipientType>()
                .unwrap_or(RecipientType::User),
            recipient_id: self.recipient_id,
            recipient_contact: self.recipient_contact,
            subject: self.subject,
            message: self.message,
            status: self
                .status
                .parse::<NotificationStatus>()
                .unwrap_or(NotificationStatus::Pending),
            scheduled_time: self.scheduled_time.map(super::ts_to_datetime),
            sent_time: self.sent_time.map(super::ts_to_datetime),
            delivery_attempts: self.delivery_attempts,
            error_message: self.error_message,
            related_payment_id: self.related_payment_id,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
