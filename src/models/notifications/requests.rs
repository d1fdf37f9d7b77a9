use serde::Deserialize;
use ts_rs::TS;

use super::entities::{NotificationChannel, NotificationStatus, NotificationType, RecipientType};

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<NotificationStatus>,
    pub notification_type: Option<NotificationType>,
    pub channel: Option<NotificationChannel>,
    pub recipient_type: Option<RecipientType>,
    pub recipient_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct CreateNotificationRequest {
    pub notification_type: NotificationType,
    pub channel: NotificationChannel,
    pub recipient_type: RecipientType,
    pub recipient_id: i64,
    pub recipient_contact: String,
    pub subject: Option<String>,
    pub message: String,
    pub scheduled_time: Option<chrono::DateTime<chrono::Utc>>,
    pub related_payment_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct UpdateNotificationRequest {
    pub recipient_contact: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub status: Option<NotificationStatus>,
    pub scheduled_time: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct MarkFailedRequest {
    pub error: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct TemplateListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub notification_type: Option<NotificationType>,
    pub channel: Option<NotificationChannel>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct CreateTemplateRequest {
    pub name: String,
    pub notification_type: NotificationType,
    pub channel: NotificationChannel,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct UpdateTemplateRequest {
    pub name: Option<String>,
    pub notification_type: Option<NotificationType>,
    pub channel: Option<NotificationChannel>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct RunRemindersRequest {
    /// Defaults to today
    pub date: Option<chrono::NaiveDate>,
}
