use serde::Serialize;
use ts_rs::TS;

use super::entities::{Notification, NotificationTemplate};

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationResponse {
    pub notification: Notification,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct TemplateResponse {
    pub template: NotificationTemplate,
}

/// Outcome of one dispatch run
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct DispatchResponse {
    pub attempted: i64,
    pub sent: i64,
    pub failed: i64,
}

/// Outcome of one reminder run
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct ReminderRunResponse {
    pub date: String,
    pub reminders_queued: i64,
    pub overdue_marked: i64,
    pub overdue_notices_queued: i64,
    pub dispatch: DispatchResponse,
}
