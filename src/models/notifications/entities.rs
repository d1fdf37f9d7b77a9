use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_str_enum;

define_str_enum!(NotificationType, "../frontend/src/types/generated/notification.ts" {
    PaymentReminder => "payment_reminder",
    PaymentOverdue => "payment_overdue",
    AttendanceAlert => "attendance_alert",
    CourseUpdate => "course_update",
    General => "general",
});

define_str_enum!(NotificationChannel, "../frontend/src/types/generated/notification.ts" {
    Sms => "sms",
    Email => "email",
    Push => "push",
    InApp => "in_app",
});

define_str_enum!(RecipientType, "../frontend/src/types/generated/notification.ts" {
    Student => "student",
    Parent => "parent",
    Instructor => "instructor",
    Member => "member",
    User => "user",
});

define_str_enum!(NotificationStatus, "../frontend/src/types/generated/notification.ts" {
    Pending => "pending",
    Sent => "sent",
    Delivered => "delivered",
    Failed => "failed",
});

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub notification_type: NotificationType,
    pub channel: NotificationChannel,
    pub recipient_type: RecipientType,
    pub recipient_id: i64,
    pub recipient_contact: String,
    pub subject: Option<String>,
    pub message: String,
    pub status: NotificationStatus,
    pub scheduled_time: Option<chrono::DateTime<chrono::Utc>>,
    pub sent_time: Option<chrono::DateTime<chrono::Utc>>,
    pub delivery_attempts: i32,
    pub error_message: Option<String>,
    pub related_payment_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Fields of a notification about to be queued
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub notification_type: NotificationType,
    pub channel: NotificationChannel,
    pub recipient_type: RecipientType,
    pub recipient_id: i64,
    pub recipient_contact: String,
    pub subject: Option<String>,
    pub message: String,
    pub scheduled_time: Option<chrono::DateTime<chrono::Utc>>,
    pub related_payment_id: Option<i64>,
    /// Queue at most one notification per key
    pub reminder_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationTemplate {
    pub id: i64,
    pub name: String,
    pub notification_type: NotificationType,
    pub channel: NotificationChannel,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern"));

/// Replaces `{name}` placeholders; unknown names are left as written.
pub fn render_placeholders(text: &str, vars: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &regex::Captures| match vars.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

impl NotificationTemplate {
    /// Renders `(subject, body)`.
    pub fn render(&self, vars: &HashMap<String, String>) -> (Option<String>, String) {
        (
            self.subject
                .as_deref()
                .map(|s| render_placeholders(s, vars)),
            render_placeholders(&self.body, vars),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_known_placeholders() {
        let out = render_placeholders(
            "Dear {parent_name}, {amount} {currency} due on {due_date}.",
            &vars(&[
                ("parent_name", "Mr. Alami"),
                ("amount", "300.00"),
                ("currency", "DH"),
                ("due_date", "2025-02-01"),
            ]),
        );
        assert_eq!(out, "Dear Mr. Alami, 300.00 DH due on 2025-02-01.");
    }

    #[test]
    fn test_unknown_placeholders_left_intact() {
        let out = render_placeholders("Hi {name}, see {unknown} and {not closed", &vars(&[("name", "Sara")]));
        assert_eq!(out, "Hi Sara, see {unknown} and {not closed");
    }

    #[test]
    fn test_template_render_subject() {
        let now = chrono::Utc::now();
        let template = NotificationTemplate {
            id: 1,
            name: "t".into(),
            notification_type: NotificationType::General,
            channel: NotificationChannel::Email,
            subject: Some("Hello {name}".into()),
            body: "{name}!".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        let (subject, body) = template.render(&vars(&[("name", "Omar")]));
        assert_eq!(subject.as_deref(), Some("Hello Omar"));
        assert_eq!(body, "Omar!");
    }
}
