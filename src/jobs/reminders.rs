//! Payment reminders and overdue notices.
//!
//! Each queued notification carries a reminder key built from the payment,
//! the notification type and the run date, so rerunning a day queues nothing
//! new.

use chrono::{Days, NaiveDate};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::errors::Result;
use crate::finance::payments::days_overdue;
use crate::models::notifications::entities::{
    NewNotification, NotificationChannel, NotificationType, RecipientType, render_placeholders,
};
use crate::models::notifications::responses::ReminderRunResponse;
use crate::models::payments::entities::Payment;
use crate::services::notifications::sender::{NotificationSender, dispatch_due};
use crate::services::system::DynamicConfig;
use crate::storage::Storage;

const REMINDER_TEMPLATE: &str = "payment_reminder_sms";
const OVERDUE_TEMPLATE: &str = "payment_overdue_sms";

const REMINDER_FALLBACK: &str = "Dear {parent_name}, the payment of {amount} {currency} for {student_name} is due on {due_date}. {cooperative_name}";
const OVERDUE_FALLBACK: &str = "Dear {parent_name}, the payment of {balance} {currency} for {student_name} is {days_overdue} day(s) overdue (due {due_date}). {cooperative_name}";

fn reminder_key(kind: NotificationType, payment_id: i64, day: NaiveDate) -> String {
    format!("{kind}:{payment_id}:{day}")
}

/// Subject and body from the named template, or the built-in text when the
/// template is missing or disabled.
async fn render(
    storage: &Arc<dyn Storage>,
    template: &str,
    fallback: &str,
    vars: &HashMap<String, String>,
) -> Result<(Option<String>, String)> {
    match storage.get_template_by_name(template).await? {
        Some(t) if t.is_active => Ok(t.render(vars)),
        _ => Ok((None, render_placeholders(fallback, vars))),
    }
}

struct Notice<'a> {
    kind: NotificationType,
    template: &'static str,
    fallback: &'static str,
    payment: &'a Payment,
    today: NaiveDate,
}

/// Queues one notice to the parent. Returns whether a new row was queued.
async fn queue_notice(
    storage: &Arc<dyn Storage>,
    notice: Notice<'_>,
    base_vars: &HashMap<String, String>,
) -> Result<bool> {
    let payment = notice.payment;
    let key = reminder_key(notice.kind, payment.id, notice.today);
    if storage.reminder_key_exists(&key).await? {
        return Ok(false);
    }

    let Some(student) = storage.get_student_by_id(payment.student_id).await? else {
        warn!(
            "Payment {} references missing student {}",
            payment.id, payment.student_id
        );
        return Ok(false);
    };

    let mut vars = base_vars.clone();
    vars.insert("parent_name".into(), student.parent_name.clone());
    vars.insert("student_name".into(), student.full_name.clone());
    vars.insert("amount".into(), format!("{:.2}", payment.amount));
    vars.insert("balance".into(), format!("{:.2}", payment.balance));
    vars.insert("due_date".into(), payment.due_date.to_string());
    vars.insert(
        "days_overdue".into(),
        days_overdue(payment.due_date, notice.today).to_string(),
    );

    let (subject, message) = render(storage, notice.template, notice.fallback, &vars).await?;
    let queued = storage
        .queue_notification_once(NewNotification {
            notification_type: notice.kind,
            channel: NotificationChannel::Sms,
            recipient_type: RecipientType::Parent,
            recipient_id: student.id,
            recipient_contact: student.parent_phone,
            subject,
            message,
            scheduled_time: None,
            related_payment_id: Some(payment.id),
            reminder_key: Some(key),
        })
        .await?;

    Ok(queued.is_some())
}

/// Day offsets a reminder run looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSchedule {
    /// Days before the due date
    pub payment_days: Vec<i64>,
    /// Days after the due date
    pub overdue_days: Vec<i64>,
}

impl ReminderSchedule {
    /// Offsets from the runtime settings.
    pub async fn current() -> Self {
        Self {
            payment_days: DynamicConfig::reminder_payment_days().await,
            overdue_days: DynamicConfig::reminder_overdue_days().await,
        }
    }
}

/// Queues due-soon reminders and overdue notices for `today`, then
/// dispatches everything pending.
pub async fn send_payment_reminders(
    storage: &Arc<dyn Storage>,
    sender: &dyn NotificationSender,
    today: NaiveDate,
) -> Result<ReminderRunResponse> {
    let schedule = ReminderSchedule::current().await;
    send_payment_reminders_with(storage, sender, today, &schedule).await
}

pub async fn send_payment_reminders_with(
    storage: &Arc<dyn Storage>,
    sender: &dyn NotificationSender,
    today: NaiveDate,
    schedule: &ReminderSchedule,
) -> Result<ReminderRunResponse> {
    let mut base_vars = HashMap::new();
    base_vars.insert("currency".to_string(), DynamicConfig::currency().await);
    base_vars.insert(
        "cooperative_name".to_string(),
        DynamicConfig::cooperative_name().await,
    );

    let mut report = ReminderRunResponse {
        date: today.to_string(),
        ..Default::default()
    };

    for &days in &schedule.payment_days {
        let Some(due) = today.checked_add_days(Days::new(days.unsigned_abs())) else {
            continue;
        };
        for payment in storage.list_payments_due_on(due).await? {
            let notice = Notice {
                kind: NotificationType::PaymentReminder,
                template: REMINDER_TEMPLATE,
                fallback: REMINDER_FALLBACK,
                payment: &payment,
                today,
            };
            if queue_notice(storage, notice, &base_vars).await? {
                report.reminders_queued += 1;
            }
        }
    }

    for &days in &schedule.overdue_days {
        let Some(due) = today.checked_sub_days(Days::new(days.unsigned_abs())) else {
            continue;
        };
        for payment in storage.list_open_payments_due_on(due).await? {
            if storage.mark_payment_overdue(payment.id).await? {
                report.overdue_marked += 1;
            }
            let notice = Notice {
                kind: NotificationType::PaymentOverdue,
                template: OVERDUE_TEMPLATE,
                fallback: OVERDUE_FALLBACK,
                payment: &payment,
                today,
            };
            if queue_notice(storage, notice, &base_vars).await? {
                report.overdue_notices_queued += 1;
            }
        }
    }

    report.dispatch = dispatch_due(storage, sender).await?;

    info!(
        "Reminders for {}: {} queued, {} overdue marked, {} overdue notices",
        today, report.reminders_queued, report.overdue_marked, report.overdue_notices_queued
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::entities::NotificationStatus;
    use crate::models::payments::entities::PaymentStatus;
    use crate::models::payments::requests::CreatePaymentRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::notifications::sender::LogSender;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_reminder_key_format() {
        assert_eq!(
            reminder_key(NotificationType::PaymentOverdue, 7, date("2025-02-08")),
            "payment_overdue:7:2025-02-08"
        );
    }

    #[tokio::test]
    async fn test_reminders_are_queued_once_per_day() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let today = date("2025-02-10");

        let student: CreateStudentRequest = serde_json::from_value(json!({
            "full_name": "Hamza Ouali",
            "parent_name": "Rachid Ouali",
            "parent_phone": "+212600000020",
        }))
        .unwrap();
        let student_id = storage.create_student(student).await.unwrap().id;

        let payment = |due: &str| -> CreatePaymentRequest {
            serde_json::from_value(json!({
                "student_id": student_id,
                "amount": "300",
                "due_date": due,
            }))
            .unwrap()
        };
        // due in 3 days, and 7 days overdue
        let upcoming = storage.create_payment(payment("2025-02-13")).await.unwrap();
        let late = storage.create_payment(payment("2025-02-03")).await.unwrap();
        // due in 5 days: no reminder configured for that offset
        storage.create_payment(payment("2025-02-15")).await.unwrap();

        let schedule = ReminderSchedule {
            payment_days: vec![7, 3, 1],
            overdue_days: vec![1, 7, 14],
        };
        let report = send_payment_reminders_with(&storage, &LogSender, today, &schedule)
            .await
            .unwrap();
        assert_eq!(report.reminders_queued, 1);
        assert_eq!(report.overdue_marked, 1);
        assert_eq!(report.overdue_notices_queued, 1);
        assert_eq!(report.dispatch.sent, 2);

        let late = storage.get_payment_by_id(late.id).await.unwrap().unwrap();
        assert_eq!(late.status, PaymentStatus::Overdue);

        let sent = storage
            .list_notifications(Default::default())
            .await
            .unwrap()
            .items;
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|n| n.status == NotificationStatus::Sent));
        let reminder = sent
            .iter()
            .find(|n| n.related_payment_id == Some(upcoming.id))
            .unwrap();
        assert!(reminder.message.contains("Rachid Ouali"));
        assert!(reminder.message.contains("2025-02-13"));

        let again = send_payment_reminders_with(&storage, &LogSender, today, &schedule)
            .await
            .unwrap();
        assert_eq!(again.reminders_queued, 0);
        assert_eq!(again.overdue_notices_queued, 0);
        assert_eq!(again.overdue_marked, 0);
    }
}
