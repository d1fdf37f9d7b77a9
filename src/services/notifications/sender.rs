//! Outbound delivery.
//!
//! A [`NotificationSender`] delivers one notification; [`dispatch_due`]
//! drains the pending queue through it and records each outcome.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::errors::{CoopError, Result};
use crate::models::notifications::entities::Notification;
use crate::models::notifications::responses::DispatchResponse;
use crate::storage::Storage;

/// Notifications handled per dispatch run
pub const DISPATCH_BATCH: u64 = 100;

#[async_trait]
pub trait NotificationSender: Send + Sync {
    fn name(&self) -> &'static str;

    /// Delivers one notification. The error message is stored on the row.
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// Writes deliveries to the log. Used when no gateway is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSender;

#[async_trait]
impl NotificationSender for LogSender {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        if notification.recipient_contact.trim().is_empty() {
            return Err(CoopError::notification("Recipient contact is empty"));
        }
        info!(
            channel = %notification.channel,
            recipient = %notification.recipient_contact,
            "Delivered notification {}: {}",
            notification.id,
            notification.message
        );
        Ok(())
    }
}

/// Sends every due pending notification once.
///
/// Failures are recorded on the row; after `reminders.max_delivery_attempts`
/// the notification stays `failed`.
pub async fn dispatch_due(
    storage: &Arc<dyn Storage>,
    sender: &dyn NotificationSender,
) -> Result<DispatchResponse> {
    let max_attempts = AppConfig::get().reminders.max_delivery_attempts;
    let now = chrono::Utc::now().timestamp();
    let due = storage.list_due_notifications(now, DISPATCH_BATCH).await?;

    let mut outcome = DispatchResponse::default();
    for notification in due {
        outcome.attempted += 1;
        match sender.send(&notification).await {
            Ok(()) => {
                storage.mark_notification_sent(notification.id).await?;
                outcome.sent += 1;
            }
            Err(e) => {
                warn!(
                    "Sender '{}' failed on notification {}: {}",
                    sender.name(),
                    notification.id,
                    e.message()
                );
                storage
                    .mark_notification_failed(notification.id, e.message(), max_attempts)
                    .await?;
                outcome.failed += 1;
            }
        }
    }

    if outcome.attempted > 0 {
        info!(
            "Dispatch finished: {} attempted, {} sent, {} failed",
            outcome.attempted, outcome.sent, outcome.failed
        );
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::notifications::entities::{
        NewNotification, NotificationChannel, NotificationStatus, NotificationType, RecipientType,
    };
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    fn new(contact: &str) -> NewNotification {
        NewNotification {
            notification_type: NotificationType::General,
            channel: NotificationChannel::Sms,
            recipient_type: RecipientType::Parent,
            recipient_id: 1,
            recipient_contact: contact.to_string(),
            subject: None,
            message: "Hello".to_string(),
            scheduled_time: None,
            related_payment_id: None,
            reminder_key: None,
        }
    }

    #[tokio::test]
    async fn test_dispatch_marks_outcomes() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let ok = storage.create_notification(new("+212600000010")).await.unwrap();
        let bad = storage.create_notification(new("  ")).await.unwrap();

        let outcome = dispatch_due(&storage, &LogSender).await.unwrap();
        assert_eq!(outcome.attempted, 2);
        assert_eq!(outcome.sent, 1);
        assert_eq!(outcome.failed, 1);

        let ok = storage.get_notification_by_id(ok.id).await.unwrap().unwrap();
        assert_eq!(ok.status, NotificationStatus::Sent);
        assert!(ok.sent_time.is_some());

        // retried until the attempt budget is spent
        let max = AppConfig::get().reminders.max_delivery_attempts;
        for _ in 1..max {
            dispatch_due(&storage, &LogSender).await.unwrap();
        }
        let bad = storage.get_notification_by_id(bad.id).await.unwrap().unwrap();
        assert_eq!(bad.status, NotificationStatus::Failed);
        assert_eq!(bad.delivery_attempts, max);

        let outcome = dispatch_due(&storage, &LogSender).await.unwrap();
        assert_eq!(outcome.attempted, 0);
    }
}
