//! In-process daily job loop.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::cache::{DASHBOARD_KEY, ObjectCache};
use crate::config::AppConfig;
use crate::finance::{Period, today};
use crate::services::notifications::sender::NotificationSender;
use crate::storage::Storage;

use super::{calculate_financials, send_payment_reminders, update_attendance_summaries};

pub struct Scheduler {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    sender: Arc<dyn NotificationSender>,
}

impl Scheduler {
    pub fn new(
        storage: Arc<dyn Storage>,
        cache: Arc<dyn ObjectCache>,
        sender: Arc<dyn NotificationSender>,
    ) -> Self {
        Self {
            storage,
            cache,
            sender,
        }
    }

    /// Runs the three jobs for the current day. Failures are logged only.
    pub async fn run_once(&self) {
        let today = today();
        let period = Period::containing(today);

        match calculate_financials(&self.storage, period, None).await {
            Ok(Some(_)) => self.cache.remove(DASHBOARD_KEY).await,
            Ok(None) => {}
            Err(e) => error!("Scheduled financial calculation failed: {}", e),
        }

        if let Err(e) = send_payment_reminders(&self.storage, self.sender.as_ref(), today).await {
            error!("Scheduled payment reminders failed: {}", e);
        }

        if let Err(e) = update_attendance_summaries(&self.storage, period).await {
            error!("Scheduled attendance summary update failed: {}", e);
        }
    }

    /// Starts the loop; it exits once `shutdown` turns `true` or its sender is dropped.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let config = &AppConfig::get().scheduler;
        let every = Duration::from_secs(config.interval_secs.max(60));
        let run_on_startup = config.run_on_startup;

        tokio::spawn(async move {
            warn!("Job scheduler started, interval {}s", every.as_secs());
            let mut ticker = tokio::time::interval(every);
            // the first tick completes immediately
            ticker.tick().await;
            if run_on_startup {
                self.run_once().await;
            }

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.run_once().await,
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }
            info!("Job scheduler stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::services::notifications::sender::LogSender;
    use crate::storage::sea_orm_storage::test_support::memory_storage;

    #[tokio::test]
    async fn test_scheduler_stops_on_shutdown() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::new().unwrap());
        let scheduler = Scheduler::new(storage, cache, Arc::new(LogSender));

        let (tx, rx) = watch::channel(false);
        let handle = scheduler.spawn(rx);
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), handle)
            .await
            .expect("scheduler did not stop")
            .unwrap();
    }
}
