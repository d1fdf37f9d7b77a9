use tokio::signal;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, warn};

/// Resolves on Ctrl+C, or on SIGTERM where available.
pub async fn listen_for_shutdown() {
    #[cfg(unix)]
    {
        let mut terminate = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(stream) => Some(stream),
            Err(e) => {
                error!("Cannot listen for SIGTERM: {}", e);
                None
            }
        };
        tokio::select! {
            result = signal::ctrl_c() => {
                if let Err(e) = result {
                    error!("Cannot listen for Ctrl+C: {}", e);
                }
            }
            _ = async {
                match terminate.as_mut() {
                    Some(stream) => { stream.recv().await; }
                    None => std::future::pending::<()>().await,
                }
            } => {}
        }
    }

    #[cfg(not(unix))]
    if let Err(e) = signal::ctrl_c().await {
        error!("Cannot listen for Ctrl+C: {}", e);
    }

    warn!("Shutdown signal received, initiating graceful shutdown...");
}

/// Tells background tasks to stop and waits for them.
pub async fn stop_background_tasks(stop: watch::Sender<bool>, tasks: Vec<JoinHandle<()>>) {
    // receivers also stop when the sender is dropped
    let _ = stop.send(true);
    for task in tasks {
        if let Err(e) = task.await {
            error!("Background task ended abnormally: {}", e);
        }
    }
    warn!("Background tasks stopped");
}
