use std::time::Duration;
use tokio::select;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// A one-shot delayed action that can be cancelled before it fires.
///
/// Dropping the handle cancels the action, so a task never outlives the
/// component that owns it.
pub struct ScheduledTask {
    name: &'static str,
    cancel_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<bool>,
}

impl ScheduledTask {
    /// Run `action` once after `delay` on the current tokio runtime.
    pub fn after<F>(name: &'static str, delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            select! {
                _ = sleep(delay) => {
                    debug!("Scheduled task '{}' firing after {:?}", name, delay);
                    action();
                    true
                }
                _ = cancel_rx => {
                    debug!("Scheduled task '{}' cancelled", name);
                    false
                }
            }
        });

        Self {
            name,
            cancel_tx: Some(cancel_tx),
            handle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Cancel without waiting. No-op if the action already ran.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
