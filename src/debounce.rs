//! Quiet-period debouncing
//!
//! Values pushed in quick succession are coalesced: only the latest value is
//! delivered, once no new value has arrived for the whole wait period. Used
//! by the search box so typing does not fire one listing query per keystroke.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Handle feeding a background debounce task
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns the debounce task on the current tokio runtime.
    ///
    /// `on_settle` runs with the latest value each time the input goes quiet
    /// for `wait`. Values pushed while it runs start the next window.
    pub fn spawn<F, Fut>(wait: Duration, mut on_settle: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();

        let task = tokio::spawn(async move {
            while let Some(mut latest) = rx.recv().await {
                loop {
                    tokio::select! {
                        next = rx.recv() => match next {
                            Some(value) => latest = value,
                            // Input closed: deliver what we have and stop
                            None => break,
                        },
                        _ = tokio::time::sleep(wait) => break,
                    }
                }
                on_settle(latest).await;
            }
        });

        Self { tx, task }
    }

    /// Feeds a new value, restarting the quiet period
    pub fn push(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::warn!("debounce task is gone; dropping input");
        }
    }

    /// Flushes any pending value and waits for the task to finish
    pub async fn close(self) {
        let Self { tx, task } = self;
        drop(tx);
        if let Err(e) = task.await {
            tracing::error!("debounce task failed: {}", e);
        }
    }
}
