//! Coalescing of rapid-fire updates such as keystrokes in a search box
//!
//! Each push replaces the pending value; the handler runs once with the
//! latest value after the quiet window elapses without a new push. At most
//! one value is ever pending, however fast pushes arrive.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;

/// Quiet window used by the list views' search boxes
pub const DEFAULT_QUIET_WINDOW: Duration = Duration::from_millis(300);

/// Debounces values pushed from an event handler
///
/// Must be created inside a tokio runtime. Dropping the debouncer discards
/// any pending value and stops its task.
pub struct Debouncer<T> {
    tx: watch::Sender<Option<T>>,
    task: JoinHandle<()>,
    window: Duration,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawn a debouncer calling `on_settle` with each settled value
    pub fn spawn<F>(window: Duration, on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(run(rx, window, on_settle));
        Self { tx, task, window }
    }

    /// Spawn with [`DEFAULT_QUIET_WINDOW`]
    pub fn with_default_window<F>(on_settle: F) -> Self
    where
        F: FnMut(T) + Send + 'static,
    {
        Self::spawn(DEFAULT_QUIET_WINDOW, on_settle)
    }

    /// Supersede the pending value and restart the quiet window
    pub fn push(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run<T, F>(mut rx: watch::Receiver<Option<T>>, window: Duration, mut on_settle: F)
where
    T: Clone + Send + Sync + 'static,
    F: FnMut(T) + Send + 'static,
{
    loop {
        if rx.changed().await.is_err() {
            return;
        }

        loop {
            match timeout(window, rx.changed()).await {
                Ok(Ok(())) => continue,
                Ok(Err(_)) => return,
                Err(_) => break,
            }
        }

        let settled = rx.borrow_and_update().clone();
        if let Some(value) = settled {
            tracing::trace!(window_ms = window.as_millis() as u64, "Debounced value settled");
            on_settle(value);
        }
    }
}
