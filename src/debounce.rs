//! Quiet-period debouncing for search-as-you-type callers.
//!
//! Every [`Debouncer::push`] restarts the quiet period. Once no new value has
//! arrived for the whole period, the latest value is handed to the action.
//! Actions are single-flight: the worker awaits each one before reading more
//! input, so values pushed meanwhile are debounced again afterwards.

use std::future::Future;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Delay the listing page waits before re-querying.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

pub struct Debouncer<T> {
    sender: mpsc::UnboundedSender<T>,
    worker: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn<F, Fut>(quiet_period: Duration, action: F) -> Self
    where
        F: FnMut(T) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run(quiet_period, receiver, action));
        Self { sender, worker }
    }

    /// Returns `false` once the worker has stopped.
    pub fn push(&self, value: T) -> bool {
        self.sender.send(value).is_ok()
    }

    /// Stops the worker. A pending value is discarded; a running action is
    /// aborted at its next await point.
    pub fn cancel(self) {
        self.worker.abort();
    }
}

async fn run<T, F, Fut>(
    quiet_period: Duration,
    mut receiver: mpsc::UnboundedReceiver<T>,
    mut action: F,
) where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut pending: Option<T> = None;
    let mut deadline = Instant::now();

    loop {
        if pending.is_none() {
            match receiver.recv().await {
                Some(value) => {
                    pending = Some(value);
                    deadline = Instant::now() + quiet_period;
                }
                None => return,
            }
            continue;
        }

        tokio::select! {
            received = receiver.recv() => match received {
                Some(value) => {
                    pending = Some(value);
                    deadline = Instant::now() + quiet_period;
                }
                // all handles dropped: nothing is flushed
                None => return,
            },
            _ = sleep_until(deadline) => {
                if let Some(value) = pending.take() {
                    action(value).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;
    use tokio::time::sleep;

    type Action = Pin<Box<dyn Future<Output = ()> + Send>>;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl FnMut(String) -> Action + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let action = move |value: String| {
            let sink = sink.clone();
            Box::pin(async move {
                sink.lock().await.push(value);
            }) as Action
        };
        (seen, action)
    }

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let (seen, action) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_QUIET_PERIOD, action);

        for text in ["r", "ru", "rus", "rust"] {
            debouncer.push(text.to_string());
            sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().await.is_empty());

        sleep(Duration::from_millis(600)).await;
        assert_eq!(*seen.lock().await, vec!["rust".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_bursts_fire_separately() {
        let (seen, action) = recorder();
        let debouncer = Debouncer::spawn(Duration::from_millis(200), action);

        debouncer.push("apollo".to_string());
        sleep(Duration::from_millis(300)).await;
        debouncer.push("gemini".to_string());
        sleep(Duration::from_millis(300)).await;

        assert_eq!(
            *seen.lock().await,
            vec!["apollo".to_string(), "gemini".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn actions_never_overlap() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let calls = Arc::new(AtomicUsize::new(0));

        let debouncer = {
            let (running, peak, calls) = (running.clone(), peak.clone(), calls.clone());
            Debouncer::spawn(Duration::from_millis(50), move |_: u32| {
                let (running, peak, calls) = (running.clone(), peak.clone(), calls.clone());
                async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    sleep(Duration::from_millis(500)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    calls.fetch_add(1, Ordering::SeqCst);
                }
            })
        };

        debouncer.push(1);
        sleep(Duration::from_millis(100)).await;
        // the first action is still running
        debouncer.push(2);
        sleep(Duration::from_millis(100)).await;
        debouncer.push(3);
        sleep(Duration::from_secs(2)).await;

        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_discards_pending_value() {
        let (seen, action) = recorder();
        let debouncer = Debouncer::spawn(DEFAULT_QUIET_PERIOD, action);

        debouncer.push("lost".to_string());
        drop(debouncer);
        sleep(Duration::from_secs(1)).await;

        assert!(seen.lock().await.is_empty());
    }
}
