//! Keystroke debouncing

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Trailing-edge debouncer
///
/// Every call to [`Debouncer::settle`] takes a ticket and sleeps for the quiet
/// period. Only the call holding the newest ticket when it wakes reports
/// `true`.
#[derive(Debug)]
pub struct Debouncer {
    quiet: Duration,
    latest: AtomicU64,
}

impl Debouncer {
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            latest: AtomicU64::new(0),
        }
    }

    /// Quiet period
    #[must_use]
    pub const fn quiet(&self) -> Duration {
        self.quiet
    }

    /// Wait out the quiet period; `false` if a newer call arrived meanwhile
    pub async fn settle(&self) -> bool {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.quiet).await;
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Make every pending `settle` report `false`
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_single_call_settles() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let start = tokio::time::Instant::now();

        assert!(debouncer.settle().await);
        assert!(start.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_call_wins() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let (first, second) = tokio::join!(debouncer.settle(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            debouncer.settle().await
        });

        assert!(!first);
        assert!(second);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_outside_window_both_settle() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        assert!(debouncer.settle().await);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(debouncer.settle().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let debouncer = Debouncer::new(Duration::from_millis(300));

        let (pending, ()) = tokio::join!(debouncer.settle(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            debouncer.cancel();
        });

        assert!(!pending);
    }
}
