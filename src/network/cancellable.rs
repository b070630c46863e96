//! Sticky cancellation token for in-flight description downloads

use std::sync::Arc;
use tokio::sync::watch;

/// Clonable cancellation flag. Once cancelled it stays cancelled, and every
/// clone observes the same flag.
#[derive(Debug, Clone)]
pub struct Cancellable {
    flag: Arc<watch::Sender<bool>>,
}

impl Cancellable {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            flag: Arc::new(sender),
        }
    }

    /// Flip the flag. Idempotent.
    pub fn cancel(&self) {
        self.flag.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.flag.borrow()
    }

    /// Wait until cancelled. Returns immediately if already cancelled.
    pub async fn cancelled(&self) {
        let mut receiver = self.flag.subscribe();
        // The sender lives in self, so the channel cannot close while we
        // wait.
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

impl Default for Cancellable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_sticky_and_shared() {
        let cancellable = Cancellable::new();
        let clone = cancellable.clone();
        assert!(!cancellable.is_cancelled());
        assert!(!clone.is_cancelled());

        clone.cancel();
        assert!(cancellable.is_cancelled());
        assert!(clone.is_cancelled());

        clone.cancel();
        assert!(cancellable.is_cancelled());
    }

    #[tokio::test]
    async fn test_cancelled_wakes_waiters() {
        let cancellable = Cancellable::new();
        let waiter = cancellable.clone();
        let handle = tokio::spawn(async move {
            waiter.cancelled().await;
            true
        });
        cancellable.cancel();
        assert!(handle.await.unwrap());
    }

    #[tokio::test]
    async fn test_cancelled_returns_immediately_when_already_cancelled() {
        let cancellable = Cancellable::new();
        cancellable.cancel();
        cancellable.cancelled().await;
    }
}
