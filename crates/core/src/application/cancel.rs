// Poll Cancel Token

use tokio::sync::watch;

/// Cancel signal for an in-flight poll
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Token that can never be canceled
    pub fn never() -> Self {
        let (tx, rx) = watch::channel(false);
        // The receiver stays readable after the sender is gone.
        drop(tx);
        Self { rx }
    }

    /// Check if cancellation was requested
    pub fn is_canceled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the cancel signal
    ///
    /// Pends forever if the sender is dropped without canceling.
    pub async fn canceled(&mut self) {
        if self.rx.wait_for(|canceled| *canceled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Cancel sender
pub struct CancelSender {
    tx: watch::Sender<bool>,
}

impl CancelSender {
    /// Request cancellation of every poll holding a matching token
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a cancel channel
pub fn cancel_channel() -> (CancelSender, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelSender { tx }, CancelToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_cancel_is_observed() {
        let (sender, mut token) = cancel_channel();
        assert!(!token.is_canceled());

        sender.cancel();
        assert!(token.is_canceled());
        // Resolves immediately once canceled
        token.canceled().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_is_not_a_cancel() {
        let (sender, mut token) = cancel_channel();
        drop(sender);

        let waited = tokio::time::timeout(Duration::from_secs(5), token.canceled()).await;
        assert!(waited.is_err(), "dropped sender must not resolve the wait");
        assert!(!token.is_canceled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_token_pends() {
        let mut token = CancelToken::never();
        let waited = tokio::time::timeout(Duration::from_secs(5), token.canceled()).await;
        assert!(waited.is_err());
    }
}
