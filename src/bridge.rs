//! Turns the service's callback-based calls into a bounded synchronous wait.

use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::oneshot;

use crate::roles::RemoteCallback;

/// How long to wait for the service to confirm an operation before giving up.
pub const DEFAULT_WAIT: Duration = Duration::from_secs(5);

/// The receiving half of one outstanding remote operation.
///
/// Created together with the callback that resolves it; resolved at most
/// once. On timeout the wait is abandoned but the in-flight operation is
/// not cancelled, so the service may still apply it afterwards.
pub struct CallbackFuture {
    rx: oneshot::Receiver<Option<serde_json::Value>>,
}

impl CallbackFuture {
    /// Creates the completion cell and the callback that resolves it.
    pub fn new() -> (RemoteCallback, CallbackFuture) {
        let (tx, rx) = oneshot::channel();
        let callback: RemoteCallback = Box::new(move |result| {
            // The waiter may already have timed out and gone away; the
            // outcome is dropped in that case.
            if tx.send(result).is_err() {
                log::debug!("role service answered after the local wait ended");
            }
        });

        (callback, CallbackFuture { rx })
    }

    /// Waits for the callback to fire, up to `timeout`.
    ///
    /// A present payload means the operation succeeded. An absent payload,
    /// a callback that was dropped without firing, or an expired timeout
    /// all count as failure.
    pub async fn wait(self, timeout: Duration) -> Result<()> {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(Some(_))) => Ok(()),
            Ok(Ok(None)) => Err(anyhow!(
                "Error: the role service reported failure, see its log for details."
            )),
            Ok(Err(_)) => Err(anyhow!("Error: the role service went away without answering.")),
            Err(_) => Err(anyhow!(
                "Error: timed out after {:?} waiting for the role service.",
                timeout
            )),
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Instant;

    use super::*;

    #[tokio::test]
    async fn test_present_payload_resolves_success() {
        let (callback, future) = CallbackFuture::new();
        callback(Some(serde_json::json!({})));
        assert!(future.wait(DEFAULT_WAIT).await.is_ok());
    }

    #[tokio::test]
    async fn test_absent_payload_resolves_failure() {
        let (callback, future) = CallbackFuture::new();
        callback(None);
        let err = future.wait(DEFAULT_WAIT).await.unwrap_err();
        assert!(err.to_string().contains("reported failure"), "err: {}", err);
    }

    #[tokio::test]
    async fn test_dropped_callback_resolves_failure() {
        let (callback, future) = CallbackFuture::new();
        drop(callback);
        let err = future.wait(DEFAULT_WAIT).await.unwrap_err();
        assert!(err.to_string().contains("went away"), "err: {}", err);
    }

    #[tokio::test]
    async fn test_unfired_callback_times_out() {
        let (callback, future) = CallbackFuture::new();

        let start = Instant::now();
        let err = future.wait(Duration::from_millis(50)).await.unwrap_err();
        let elapsed = start.elapsed();

        // Keep the callback alive across the wait so the timeout, not a
        // closed channel, ends it.
        drop(callback);

        assert!(err.to_string().contains("timed out"), "err: {}", err);
        assert!(elapsed < Duration::from_secs(2), "elapsed: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_callback_fires_from_another_thread() {
        let (callback, future) = CallbackFuture::new();

        std::thread::spawn(move || {
            callback(Some(serde_json::json!({"confirmed": true})));
        });

        assert!(future.wait(DEFAULT_WAIT).await.is_ok());
    }
}
