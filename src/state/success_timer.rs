//! Cancellable one-shot timer for the post-submit confirmation window

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// How long the success screen stays up before the success callback runs
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(3);

/// Runs an action once after a delay unless cancelled first.
/// Dropping the timer cancels it.
#[derive(Debug)]
pub struct SuccessTimer {
    token: CancellationToken,
}

impl SuccessTimer {
    /// Spawn the timer on the current tokio runtime
    pub fn schedule<F>(delay: Duration, action: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => {
                    tracing::debug!("Success timer cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    action();
                }
            }
        });
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for SuccessTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn flag() -> (Arc<AtomicBool>, impl FnOnce() + Send + 'static) {
        let fired = Arc::new(AtomicBool::new(false));
        let setter = fired.clone();
        (fired, move || setter.store(true, Ordering::SeqCst))
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let (fired, action) = flag();
        let _timer = SuccessTimer::schedule(SUCCESS_DISPLAY, action);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (fired, action) = flag();
        let timer = SuccessTimer::schedule(SUCCESS_DISPLAY, action);
        tokio::time::sleep(Duration::from_secs(1)).await;
        drop(timer);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_is_observable() {
        let (fired, action) = flag();
        let timer = SuccessTimer::schedule(SUCCESS_DISPLAY, action);
        timer.cancel();
        assert!(timer.is_cancelled());

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
