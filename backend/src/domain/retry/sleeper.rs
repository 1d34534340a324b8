//! Tokio-backed backoff sleeper.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use super::{BackoffInterrupted, BackoffSleeper};

/// Sleeper built on `tokio::time::sleep`.
///
/// When given a shutdown receiver, a pending wait ends early with
/// [`BackoffInterrupted`] as soon as the flag flips to `true`.
#[derive(Debug, Clone, Default)]
pub struct TokioSleeper {
    shutdown: Option<watch::Receiver<bool>>,
}

impl TokioSleeper {
    /// Sleeper that always waits the full duration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeper whose waits are cut short by `shutdown`.
    #[must_use]
    pub fn with_shutdown(shutdown: watch::Receiver<bool>) -> Self {
        Self {
            shutdown: Some(shutdown),
        }
    }
}

#[async_trait]
impl BackoffSleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) -> Result<(), BackoffInterrupted> {
        let Some(receiver) = &self.shutdown else {
            tokio::time::sleep(duration).await;
            return Ok(());
        };

        let mut shutdown = receiver.clone();
        if *shutdown.borrow() {
            return Err(BackoffInterrupted);
        }

        let wait = tokio::time::sleep(duration);
        tokio::pin!(wait);
        let stopped = tokio::select! {
            () = &mut wait => return Ok(()),
            stopped = async { shutdown.wait_for(|stop| *stop).await.is_ok() } => stopped,
        };

        if stopped {
            return Err(BackoffInterrupted);
        }
        // Sender dropped without signalling; finish the wait normally.
        wait.await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn waits_full_duration_without_shutdown() {
        let started = tokio::time::Instant::now();
        TokioSleeper::new()
            .sleep(Duration::from_secs(2))
            .await
            .expect("uninterrupted sleep");
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_signal_interrupts_pending_wait() {
        let (sender, receiver) = watch::channel(false);
        let sleeper = TokioSleeper::with_shutdown(receiver);

        let pending = tokio::spawn(async move { sleeper.sleep(Duration::from_secs(60)).await });
        tokio::task::yield_now().await;
        sender.send(true).expect("receiver alive");

        let outcome = pending.await.expect("join sleeper");
        assert_eq!(outcome, Err(BackoffInterrupted));
    }

    #[tokio::test]
    async fn already_signalled_shutdown_fails_fast() {
        let (_sender, receiver) = watch::channel(true);
        let outcome = TokioSleeper::with_shutdown(receiver)
            .sleep(Duration::from_secs(60))
            .await;
        assert_eq!(outcome, Err(BackoffInterrupted));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sender_lets_wait_complete() {
        let (sender, receiver) = watch::channel(false);
        drop(sender);
        let outcome = TokioSleeper::with_shutdown(receiver)
            .sleep(Duration::from_millis(500))
            .await;
        assert_eq!(outcome, Ok(()));
    }
}
