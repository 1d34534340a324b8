//! Sleepers that record backoff requests instead of waiting.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::retry::{BackoffInterrupted, BackoffSleeper};

/// Sleeper that returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait]
impl BackoffSleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) -> Result<(), BackoffInterrupted> {
        Ok(())
    }
}

/// Sleeper that records every requested delay and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper(Mutex<Vec<Duration>>);

impl RecordingSleeper {
    /// Delays requested so far, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl BackoffSleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) -> Result<(), BackoffInterrupted> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        Ok(())
    }
}

/// Sleeper that records the requested delay and reports an interruption.
#[derive(Debug, Default)]
pub struct InterruptingSleeper(Mutex<Vec<Duration>>);

impl InterruptingSleeper {
    /// Delays requested so far, in order.
    pub fn delays(&self) -> Vec<Duration> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl BackoffSleeper for InterruptingSleeper {
    async fn sleep(&self, duration: Duration) -> Result<(), BackoffInterrupted> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
        Err(BackoffInterrupted)
    }
}
