//! Bounded retry with linear backoff around single upstream attempts.
//!
//! The orchestrator runs one attempt at a time, asks the failure whether it is
//! worth retrying, and waits `base_delay * attempt` between attempts. Waiting
//! goes through an injected [`BackoffSleeper`] so it is an async suspension
//! point in production and a recorded no-op in tests.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, error, warn};

mod sleeper;

pub use sleeper::TokioSleeper;

/// Classification hook for failures produced by one attempt.
pub trait RetryClassification {
    /// Return whether another attempt may succeed.
    fn is_retryable(&self) -> bool;
}

/// Attempt budget and backoff base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts per logical operation, including the first.
    pub max_attempts: u32,
    /// Delay multiplied by the attempt number before the next attempt.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1_000),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after failed attempt number `attempt` (1-based).
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use employee_gateway::domain::retry::RetryPolicy;
    ///
    /// let policy = RetryPolicy::default();
    /// assert_eq!(policy.delay_after(1), Duration::from_secs(1));
    /// assert_eq!(policy.delay_after(2), Duration::from_secs(2));
    /// ```
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.max(1))
    }
}

/// Raised by a sleeper when a wait was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("retry backoff interrupted")]
pub struct BackoffInterrupted;

/// Async sleeping abstraction for retry backoff.
#[async_trait]
pub trait BackoffSleeper: Send + Sync {
    /// Suspend the calling task for `duration`.
    ///
    /// # Errors
    ///
    /// Returns [`BackoffInterrupted`] when the wait was cancelled.
    async fn sleep(&self, duration: Duration) -> Result<(), BackoffInterrupted>;
}

/// Terminal outcome of a retried operation.
#[derive(Debug, Error)]
pub enum RetryError<E> {
    /// The failure was not retryable.
    #[error("{cause}")]
    Rejected {
        /// Attempts made, including the rejected one.
        attempts: u32,
        /// Failure returned by the rejected attempt.
        cause: E,
    },
    /// Every attempt failed with a retryable error.
    #[error("failed after {attempts} attempts: {cause}")]
    Exhausted {
        /// Attempts made.
        attempts: u32,
        /// Failure returned by the final attempt.
        cause: E,
    },
    /// A backoff wait was interrupted before the next attempt.
    #[error("retry interrupted after {attempts} attempts: {cause}")]
    Interrupted {
        /// Attempts made before the interruption.
        attempts: u32,
        /// Failure that triggered the interrupted wait.
        cause: E,
    },
}

impl<E> RetryError<E> {
    /// Failure observed on the last attempt.
    pub fn cause(&self) -> &E {
        match self {
            Self::Rejected { cause, .. }
            | Self::Exhausted { cause, .. }
            | Self::Interrupted { cause, .. } => cause,
        }
    }

    /// Attempts made before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Rejected { attempts, .. }
            | Self::Exhausted { attempts, .. }
            | Self::Interrupted { attempts, .. } => *attempts,
        }
    }
}

/// Runs attempts under a [`RetryPolicy`].
#[derive(Clone)]
pub struct RetryOrchestrator {
    policy: RetryPolicy,
    sleeper: Arc<dyn BackoffSleeper>,
}

impl RetryOrchestrator {
    /// Build an orchestrator; `max_attempts` below one is treated as one.
    pub fn new(policy: RetryPolicy, sleeper: Arc<dyn BackoffSleeper>) -> Self {
        Self {
            policy: RetryPolicy {
                max_attempts: policy.max_attempts.max(1),
                ..policy
            },
            sleeper,
        }
    }

    /// Effective policy.
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Run `attempt` until it succeeds, fails terminally, or the budget runs
    /// out. `operation` labels log lines.
    ///
    /// # Errors
    ///
    /// Returns [`RetryError::Rejected`] for non-retryable failures,
    /// [`RetryError::Exhausted`] once every attempt failed, and
    /// [`RetryError::Interrupted`] when a backoff wait was cancelled.
    pub async fn execute<T, E, F, Fut>(
        &self,
        operation: &'static str,
        mut attempt: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: RetryClassification + Display + Send,
    {
        let max_attempts = self.policy.max_attempts;
        let mut attempts = 1;

        loop {
            let cause = match attempt().await {
                Ok(value) => {
                    if attempts > 1 {
                        debug!(operation, attempts, "upstream call recovered after retry");
                    }
                    return Ok(value);
                }
                Err(cause) => cause,
            };

            if !cause.is_retryable() {
                debug!(operation, attempts, error = %cause, "upstream call rejected");
                return Err(RetryError::Rejected { attempts, cause });
            }

            if attempts >= max_attempts {
                error!(operation, attempts, error = %cause, "all retry attempts failed");
                return Err(RetryError::Exhausted { attempts, cause });
            }

            let delay = self.policy.delay_after(attempts);
            warn!(
                operation,
                attempt = attempts,
                max_attempts,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %cause,
                "upstream call failed; retrying",
            );

            if self.sleeper.sleep(delay).await.is_err() {
                warn!(operation, attempts, "retry backoff interrupted");
                return Err(RetryError::Interrupted { attempts, cause });
            }
            attempts += 1;
        }
    }
}

#[cfg(test)]
mod tests;
