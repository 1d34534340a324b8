//! Unit tests for retry orchestration.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::EmployeeStoreError;
use crate::test_support::retry::{InterruptingSleeper, RecordingSleeper};

const BASE: Duration = Duration::from_millis(1_000);

struct ScriptedAttempts {
    outcomes: Mutex<VecDeque<Result<&'static str, EmployeeStoreError>>>,
    calls: AtomicU32,
}

impl ScriptedAttempts {
    fn new(outcomes: Vec<Result<&'static str, EmployeeStoreError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            calls: AtomicU32::new(0),
        }
    }

    async fn attempt(&self) -> Result<&'static str, EmployeeStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcomes
            .lock()
            .expect("outcomes mutex")
            .pop_front()
            .expect("scripted outcome available")
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

fn status(code: u16) -> EmployeeStoreError {
    EmployeeStoreError::status(code, "")
}

#[fixture]
fn sleeper() -> Arc<RecordingSleeper> {
    Arc::new(RecordingSleeper::default())
}

fn orchestrator(sleeper: Arc<RecordingSleeper>) -> RetryOrchestrator {
    RetryOrchestrator::new(
        RetryPolicy {
            max_attempts: 3,
            base_delay: BASE,
        },
        sleeper,
    )
}

#[rstest]
#[tokio::test]
async fn succeeds_on_third_attempt_with_linear_backoff(sleeper: Arc<RecordingSleeper>) {
    let script = ScriptedAttempts::new(vec![Err(status(503)), Err(status(503)), Ok("done")]);

    let outcome = orchestrator(sleeper.clone())
        .execute("probe", || script.attempt())
        .await
        .expect("third attempt succeeds");

    assert_eq!(outcome, "done");
    assert_eq!(script.calls(), 3);
    assert_eq!(sleeper.delays(), vec![BASE, BASE * 2]);
}

#[rstest]
#[tokio::test]
async fn exhausts_budget_on_persistent_rate_limiting(sleeper: Arc<RecordingSleeper>) {
    let script = ScriptedAttempts::new(vec![Err(status(429)), Err(status(429)), Err(status(429))]);

    let error = orchestrator(sleeper.clone())
        .execute("probe", || script.attempt())
        .await
        .expect_err("retries exhausted");

    assert!(matches!(error, RetryError::Exhausted { attempts: 3, .. }));
    assert_eq!(error.cause().status_code(), Some(429));
    assert_eq!(script.calls(), 3);
    assert_eq!(sleeper.delays(), vec![BASE, BASE * 2]);
}

#[rstest]
#[case::not_found(404)]
#[case::bad_request(400)]
#[case::unprocessable(422)]
#[tokio::test]
async fn client_errors_fail_without_backoff(sleeper: Arc<RecordingSleeper>, #[case] code: u16) {
    let script = ScriptedAttempts::new(vec![Err(status(code))]);

    let error = orchestrator(sleeper.clone())
        .execute("probe", || script.attempt())
        .await
        .expect_err("client error is terminal");

    assert!(matches!(error, RetryError::Rejected { attempts: 1, .. }));
    assert_eq!(error.cause().status_code(), Some(code));
    assert_eq!(script.calls(), 1);
    assert!(sleeper.delays().is_empty());
}

#[rstest]
#[tokio::test]
async fn connectivity_failures_are_retried(sleeper: Arc<RecordingSleeper>) {
    let script = ScriptedAttempts::new(vec![
        Err(EmployeeStoreError::transport("connection refused")),
        Err(EmployeeStoreError::timeout("read timed out")),
        Ok("done"),
    ]);

    let outcome = orchestrator(sleeper.clone())
        .execute("probe", || script.attempt())
        .await;

    assert_eq!(outcome.expect("recovers"), "done");
    assert_eq!(sleeper.delays().len(), 2);
}

#[rstest]
#[tokio::test]
async fn rejection_after_retry_stops_immediately(sleeper: Arc<RecordingSleeper>) {
    let script = ScriptedAttempts::new(vec![Err(status(500)), Err(status(404))]);

    let error = orchestrator(sleeper.clone())
        .execute("probe", || script.attempt())
        .await
        .expect_err("404 is terminal");

    assert!(matches!(error, RetryError::Rejected { attempts: 2, .. }));
    assert_eq!(sleeper.delays(), vec![BASE]);
}

#[tokio::test]
async fn interrupted_backoff_is_terminal() {
    let sleeper = Arc::new(InterruptingSleeper::default());
    let script = ScriptedAttempts::new(vec![Err(status(503)), Ok("never reached")]);
    let orchestrator = RetryOrchestrator::new(RetryPolicy::default(), sleeper.clone());

    let error = orchestrator
        .execute("probe", || script.attempt())
        .await
        .expect_err("interruption is terminal");

    assert!(matches!(error, RetryError::Interrupted { attempts: 1, .. }));
    assert_eq!(script.calls(), 1);
    assert_eq!(sleeper.delays(), vec![BASE]);
}

#[rstest]
#[tokio::test]
async fn zero_attempt_budget_still_runs_once(sleeper: Arc<RecordingSleeper>) {
    let script = ScriptedAttempts::new(vec![Err(status(503))]);
    let orchestrator = RetryOrchestrator::new(
        RetryPolicy {
            max_attempts: 0,
            base_delay: BASE,
        },
        sleeper.clone(),
    );

    let error = orchestrator
        .execute("probe", || script.attempt())
        .await
        .expect_err("single attempt fails");

    assert_eq!(orchestrator.policy().max_attempts, 1);
    assert!(matches!(error, RetryError::Exhausted { attempts: 1, .. }));
    assert!(sleeper.delays().is_empty());
}

#[rstest]
fn exhausted_error_message_names_attempts() {
    let error = RetryError::Exhausted {
        attempts: 3,
        cause: status(503),
    };
    assert_eq!(
        error.to_string(),
        "failed after 3 attempts: upstream responded with status 503: "
    );
}

#[rstest]
#[case(1, Duration::from_millis(250))]
#[case(2, Duration::from_millis(500))]
#[case(4, Duration::from_millis(1_000))]
fn delay_grows_linearly_with_attempt(#[case] attempt: u32, #[case] expected: Duration) {
    let policy = RetryPolicy {
        max_attempts: 5,
        base_delay: Duration::from_millis(250),
    };
    assert_eq!(policy.delay_after(attempt), expected);
}
