//! Builders wiring the upstream adapter, retry policy and service into HTTP
//! handler state.

use std::sync::Arc;

use actix_web::web;
use tokio::sync::watch;
use tracing::info;

use employee_gateway::domain::EmployeeService;
use employee_gateway::domain::retry::{RetryOrchestrator, TokioSleeper};
use employee_gateway::inbound::http::state::HttpState;
use employee_gateway::outbound::employee_store::HttpEmployeeStore;
use employee_gateway::settings::GatewayConfig;

/// Build handler state backed by the upstream HTTP store.
///
/// # Errors
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(crate) fn build_http_state(
    gateway: &GatewayConfig,
    shutdown: watch::Receiver<bool>,
) -> std::io::Result<web::Data<HttpState>> {
    let store = HttpEmployeeStore::new(gateway.upstream.clone()).map_err(|e| {
        std::io::Error::other(format!("failed to build upstream HTTP client: {e}"))
    })?;
    let retry = RetryOrchestrator::new(
        gateway.retry,
        Arc::new(TokioSleeper::with_shutdown(shutdown)),
    );
    let policy = retry.policy();
    info!(
        upstream = %store.base_url(),
        max_attempts = policy.max_attempts,
        base_delay_ms = u64::try_from(policy.base_delay.as_millis()).unwrap_or(u64::MAX),
        "employee store configured"
    );
    let service = EmployeeService::new(Arc::new(store), retry);
    Ok(web::Data::new(HttpState::new(Arc::new(service))))
}
