//! In-process stand-in for the upstream employee service.
//!
//! The fake answers every request with the next scripted response, in order,
//! and records what it received so tests can assert on the traffic the
//! gateway produced. An exhausted script answers 500.

use std::collections::VecDeque;
use std::net::TcpListener;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};

/// One scripted upstream answer.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: u16,
    pub body: Value,
    pub delay: Option<Duration>,
}

impl ScriptedResponse {
    /// Success envelope carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self {
            status: 200,
            body: json!({ "data": data, "status": "Successfully processed request." }),
            delay: None,
        }
    }

    /// Failure with the given status and an error envelope.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: json!({ "data": null, "status": "Failed to process request.", "error": "scripted failure" }),
            delay: None,
        }
    }

    /// Delay the answer, e.g. to trigger client read timeouts.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Request observed by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
    pub trace_id: Option<String>,
}

#[derive(Default)]
struct Script {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running fake upstream bound to an ephemeral local port.
pub struct FakeUpstream {
    base_url: String,
    script: Arc<Script>,
    handle: ServerHandle,
}

impl FakeUpstream {
    /// Start the fake with the given script.
    pub fn start(responses: impl IntoIterator<Item = ScriptedResponse>) -> Result<Self, String> {
        let script = Arc::new(Script::default());
        script
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(responses);

        let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
        let addr = listener.local_addr().map_err(|err| err.to_string())?;
        let data = web::Data::from(script.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .disable_signals()
        .workers(1)
        .listen(listener)
        .map_err(|err| err.to_string())?
        .run();

        let handle = server.handle();
        actix_web::rt::spawn(server);

        Ok(Self {
            base_url: format!("http://{addr}/api/v1/employee"),
            script,
            handle,
        })
    }

    /// Collection URL the gateway should target.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop the listener.
    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

async fn respond(req: HttpRequest, body: web::Bytes, script: web::Data<Script>) -> HttpResponse {
    script
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_owned(),
            body: serde_json::from_slice(&body).ok(),
            trace_id: req
                .headers()
                .get("trace-id")
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned),
        });

    let next = script
        .responses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or_else(|| ScriptedResponse::status(500));
    if let Some(delay) = next.delay {
        actix_web::rt::time::sleep(delay).await;
    }
    let status = StatusCode::from_u16(next.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(next.body)
}
