//! Loopback HTTP server for exercising the real transport in tests.
//!
//! An axum router answers every route with the next enqueued response, in
//! order. Every request is recorded so tests can assert on what was actually
//! sent.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A canned response.
#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    status: u16,
    body: Option<String>,
}

impl ScriptedResponse {
    pub fn new(status: u16) -> Self {
        Self { status, body: None }
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

impl IntoResponse for ScriptedResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.body {
            Some(body) => (status, [(header::CONTENT_TYPE, "application/json")], body).into_response(),
            None => status.into_response(),
        }
    }
}

/// A request as received by the server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Header names are lower-cased.
    pub headers: Vec<(String, String)>,
    /// Body bytes after transfer decoding.
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Default)]
struct Script {
    responses: Mutex<VecDeque<ScriptedResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct ScriptedServer {
    base_url: String,
    script: Arc<Script>,
    task: JoinHandle<()>,
}

impl ScriptedServer {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let script = Arc::new(Script::default());

        let router = Router::new()
            .fallback(respond)
            .with_state(Arc::clone(&script));
        let task = tokio::spawn(async move {
            if let Err(error) = axum::serve(listener, router).await {
                tracing::warn!(error = %error, "scripted server stopped");
            }
        });

        Ok(Self {
            base_url,
            script,
            task,
        })
    }

    /// Returns a loopback address nothing is listening on.
    pub async fn unused_address() -> std::io::Result<SocketAddr> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        listener.local_addr()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn enqueue(&self, response: ScriptedResponse) {
        self.script
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for ScriptedServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn respond(
    State(script): State<Arc<Script>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> ScriptedResponse {
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_owned(), value.to_owned()))
        })
        .collect();
    script
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedRequest {
            method: method.as_str().to_owned(),
            path: uri.path().to_owned(),
            headers,
            body: body.to_vec(),
        });

    script
        .responses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
        .unwrap_or_else(|| ScriptedResponse::new(500).with_body("no scripted response"))
}
