//! Response adapter: the single place where transport results become outcomes.
//!
//! Every data source issues its calls through [`ApiClient`]. Whatever happens
//! on the wire (a decoded body, an empty body, an error status, an undecodable
//! payload, an unreachable host) the caller receives an [`Outcome`]; nothing
//! above this module ever sees a [`TransportError`].
//!
//! | Response | Outcome |
//! |----------|---------|
//! | 2xx, body decodes as `T` | `Success(body)` |
//! | 2xx, no body or whitespace only | `Empty` |
//! | 2xx, body does not decode | `Failure(DECODE_FAILURE_MESSAGE, TRANSPORT_FAILURE_CODE)` |
//! | any other status | `Failure(error body message or generic text, status)` |
//! | transport error | `Failure(error text, TRANSPORT_FAILURE_CODE)` |

use std::sync::Arc;

use model::{Outcome, RequestId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::Instrument;

use crate::transport::{ApiRequest, RawResponse, Transport};

/// Failure message used when a success body cannot be decoded.
pub const DECODE_FAILURE_MESSAGE: &str = "failed to decode response body";

/// Issues requests through a [`Transport`] and adapts the results.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Executes `request` and decodes a success body as `T`.
    pub async fn call<T>(&self, request: ApiRequest) -> Outcome<T>
    where
        T: DeserializeOwned,
    {
        self.dispatch(request, adapt_response::<T>).await
    }

    /// Executes a command whose response payload the client ignores.
    ///
    /// Any 2xx becomes [`Outcome::Empty`]; failures follow the usual rules.
    pub async fn call_discarding(&self, request: ApiRequest) -> Outcome<()> {
        self.dispatch(request, adapt_discarding).await
    }

    async fn dispatch<T>(
        &self,
        request: ApiRequest,
        adapt: fn(RawResponse) -> Outcome<T>,
    ) -> Outcome<T> {
        let request_id = RequestId::new_random();
        let span = tracing::debug_span!(
            "api_call",
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
        );

        async move {
            let outcome = match self.transport.execute(request).await {
                Ok(response) => {
                    tracing::debug!(status = response.status, "response received");
                    adapt(response)
                }
                Err(error) => {
                    tracing::warn!(error = %error, "no response obtained");
                    Outcome::transport_failure(error.to_string())
                }
            };
            match &outcome {
                Outcome::Success(_) => tracing::debug!("call succeeded"),
                Outcome::Empty => tracing::debug!("call succeeded without payload"),
                Outcome::Failure { message, code } => {
                    tracing::warn!(code, reason = %message, "call failed")
                }
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

// ---------------------------------------------------------------------------
// Adaptation rules
// ---------------------------------------------------------------------------

/// Converts a raw response into an outcome, decoding success bodies as `T`.
pub fn adapt_response<T>(response: RawResponse) -> Outcome<T>
where
    T: DeserializeOwned,
{
    if !response.is_success() {
        return failure_from_status(&response);
    }
    let Some(body) = non_blank(response.body.as_deref()) else {
        return Outcome::Empty;
    };
    match serde_json::from_slice::<T>(body) {
        Ok(value) => Outcome::Success(value),
        Err(error) => {
            tracing::warn!(
                status = response.status,
                error = %error,
                "success body did not match the expected shape"
            );
            Outcome::transport_failure(DECODE_FAILURE_MESSAGE)
        }
    }
}

/// Like [`adapt_response`], but every 2xx maps to [`Outcome::Empty`].
pub fn adapt_discarding(response: RawResponse) -> Outcome<()> {
    if response.is_success() {
        Outcome::Empty
    } else {
        failure_from_status(&response)
    }
}

fn failure_from_status<T>(response: &RawResponse) -> Outcome<T> {
    let message = error_message(response.body.as_deref())
        .unwrap_or_else(|| format!("request failed with status {}", response.status));
    Outcome::failure(message, i32::from(response.status))
}

/// Error bodies are JSON objects with an optional human-readable message.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn error_message(body: Option<&[u8]>) -> Option<String> {
    let body = non_blank(body)?;
    let decoded: ErrorBody = serde_json::from_slice(body).ok()?;
    decoded.message.filter(|message| !message.trim().is_empty())
}

fn non_blank(body: Option<&[u8]>) -> Option<&[u8]> {
    body.filter(|bytes| bytes.iter().any(|b| !b.is_ascii_whitespace()))
}
