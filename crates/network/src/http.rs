//! Reqwest-backed [`Transport`].
//!
//! This adapter owns transport details only: URL resolution, bearer
//! authentication, body encoding, timeouts, and mapping reqwest failures into
//! [`TransportError`]. Status codes are passed through uninterpreted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use model::CredentialSource;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Url};
use thiserror::Error;

use crate::transport::{
    ApiRequest, HttpMethod, MultipartFile, RawResponse, RequestBody, Transport, TransportError,
};

/// The transport could not be constructed.
#[derive(Debug, Error)]
pub enum TransportBuildError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP client could not be built: {0}")]
    Client(#[from] reqwest::Error),
}

/// Transport issuing HTTP requests against one base URL.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    credentials: Option<Arc<dyn CredentialSource>>,
}

impl HttpTransport {
    /// Builds a transport whose requests (including body download) time out
    /// after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when `base_url` is not an absolute http(s) URL or the
    /// reqwest client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportBuildError> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            credentials: None,
        })
    }

    /// Attaches `Authorization: Bearer` to every request for which
    /// `credentials` currently yields a token.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| TransportError::Request(format!("invalid path {path:?}: {error}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = self.resolve(&request.path)?;
        let mut builder = self
            .client
            .request(Method::from(request.method), url)
            .header(ACCEPT, "application/json");

        if let Some(token) = self
            .credentials
            .as_ref()
            .and_then(|credentials| credentials.access_token())
        {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            None => builder,
            Some(RequestBody::Json(body)) => builder.json(&body),
            Some(RequestBody::Multipart(file)) => builder.multipart(multipart_form(file)?),
        };

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(RawResponse::new(
            status,
            (!body.is_empty()).then(|| body.to_vec()),
        ))
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, TransportBuildError> {
    let invalid = |reason: String| TransportBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason,
    };
    // Without a trailing slash `Url::join` would drop the last path segment.
    let normalised = if raw.ends_with('/') {
        raw.to_owned()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalised).map_err(|error| invalid(error.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {:?}", url.scheme())));
    }
    Ok(url)
}

fn multipart_form(file: MultipartFile) -> Result<Form, TransportError> {
    let mut part = Part::bytes(file.bytes)
        .mime_str(&file.content_type)
        .map_err(|error| TransportError::Request(format!("invalid content type: {error}")))?;
    if let Some(file_name) = file.file_name {
        part = part.file_name(file_name);
    }
    Ok(Form::new().part(file.field, part))
}

fn map_transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout(error.to_string())
    } else if error.is_connect() {
        TransportError::Connect(error.to_string())
    } else if error.is_body() || error.is_decode() {
        TransportError::Body(error.to_string())
    } else {
        TransportError::Request(error.to_string())
    }
}
