//! # Authenticated Fetch
//!
//! One request against the OTP API with the stored credential attached.
//!
//! ## Header Precedence
//!
//! Caller headers are applied first. Any caller value for the credential
//! header is dropped; the header carries the stored token or is left off
//! entirely when no token is stored.
//!
//! ## Session Expiry
//!
//! A `401` response removes the stored token and yields
//! [`Fetched::Unauthorized`] instead of a body. Every other status,
//! including other error statuses, is handed back as a body.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::Serialize;

use crate::error::ClientError;
use crate::OtpClient;

/// Request parameters passed through to the transport.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Extra headers, applied before the credential header.
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the body and mark it `application/json`.
    pub fn json<T: Serialize>(self, value: &T) -> Result<Self, ClientError> {
        let body = serde_json::to_string(value)?;
        Ok(self.header(CONTENT_TYPE.as_str(), "application/json").body(body))
    }
}

/// How the response body should be handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Parse JSON-typed responses; hand back anything else raw.
    #[default]
    Parsed,
    /// Always hand back the raw response.
    Raw,
}

/// A response body after normalization.
#[derive(Debug)]
pub enum ResponseBody {
    /// A JSON-typed response, parsed.
    Json(serde_json::Value),
    /// The untouched response.
    Raw(reqwest::Response),
}

/// Outcome of an authenticated request.
#[derive(Debug)]
pub enum Fetched {
    Body(ResponseBody),
    /// The server rejected the credential; the stored token has been cleared.
    Unauthorized,
}

impl Fetched {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// The parsed JSON body, if the response was JSON-typed and parsed.
    pub fn into_json(self) -> Option<serde_json::Value> {
        match self {
            Self::Body(ResponseBody::Json(value)) => Some(value),
            _ => None,
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

pub(crate) fn endpoint_label(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

/// Parse a JSON-typed body in `Parsed` mode; hand anything else back raw.
pub(crate) async fn read_body(
    response: reqwest::Response,
    mode: ResponseMode,
    endpoint: String,
) -> Result<ResponseBody, ClientError> {
    if mode == ResponseMode::Parsed && is_json(response.headers()) {
        let value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|source| ClientError::Deserialization { endpoint, source })?;
        return Ok(ResponseBody::Json(value));
    }
    Ok(ResponseBody::Raw(response))
}

impl OtpClient {
    /// Send a request to `path` on the configured API host.
    ///
    /// # Errors
    ///
    /// Transport failures surface as [`ClientError::Http`]; a JSON-typed
    /// body that fails to parse surfaces as [`ClientError::Deserialization`].
    /// The request is never retried.
    pub async fn fetch(
        &self,
        path: &str,
        options: RequestOptions,
        mode: ResponseMode,
    ) -> Result<Fetched, ClientError> {
        let endpoint = endpoint_label(&options.method, path);
        match self.send(path, options).await? {
            Some(response) => Ok(Fetched::Body(read_body(response, mode, endpoint).await?)),
            None => Ok(Fetched::Unauthorized),
        }
    }

    /// Send the request with the credential attached. `None` means the
    /// server answered `401` and the stored token has been cleared.
    pub(crate) async fn send(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<reqwest::Response>, ClientError> {
        let endpoint = endpoint_label(&options.method, path);
        let url = self.config.endpoint_url(path);

        let mut headers = HeaderMap::new();
        for (name, value) in &options.headers {
            let invalid = || ClientError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            headers.insert(header_name, header_value);
        }
        // Only the stored token may travel in the credential header.
        headers.remove(&self.credential_header);

        let token = self.credentials.get()?;
        if let Some(token) = &token {
            let mut value =
                HeaderValue::from_str(token.expose()).map_err(|_| ClientError::InvalidHeader {
                    name: self.credential_header.to_string(),
                })?;
            value.set_sensitive(true);
            headers.insert(self.credential_header.clone(), value);
        }

        tracing::debug!(%endpoint, authenticated = token.is_some(), "sending request");

        let mut request = self.http.request(options.method, &url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Http { endpoint: endpoint.clone(), source })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!(%endpoint, "credential rejected, clearing stored token");
            self.credentials.clear()?;
            return Ok(None);
        }
        Ok(Some(response))
    }
}
