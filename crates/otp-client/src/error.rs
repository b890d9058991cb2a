//! OTP client error types.

use crate::credentials::CredentialError;

/// Errors from authenticated OTP API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// A JSON-typed response body could not be parsed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// A caller-supplied header name or value is not valid HTTP.
    #[error("invalid header {name}")]
    InvalidHeader { name: String },
    /// The request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
    /// The credential store failed.
    #[error("credential store error: {0}")]
    Credential(#[from] CredentialError),
    /// The profile store failed.
    #[error("profile error: {0}")]
    Profile(#[from] otp_core::ProfileError),
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}
