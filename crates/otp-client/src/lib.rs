//! # otp-client — Authenticated OTP API Access
//!
//! Every network call the app makes goes through [`OtpClient::fetch`]: it
//! joins the path onto the configured host, attaches the stored session
//! token, clears that token when the server answers `401`, and parses
//! JSON-typed bodies.
//!
//! ```no_run
//! use std::sync::Arc;
//! use otp_client::{ClientConfig, MemoryCredentialStore, OtpClient, RequestOptions, ResponseMode, Token};
//!
//! # async fn run() -> Result<(), otp_client::ClientError> {
//! let store = Arc::new(MemoryCredentialStore::with_token(Token::new("abc")));
//! let client = OtpClient::new(ClientConfig::from_env()?, store)?;
//! let fetched = client.fetch("/profile", RequestOptions::get(), ResponseMode::Parsed).await?;
//! if fetched.is_unauthorized() {
//!     // send the user back to sign-in
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Policy
//!
//! - No timeouts and no retries: one call, one request.
//! - The token never appears in logs or `Debug` output.

pub mod config;
pub mod credentials;
pub mod error;
pub mod fetch;
pub mod profile;

pub use config::{token_path_from_env, ClientConfig, ConfigError, DEFAULT_CREDENTIAL_HEADER};
pub use credentials::{
    CredentialError, CredentialStore, FileCredentialStore, MemoryCredentialStore, Token,
};
pub use error::ClientError;
pub use fetch::{Fetched, RequestOptions, ResponseBody, ResponseMode};
pub use profile::{SaveOutcome, PROFILE_PATH};

use std::sync::Arc;

use reqwest::header::HeaderName;

/// Client for the OTP API.
#[derive(Debug, Clone)]
pub struct OtpClient {
    http: reqwest::Client,
    config: ClientConfig,
    credential_header: HeaderName,
    credentials: Arc<dyn CredentialStore>,
}

impl OtpClient {
    /// Create a client from configuration and a credential store.
    pub fn new(
        config: ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ClientError> {
        let credential_header = HeaderName::from_bytes(config.credential_header.as_bytes())
            .map_err(|_| ClientError::InvalidHeader {
                name: config.credential_header.clone(),
            })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            config,
            credential_header,
            credentials,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The store the session token is read from and cleared in.
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }
}
