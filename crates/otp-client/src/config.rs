//! OTP API client configuration.
//!
//! The base host is required and comes from the environment; the credential
//! header name and token file location have defaults. Override via
//! environment variables or explicit construction for testing.

use std::path::PathBuf;

use url::Url;

/// Header that carries the stored credential on every request.
pub const DEFAULT_CREDENTIAL_HEADER: &str = "x-otp-user";

/// Configuration for talking to the OTP API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base host every request path is appended to.
    pub api_host: Url,
    /// Name of the credential header.
    pub credential_header: String,
    /// Location of the persisted credential.
    pub token_path: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `OTP_API_HOST` (required)
    /// - `OTP_CREDENTIAL_HEADER` (default: `x-otp-user`)
    /// - `OTP_TOKEN_PATH` (default: `$HOME/.otp/token.json`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("OTP_API_HOST").map_err(|_| ConfigError::MissingApiHost)?;
        let api_host = parse_url("OTP_API_HOST", &raw)?;

        Ok(Self {
            api_host,
            credential_header: std::env::var("OTP_CREDENTIAL_HEADER")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CREDENTIAL_HEADER.to_string()),
            token_path: token_path_from_env(),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base` cannot be parsed.
    pub fn local_mock(base: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_host: parse_url("mock", base)?,
            credential_header: DEFAULT_CREDENTIAL_HEADER.to_string(),
            token_path: std::env::temp_dir().join("otp-mock-token.json"),
        })
    }

    /// Full URL for a request path: the host without its trailing `/`
    /// followed by the path with a leading `/`.
    pub fn endpoint_url(&self, path: &str) -> String {
        let host = self.api_host.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{host}{path}")
        } else {
            format!("{host}/{path}")
        }
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// `OTP_TOKEN_PATH`, or `$HOME/.otp/token.json` when unset.
///
/// Usable without an API host, for commands that only touch the stored
/// credential.
pub fn token_path_from_env() -> PathBuf {
    std::env::var_os("OTP_TOKEN_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(default_token_path)
}

fn default_token_path() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".otp").join("token.json")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("OTP_API_HOST environment variable is required")]
    MissingApiHost,
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
