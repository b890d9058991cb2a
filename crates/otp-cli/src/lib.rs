//! # otp-cli — Command-Line Interface for the OTP Profile Toolkit
//!
//! Provides the `otp` binary.
//!
//! ## Subcommands
//!
//! - `otp login` / `otp logout` — Store or remove the session token.
//! - `otp fetch` — Send an authenticated request and print the response.
//! - `otp profile` — Show, edit and save the local profile.
//! - `otp slide` — Print the frames of a slide transition.
//!
//! ```bash
//! otp login --token abc
//! otp profile set social:twitch ashplays
//! otp profile save
//! otp slide --height 120 --force
//! ```
//!
//! ## Environment
//!
//! `OTP_API_HOST` is required by `fetch` and `profile save`. `OTP_TOKEN_PATH`
//! and `OTP_PROFILE_PATH` relocate the token and profile files.

pub mod auth;
pub mod fetch;
pub mod profile;
pub mod slide;

use std::sync::Arc;

use anyhow::{Context, Result};

use otp_client::{ClientConfig, FileCredentialStore, OtpClient};

/// The on-disk credential store every subcommand shares.
pub fn credential_store() -> FileCredentialStore {
    FileCredentialStore::new(otp_client::token_path_from_env())
}

/// Build an API client from the environment.
pub fn client_from_env() -> Result<OtpClient> {
    let config = ClientConfig::from_env().context("failed to load API configuration")?;
    let store = Arc::new(FileCredentialStore::new(config.token_path.clone()));
    tracing::debug!(api_host = %config.api_host, "client configured");
    OtpClient::new(config, store).context("failed to build API client")
}
