//! Profile persistence against `POST /profile`.

use otp_core::{ProfilePayload, ProfileStore, SettingsForm};

use crate::error::ClientError;
use reqwest::StatusCode;

use crate::fetch::{endpoint_label, read_body, RequestOptions, ResponseBody, ResponseMode};
use crate::OtpClient;

/// Path the settings form saves to.
pub const PROFILE_PATH: &str = "/profile";

/// Result of a profile save.
#[derive(Debug)]
pub enum SaveOutcome {
    /// The server accepted the request and answered with this body.
    Saved(ResponseBody),
    /// The server answered with a non-success status; nothing was saved.
    Rejected {
        status: StatusCode,
        body: ResponseBody,
    },
    /// The session expired; the user has to sign in again.
    ReauthRequired,
}

impl OtpClient {
    /// Send `payload` as the new profile.
    pub async fn save_profile(&self, payload: &ProfilePayload) -> Result<SaveOutcome, ClientError> {
        let options = RequestOptions::post().json(payload)?;
        let endpoint = endpoint_label(&options.method, PROFILE_PATH);
        let Some(response) = self.send(PROFILE_PATH, options).await? else {
            return Ok(SaveOutcome::ReauthRequired);
        };

        let status = response.status();
        let body = read_body(response, ResponseMode::Parsed, endpoint).await?;
        if status.is_success() {
            tracing::info!("profile saved");
            Ok(SaveOutcome::Saved(body))
        } else {
            tracing::warn!(%status, "profile save rejected");
            Ok(SaveOutcome::Rejected { status, body })
        }
    }

    /// Save whatever the settings form currently holds.
    pub async fn submit_settings<S: ProfileStore>(
        &self,
        form: &SettingsForm<S>,
    ) -> Result<SaveOutcome, ClientError> {
        let payload = form.payload()?;
        self.save_profile(&payload).await
    }
}
