//! Tests for saving the settings form to `POST /profile`.

use std::sync::Arc;

use otp_client::{
    ClientConfig, CredentialStore, MemoryCredentialStore, OtpClient, ResponseBody, SaveOutcome,
    Token,
};
use otp_core::{InMemoryProfileStore, SettingsForm};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn filled_form() -> SettingsForm<InMemoryProfileStore> {
    let mut form = SettingsForm::new(InMemoryProfileStore::default());
    form.set_display_name("Ash").unwrap();
    form.set_rank("Diamond").unwrap();
    form.set_social("twitch", "ashplays").unwrap();
    form.set_main_att("Thermite").unwrap();
    form.set_main_def("Jager").unwrap();
    form.set_picture("banner", "https://img/b.png").unwrap();
    form
}

#[tokio::test]
async fn submit_posts_camel_case_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/profile"))
        .and(header("content-type", "application/json"))
        .and(header("x-otp-user", "abc"))
        .and(body_json(serde_json::json!({
            "displayName": "Ash",
            "rank": "Diamond",
            "socials": {"twitch": "ashplays"},
            "mainAtt": "Thermite",
            "mainDef": "Jager"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"saved": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_token(Token::new("abc")));
    let client = OtpClient::new(ClientConfig::local_mock(&mock_server.uri()).unwrap(), store).unwrap();

    match client.submit_settings(&filled_form()).await.unwrap() {
        SaveOutcome::Saved(ResponseBody::Json(body)) => assert_eq!(body["saved"], true),
        other => panic!("expected saved JSON body, got {other:?}"),
    }
}

#[tokio::test]
async fn expired_session_requires_reauth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/profile"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_token(Token::new("stale")));
    let client =
        OtpClient::new(ClientConfig::local_mock(&mock_server.uri()).unwrap(), store.clone())
            .unwrap();

    let outcome = client.save_profile(&filled_form().payload().unwrap()).await.unwrap();
    assert!(matches!(outcome, SaveOutcome::ReauthRequired));
    assert!(store.get().unwrap().is_none());
}

#[tokio::test]
async fn server_error_is_rejected_not_saved() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/profile"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"error": "db down"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(MemoryCredentialStore::with_token(Token::new("abc")));
    let client =
        OtpClient::new(ClientConfig::local_mock(&mock_server.uri()).unwrap(), store.clone())
            .unwrap();

    match client.submit_settings(&filled_form()).await.unwrap() {
        SaveOutcome::Rejected {
            status,
            body: ResponseBody::Json(body),
        } => {
            assert_eq!(status, 500);
            assert_eq!(body["error"], "db down");
        }
        other => panic!("expected rejected save, got {other:?}"),
    }
    assert!(store.get().unwrap().is_some());
}
