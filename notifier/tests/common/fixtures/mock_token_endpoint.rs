//! Mock Microsoft identity platform token endpoint
//!
//! Responses are selected by the refresh token in the form body, so one
//! server can play a valid and a revoked credential in the same test.

use notifier::config::OutlookConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_TENANT: &str = "test-tenant";
pub const TOKEN_PATH: &str = "/test-tenant/oauth2/v2.0/token";

pub struct MockTokenEndpoint {
    pub server: MockServer,
}

impl MockTokenEndpoint {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Outlook settings pointing the token client at this server
    pub fn outlook_config(&self) -> OutlookConfig {
        OutlookConfig {
            client_id: "test-client-id".to_string(),
            tenant: TEST_TENANT.to_string(),
            authority: self.server.uri(),
            scopes: "offline_access".to_string(),
            client_secret: "test-client-secret".to_string(),
        }
    }

    /// Grants an access token for `refresh_token`
    pub async fn mock_valid(&self, refresh_token: &str) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains(format!("refresh_token={}", refresh_token)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "access_token": format!("access-for-{}", refresh_token),
                "expires_in": 3599
            })))
            .mount(&self.server)
            .await;
    }

    /// Rejects `refresh_token` with an OAuth2 error body
    pub async fn mock_rejected(&self, refresh_token: &str, code: &str, description: &str) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains(format!("refresh_token={}", refresh_token)))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": code,
                "error_description": description
            })))
            .mount(&self.server)
            .await;
    }

    /// Answers `refresh_token` only after `delay`
    pub async fn mock_slow(&self, refresh_token: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .and(body_string_contains(format!("refresh_token={}", refresh_token)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "access_token": "late" }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }

    /// Answers every request with a non-JSON server error
    pub async fn mock_server_error(&self) {
        Mock::given(method("POST"))
            .and(path(TOKEN_PATH))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&self.server)
            .await;
    }

    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}
