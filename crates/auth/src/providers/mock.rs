//! Consent against the mock IdP for development and testing.
//!
//! Mock access tokens are base64-encoded JSON identities, so the mock IdP can
//! answer userinfo requests without keeping any state.

use async_trait::async_trait;
use base64::Engine;
use pizzadash_core::auth::{AccessToken, AuthError, ConsentPrompt, ConsentRequest, Result};
use serde::{Deserialize, Serialize};
use url::Url;

const MOCK_PICTURE: &str = "https://www.gravatar.com/avatar/?d=mp";

/// The identity a mock token stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockIdentity {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub picture: String,
}

impl MockIdentity {
    /// Identity for `email`; the name defaults to the email's local part.
    pub fn new(email: &str, name: Option<&str>) -> Self {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or("User").to_string());
        Self {
            sub: format!("mock-google-{}", email),
            email: email.to_string(),
            name,
            picture: MOCK_PICTURE.to_string(),
        }
    }
}

pub fn encode_mock_token(identity: &MockIdentity) -> String {
    let json = serde_json::to_vec(identity).unwrap_or_default();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json)
}

pub fn decode_mock_token(token: &str) -> Option<MockIdentity> {
    let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(token)
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

/// Non-interactive consent: asks the mock IdP's token endpoint for a token.
#[derive(Debug, Clone)]
pub struct MockConsent {
    http: reqwest::Client,
    token_url: Url,
    email: String,
    name: Option<String>,
    deny: bool,
}

impl MockConsent {
    pub fn new(http: reqwest::Client, idp_base: &Url, email: impl Into<String>) -> Result<Self> {
        let token_url = idp_base
            .join("/token")
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(Self {
            http,
            token_url,
            email: email.into(),
            name: None,
            deny: false,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Simulate the user refusing consent.
    pub fn denying(mut self) -> Self {
        self.deny = true;
        self
    }
}

#[async_trait]
impl ConsentPrompt for MockConsent {
    async fn request_access_token(&self, request: &ConsentRequest) -> Result<AccessToken> {
        let mut form = vec![
            ("client_id", request.client_id.clone()),
            ("scope", request.scope.clone()),
            ("email", self.email.clone()),
        ];
        if let Some(name) = &self.name {
            form.push(("name", name.clone()));
        }
        if self.deny {
            form.push(("deny", "true".to_string()));
        }

        let response = self
            .http
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::Provider(format!("token request failed: {}", e)))?;

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("invalid token response: {}", e)))?;

        match (body.access_token, body.error) {
            (_, Some(error)) => Err(AuthError::ConsentDenied(error)),
            (Some(token), None) => Ok(AccessToken::new(token)),
            (None, None) => Err(AuthError::Provider("token response has no token".to_string())),
        }
    }
}
