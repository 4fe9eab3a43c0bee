//! Google profile fetch and consent URL.

use async_trait::async_trait;
use pizzadash_core::auth::{
    parse_userinfo, AccessToken, AuthError, ProfileFetcher, Result, UserProfile,
};
use url::Url;

/// Build the implicit-flow authorization URL the browser is sent to.
///
/// The provider redirects back to `redirect_uri` with the token in the
/// fragment.
pub fn authorization_url(
    authorize_endpoint: &Url,
    client_id: &str,
    redirect_uri: &Url,
    scope: &str,
    prompt: &str,
    state: &str,
) -> Url {
    let mut url = authorize_endpoint.clone();
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri.as_str())
        .append_pair("response_type", "token")
        .append_pair("scope", scope)
        .append_pair("prompt", prompt)
        .append_pair("state", state);
    url
}

/// Calls the userinfo endpoint with a bearer token.
#[derive(Debug, Clone)]
pub struct GoogleProfileFetcher {
    http: reqwest::Client,
    userinfo_url: Url,
}

impl GoogleProfileFetcher {
    pub fn new(http: reqwest::Client, userinfo_url: Url) -> Self {
        Self { http, userinfo_url }
    }
}

#[async_trait]
impl ProfileFetcher for GoogleProfileFetcher {
    async fn fetch_profile(&self, token: AccessToken) -> Result<UserProfile> {
        let response = self
            .http
            .get(self.userinfo_url.clone())
            .bearer_auth(token.secret())
            .send()
            .await
            .map_err(|e| AuthError::ProfileFetchFailed(format!("request failed: {}", e)))?;
        drop(token);

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::ProfileFetchFailed(format!(
                "userinfo returned {}",
                status
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| AuthError::ProfileFetchFailed(format!("failed to read body: {}", e)))?;

        parse_userinfo(&body)
    }
}
