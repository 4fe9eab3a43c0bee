//! Interactive consent through the system browser.

use async_trait::async_trait;
use dialoguer::Input;
use pizzadash_core::auth::{parse_token_redirect, AccessToken, AuthError, ConsentPrompt, ConsentRequest};
use url::Url;

/// Opens the consent page and asks the user to paste the redirect URL back.
///
/// The token is read from the pasted URL's fragment and only accepted when
/// its `state` matches the one sent with the request.
#[derive(Debug, Clone)]
pub struct BrowserConsent {
    open_browser: bool,
}

impl BrowserConsent {
    pub fn new(open_browser: bool) -> Self {
        Self { open_browser }
    }
}

impl Default for BrowserConsent {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl ConsentPrompt for BrowserConsent {
    async fn request_access_token(
        &self,
        request: &ConsentRequest,
    ) -> pizzadash_core::auth::Result<AccessToken> {
        let url = request.authorization_url.clone();
        let open_browser = self.open_browser;

        let pasted = tokio::task::spawn_blocking(move || prompt_for_redirect(&url, open_browser))
            .await
            .map_err(|e| AuthError::Provider(format!("consent prompt task failed: {}", e)))??;

        parse_token_redirect(&pasted, &request.state)
    }
}

fn prompt_for_redirect(url: &Url, open_browser: bool) -> pizzadash_core::auth::Result<String> {
    if open_browser {
        match open::that(url.as_str()) {
            Ok(()) => tracing::info!("Browser opened for Google sign-in"),
            Err(e) => tracing::warn!(error = %e, "Failed to open browser"),
        }
    }
    eprintln!("Sign in with Google at:\n\n  {}\n", url);

    Input::<String>::new()
        .with_prompt("Paste the URL you were redirected to")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| AuthError::ConsentDenied(format!("prompt aborted: {}", e)))
}
