//! Identity bridge: script load, consent, token-for-profile exchange.

use std::sync::Arc;

use pizzadash_core::auth::{
    generate_state, mask_client_id, AuthError, BridgeState, ConsentPrompt, ConsentRequest,
    ProfileFetcher, Result, ResultCallback, ScriptHost, ScriptTag, UserProfile, SIGN_IN_SCOPE,
};

use crate::config::AuthConfig;
use crate::providers::{authorization_url, GoogleProfileFetcher, HttpScriptHost};

/// Prompt mode for interactive sign-in.
const CONSENT_PROMPT: &str = "consent";

/// Set by a successful `initialize`; its absence means logins are refused.
struct TokenClient {
    client_id: String,
    substituted: bool,
}

/// Coordinates with the identity provider to produce a user profile.
///
/// Mutating operations take `&mut self`, so a consent request cannot start
/// while another one, or the script load, is still running.
pub struct IdentityBridge {
    config: AuthConfig,
    scripts: Arc<dyn ScriptHost>,
    consent: Arc<dyn ConsentPrompt>,
    profiles: Arc<dyn ProfileFetcher>,
    state: BridgeState,
    client: Option<TokenClient>,
    on_result: Option<ResultCallback>,
}

impl IdentityBridge {
    pub fn new(
        config: AuthConfig,
        scripts: Arc<dyn ScriptHost>,
        consent: Arc<dyn ConsentPrompt>,
        profiles: Arc<dyn ProfileFetcher>,
    ) -> Self {
        Self {
            config,
            scripts,
            consent,
            profiles,
            state: BridgeState::Uninitialized,
            client: None,
            on_result: None,
        }
    }

    /// Bridge talking to the configured provider endpoints over HTTP.
    pub fn with_http(
        config: AuthConfig,
        http: reqwest::Client,
        consent: Arc<dyn ConsentPrompt>,
    ) -> Self {
        let profiles = GoogleProfileFetcher::new(http.clone(), config.endpoints.userinfo_url.clone());
        Self::new(
            config,
            Arc::new(HttpScriptHost::new(http)),
            consent,
            Arc::new(profiles),
        )
    }

    pub fn state(&self) -> &BridgeState {
        &self.state
    }

    /// Whether `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.client.is_some()
    }

    /// Whether `initialize` fell back to the development client ID.
    pub fn uses_substitute_client_id(&self) -> bool {
        self.client.as_ref().is_some_and(|c| c.substituted)
    }

    /// Make sure the identity script is loaded.
    ///
    /// Does nothing if the script is already present; otherwise issues one
    /// injection and resolves with its outcome.
    pub async fn load_script(&mut self) -> Result<()> {
        let script = ScriptTag::google_identity(self.config.endpoints.script_url.clone());
        if self.scripts.is_present(&script.id) {
            tracing::debug!(id = %script.id, "Identity script already present");
            return Ok(());
        }

        let previous = std::mem::replace(&mut self.state, BridgeState::ScriptLoading);
        match self.scripts.inject(&script).await {
            Ok(()) => {
                tracing::info!(src = %script.src, "Identity script loaded");
                self.state = previous;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, src = %script.src, "Failed to load identity script");
                self.state = BridgeState::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Resolve the client ID, load the script and register `on_result`.
    ///
    /// `on_result` is called once per consent request started by
    /// [`IdentityBridge::login`], with the profile or `None` on failure.
    pub async fn initialize(&mut self, on_result: ResultCallback) -> Result<()> {
        self.client = None;
        self.on_result = None;

        let resolution = match self.config.client_id() {
            Ok(resolution) => resolution,
            Err(e) => {
                self.state = BridgeState::Failed(e.clone());
                return Err(e);
            }
        };

        self.load_script().await?;

        tracing::info!(
            client_id = %mask_client_id(&resolution.client_id),
            substituted = resolution.substituted,
            "Initializing Google auth"
        );

        self.client = Some(TokenClient {
            client_id: resolution.client_id,
            substituted: resolution.substituted,
        });
        self.on_result = Some(on_result);
        self.state = BridgeState::Ready;
        Ok(())
    }

    /// Ask for consent and exchange the token for a profile.
    ///
    /// Fails with `NotInitialized`, without contacting the provider, unless
    /// `initialize` has completed. Otherwise exactly one consent request and
    /// at most one profile request are made, and the registered callback
    /// receives the outcome once.
    pub async fn login(&mut self) -> Result<UserProfile> {
        let client_id = match &self.client {
            Some(client) if self.state.accepts_login() => client.client_id.clone(),
            _ => {
                tracing::warn!(state = %self.state, "Login requested before initialization");
                return Err(AuthError::NotInitialized);
            }
        };

        let state = generate_state();
        let request = ConsentRequest {
            authorization_url: authorization_url(
                &self.config.endpoints.authorize_url,
                &client_id,
                &self.config.redirect_uri,
                SIGN_IN_SCOPE,
                CONSENT_PROMPT,
                &state,
            ),
            client_id,
            scope: SIGN_IN_SCOPE.to_string(),
            prompt: CONSENT_PROMPT.to_string(),
            state,
        };

        self.state = BridgeState::AwaitingUserConsent;
        let outcome = self.exchange(&request).await;

        match &outcome {
            Ok(profile) => {
                tracing::info!(user_id = %profile.id, "Profile fetched");
                self.state = BridgeState::ProfileFetched;
            }
            Err(e) => {
                tracing::error!(error = %e, "Google authentication failed");
                self.state = BridgeState::Failed(e.clone());
            }
        }

        if let Some(callback) = &self.on_result {
            callback(outcome.as_ref().ok());
        }

        outcome
    }

    async fn exchange(&mut self, request: &ConsentRequest) -> Result<UserProfile> {
        let token = self.consent.request_access_token(request).await?;
        self.state = BridgeState::TokenObtained;
        self.profiles.fetch_profile(token).await
    }

    /// Drop the callback and the token client. The script stays loaded.
    pub fn teardown(&mut self) {
        self.client = None;
        self.on_result = None;
        self.state = BridgeState::Uninitialized;
    }
}


#[cfg(all(test, feature = "mock"))]
mod http_tests {
    use super::tests::{config, FixedConsent};
    use super::*;
    use crate::mock_idp::MockIdpServer;
    use crate::providers::MockConsent;
    use pizzadash_core::config::AppMode;
    use std::sync::atomic::Ordering;
    use std::sync::Mutex;

    #[tokio::test]
    async fn test_unauthorized_profile_fetch_over_http() {
        let idp = MockIdpServer::new(0).spawn().await.unwrap();
        let config = AuthConfig::for_mock_idp(idp.base_url(), AppMode::Production, Some("client"));
        let consent = Arc::new(FixedConsent::granting("not-a-mock-token"));
        let mut bridge = IdentityBridge::with_http(config, reqwest::Client::new(), consent.clone());

        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        bridge
            .initialize(Arc::new(move |p: Option<&UserProfile>| {
                sink.lock().unwrap().push(p.cloned())
            }))
            .await
            .unwrap();

        let err = bridge.login().await.unwrap_err();
        assert_eq!(
            err,
            AuthError::ProfileFetchFailed("userinfo returned 401 Unauthorized".to_string())
        );
        assert!(matches!(bridge.state(), BridgeState::Failed(_)));
        assert_eq!(*calls.lock().unwrap(), vec![None]);
        assert_eq!(consent.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_full_flow_against_mock_idp() {
        let idp = MockIdpServer::new(0).spawn().await.unwrap();
        let http = reqwest::Client::new();
        let config = AuthConfig::for_mock_idp(idp.base_url(), AppMode::Development, None);
        let consent = MockConsent::new(http.clone(), &idp.base_url(), "ren@example.com")
            .unwrap()
            .with_name("Ren");
        let mut bridge = IdentityBridge::with_http(config, http, Arc::new(consent));

        bridge.initialize(Arc::new(|_: Option<&UserProfile>| {})).await.unwrap();
        let profile = bridge.login().await.unwrap();

        assert_eq!(profile.name, "Ren");
        assert_eq!(profile.email, "ren@example.com");
        assert_eq!(bridge.state(), &BridgeState::ProfileFetched);
    }

    #[tokio::test]
    async fn test_script_load_failure_over_http() {
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let base = url::Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap();
        let config = AuthConfig::for_mock_idp(base, AppMode::Production, Some("client"));
        let mut bridge = IdentityBridge::with_http(
            config,
            reqwest::Client::new(),
            Arc::new(FixedConsent::granting("tok")),
        );

        let err = bridge
            .initialize(Arc::new(|_: Option<&UserProfile>| {}))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::ScriptLoadFailed(_)));
    }
}
