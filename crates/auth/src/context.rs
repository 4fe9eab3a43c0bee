//! Auth context: session, identity bridge and the messages shown to the user.

use std::sync::Arc;

use pizzadash_core::auth::{
    AuthError, ConsentPrompt, KeyValueStore, ProfileFetcher, Result, ResultCallback, ScriptHost,
    UserProfile, UserRecord,
};
use pizzadash_core::routes::{Navigator, Route};

use crate::bridge::IdentityBridge;
use crate::config::AuthConfig;
use crate::providers::{GoogleProfileFetcher, HttpScriptHost};
use crate::session::SessionStore;

/// Shown while the development client ID stands in for a configured one.
pub const SUBSTITUTE_CLIENT_ID_WARNING: &str =
    "GOOGLE_CLIENT_ID is not set; using a mock client ID for development";

/// Collaborators an [`AuthContext`] is built from.
pub struct AuthDeps {
    pub store: Arc<dyn KeyValueStore>,
    pub scripts: Arc<dyn ScriptHost>,
    pub consent: Arc<dyn ConsentPrompt>,
    pub profiles: Arc<dyn ProfileFetcher>,
    pub navigator: Arc<dyn Navigator>,
}

impl AuthDeps {
    /// Script host and profile fetcher backed by `http`, aimed at the
    /// endpoints in `config`.
    pub fn with_http(
        config: &AuthConfig,
        http: reqwest::Client,
        store: Arc<dyn KeyValueStore>,
        consent: Arc<dyn ConsentPrompt>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            scripts: Arc::new(HttpScriptHost::new(http.clone())),
            consent,
            profiles: Arc::new(GoogleProfileFetcher::new(
                http,
                config.endpoints.userinfo_url.clone(),
            )),
            navigator,
        }
    }
}

/// Outcome of the protected-route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Startup has not finished; render nothing yet.
    Pending,
    Granted,
    /// No session. The navigator has been sent to the sign-in page.
    Denied,
}

/// What the sign-in page should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInView {
    /// Already signed in; the navigator has been sent to the dashboard.
    Redirected,
    Form {
        /// Sign-in cannot work with the current configuration.
        blocked: bool,
        error: Option<&'static str>,
    },
}

/// Owns everything the views need to know about authentication.
pub struct AuthContext {
    config: AuthConfig,
    bridge: IdentityBridge,
    store: Arc<dyn KeyValueStore>,
    session: Option<SessionStore>,
    navigator: Arc<dyn Navigator>,
    error: Option<AuthError>,
    warning: Option<&'static str>,
    initializing: bool,
    loading: bool,
}

impl AuthContext {
    /// Build the context. Nothing is loaded until [`AuthContext::start`].
    pub fn new(config: AuthConfig, deps: AuthDeps) -> Self {
        let bridge = IdentityBridge::new(config.clone(), deps.scripts, deps.consent, deps.profiles);
        Self {
            config,
            bridge,
            store: deps.store,
            session: None,
            navigator: deps.navigator,
            error: None,
            warning: None,
            initializing: true,
            loading: false,
        }
    }

    /// Restore the stored session and initialize the identity bridge.
    ///
    /// Failures are recorded as the current error; none of them is fatal.
    pub async fn start(&mut self) {
        self.initializing = true;
        self.hydrate_session().await;

        let on_result: ResultCallback = Arc::new(|profile: Option<&UserProfile>| match profile {
            Some(profile) => tracing::debug!(user_id = %profile.id, "Google auth result received"),
            None => tracing::debug!("Google auth returned no profile"),
        });

        match self.bridge.initialize(on_result).await {
            Ok(()) => {
                self.error = None;
                self.warning = self
                    .bridge
                    .uses_substitute_client_id()
                    .then_some(SUBSTITUTE_CLIENT_ID_WARNING);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Google auth");
                self.error = Some(e);
                self.warning = None;
            }
        }

        self.initializing = false;
    }

    /// Restore the stored session without touching the identity provider.
    ///
    /// Enough for views that only need to know who is signed in.
    pub async fn restore_session(&mut self) {
        self.hydrate_session().await;
        self.initializing = false;
    }

    async fn hydrate_session(&mut self) {
        if self.session.is_none() {
            self.session =
                Some(SessionStore::hydrate(self.store.clone(), self.navigator.clone()).await);
        }
    }

    /// Run an interactive sign-in.
    ///
    /// On success the user is stored and the navigator is sent to the
    /// dashboard. On failure the error becomes the current message.
    pub async fn login(&mut self) -> Result<UserRecord> {
        self.error = None;
        self.loading = true;
        let outcome = self.sign_in().await;
        self.loading = false;

        match outcome {
            Ok(record) => {
                self.navigator.navigate(Route::Dashboard);
                Ok(record)
            }
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    async fn sign_in(&mut self) -> Result<UserRecord> {
        if self.session.is_none() {
            return Err(AuthError::NotInitialized);
        }
        let profile = self.bridge.login().await?;
        let record = UserRecord::from(profile);
        if let Some(session) = self.session.as_mut() {
            session.set(record.clone()).await?;
        }
        Ok(record)
    }

    /// Sign out and return to the landing page.
    pub async fn logout(&mut self) -> Result<()> {
        match self.session.as_mut() {
            Some(session) => session.clear().await,
            None => Err(AuthError::NotInitialized),
        }
    }

    /// Guard for protected routes.
    pub fn require_session(&self) -> Access {
        if self.initializing {
            return Access::Pending;
        }
        if self.user().is_some() {
            Access::Granted
        } else {
            tracing::debug!("No session, redirecting to sign-in");
            self.navigator.navigate(Route::SignIn);
            Access::Denied
        }
    }

    /// State of the sign-in page.
    pub fn sign_in_view(&self) -> SignInView {
        if self.user().is_some() {
            self.navigator.navigate(Route::Dashboard);
            return SignInView::Redirected;
        }
        SignInView::Form {
            blocked: self.error.as_ref().is_some_and(AuthError::is_blocking),
            error: self.error_message(),
        }
    }

    pub fn user(&self) -> Option<&UserRecord> {
        self.session.as_ref().and_then(SessionStore::get)
    }

    pub fn last_error(&self) -> Option<&AuthError> {
        self.error.as_ref()
    }

    /// The single user-visible message for the last failure.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.as_ref().map(AuthError::user_message)
    }

    /// Non-blocking notice from the last `start`.
    pub fn warning(&self) -> Option<&'static str> {
        self.warning
    }

    pub fn is_initializing(&self) -> bool {
        self.initializing
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn bridge(&self) -> &IdentityBridge {
        &self.bridge
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn teardown(&mut self) {
        self.bridge.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::tests::{config, profile, CountingScripts, FixedConsent, FixedProfiles};
    use crate::navigation::History;
    use crate::stores::MemoryStore;
    use pizzadash_core::auth::{BridgeState, USER_STORAGE_KEY};
    use pizzadash_core::config::AppMode;

    struct Harness {
        context: AuthContext,
        store: MemoryStore,
        history: History,
    }

    fn harness(config: AuthConfig, consent: FixedConsent, profiles: FixedProfiles) -> Harness {
        let store = MemoryStore::new();
        let history = History::default();
        let deps = AuthDeps {
            store: Arc::new(store.clone()),
            scripts: Arc::new(CountingScripts::default()),
            consent: Arc::new(consent),
            profiles: Arc::new(profiles),
            navigator: Arc::new(history.clone()),
        };
        Harness {
            context: AuthContext::new(config, deps),
            store,
            history,
        }
    }

    fn happy(mode: AppMode, client_id: Option<&str>) -> Harness {
        harness(
            config(mode, client_id),
            FixedConsent::granting("tok"),
            FixedProfiles::returning(Ok(profile())),
        )
    }

    #[tokio::test]
    async fn test_guard_pending_until_started() {
        let mut h = happy(AppMode::Production, Some("client"));
        assert!(h.context.is_initializing());
        assert_eq!(h.context.require_session(), Access::Pending);
        assert_eq!(h.history.entries(), vec![Route::Landing]);

        h.context.start().await;
        assert!(!h.context.is_initializing());
        assert_eq!(h.context.require_session(), Access::Denied);
        assert_eq!(h.history.current(), Route::SignIn);
    }

    #[tokio::test]
    async fn test_login_stores_session_and_opens_dashboard() {
        let mut h = happy(AppMode::Production, Some("client"));
        h.context.start().await;
        assert_eq!(h.context.warning(), None);

        let record = h.context.login().await.unwrap();
        assert_eq!(record.id, "sub-42");
        assert_eq!(record.image.as_deref(), Some("https://example.com/g.png"));
        assert_eq!(h.history.current(), Route::Dashboard);
        assert_eq!(h.context.require_session(), Access::Granted);
        assert!(!h.context.is_loading());
        assert!(h.store.get_item(USER_STORAGE_KEY).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_development_without_client_id_signs_in() {
        let mut h = happy(AppMode::Development, None);
        h.context.start().await;
        assert_eq!(h.context.last_error(), None);
        assert_eq!(h.context.warning(), Some(SUBSTITUTE_CLIENT_ID_WARNING));
        assert_eq!(h.context.bridge().state(), &BridgeState::Ready);
        assert_eq!(
            h.context.sign_in_view(),
            SignInView::Form {
                blocked: false,
                error: None,
            }
        );

        h.context.login().await.unwrap();
        assert_eq!(h.context.user().map(|u| u.id.as_str()), Some("sub-42"));
    }

    #[tokio::test]
    async fn test_production_without_client_id_blocks_sign_in() {
        let mut h = happy(AppMode::Production, None);
        h.context.start().await;

        assert_eq!(h.context.last_error(), Some(&AuthError::ConfigurationMissing));
        assert_eq!(h.context.warning(), None);
        assert_eq!(
            h.context.sign_in_view(),
            SignInView::Form {
                blocked: true,
                error: Some(
                    "Configuration error: Google Client ID not found. Please check your environment variables."
                ),
            }
        );

        let err = h.context.login().await.unwrap_err();
        assert_eq!(err, AuthError::NotInitialized);
        assert_eq!(
            h.context.error_message(),
            Some("Google authentication not initialized")
        );
    }

    #[tokio::test]
    async fn test_failed_login_sets_message() {
        let mut h = harness(
            config(AppMode::Production, Some("client")),
            FixedConsent::failing(AuthError::ConsentDenied("access_denied".into())),
            FixedProfiles::returning(Ok(profile())),
        );
        h.context.start().await;

        assert!(h.context.login().await.is_err());
        assert_eq!(
            h.context.error_message(),
            Some("Failed to authenticate with Google")
        );
        assert!(!h.context.is_loading());
        assert!(h.context.user().is_none());
        assert_eq!(
            h.context.sign_in_view(),
            SignInView::Form {
                blocked: false,
                error: Some("Failed to authenticate with Google"),
            }
        );
    }

    #[tokio::test]
    async fn test_sign_in_view_redirects_when_signed_in() {
        let mut h = happy(AppMode::Production, Some("client"));
        h.store
            .set_item(USER_STORAGE_KEY, r#"{"id":"stored","name":"Sam"}"#)
            .await
            .unwrap();
        h.context.start().await;

        assert_eq!(h.context.sign_in_view(), SignInView::Redirected);
        assert_eq!(h.history.current(), Route::Dashboard);
    }

    #[tokio::test]
    async fn test_logout_returns_to_landing() {
        let mut h = happy(AppMode::Production, Some("client"));
        h.context.start().await;
        h.context.login().await.unwrap();

        h.context.logout().await.unwrap();
        assert!(h.context.user().is_none());
        assert_eq!(h.history.current(), Route::Landing);
        assert!(h.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_restore_session_skips_identity_provider() {
        let scripts = Arc::new(CountingScripts::default());
        let store = MemoryStore::new();
        store
            .set_item(USER_STORAGE_KEY, r#"{"id":"stored"}"#)
            .await
            .unwrap();
        let deps = AuthDeps {
            store: Arc::new(store),
            scripts: scripts.clone(),
            consent: Arc::new(FixedConsent::granting("tok")),
            profiles: Arc::new(FixedProfiles::returning(Ok(profile()))),
            navigator: Arc::new(History::default()),
        };
        let mut context = AuthContext::new(config(AppMode::Production, None), deps);

        context.restore_session().await;
        assert_eq!(context.require_session(), Access::Granted);
        assert_eq!(context.user().map(|u| u.display_name()), Some("User"));
        assert_eq!(
            scripts.injections.load(std::sync::atomic::Ordering::SeqCst),
            0
        );
        assert_eq!(context.last_error(), None);
    }

    #[tokio::test]
    async fn test_teardown_stops_logins() {
        let mut h = happy(AppMode::Production, Some("client"));
        h.context.start().await;
        h.context.teardown();

        assert_eq!(h.context.login().await, Err(AuthError::NotInitialized));
    }
}
