use serde::{Deserialize, Serialize};
use url::Url;

/// The signed-in user as persisted by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl UserRecord {
    /// Display name, falling back to "User" like the dashboard greeting.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("User")
    }
}

/// Profile returned by the identity provider after a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Provider's unique user identifier (`sub`).
    pub id: String,
    pub name: String,
    pub email: String,
    /// Avatar URL.
    pub picture: String,
}

impl From<UserProfile> for UserRecord {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: Some(profile.name),
            email: Some(profile.email),
            image: Some(profile.picture),
        }
    }
}

/// Wire shape of the provider's userinfo response.
///
/// All four fields are required; anything else the provider sends is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfoResponse {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub picture: String,
}

/// Bearer token issued by the provider. Consumed by the profile fetch.
///
/// Not `Clone`; a token is moved into the profile fetch and dropped there.
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken([redacted])")
    }
}

/// An external script the bridge needs present in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptTag {
    pub id: String,
    pub src: Url,
}

impl ScriptTag {
    /// Element id used for the Google Identity Services script.
    pub const GOOGLE_IDENTITY_ID: &'static str = "google-identity-script";

    pub fn google_identity(src: Url) -> Self {
        Self {
            id: Self::GOOGLE_IDENTITY_ID.to_string(),
            src,
        }
    }
}

/// Everything a consent prompt needs to ask the provider for a token.
#[derive(Debug, Clone)]
pub struct ConsentRequest {
    pub client_id: String,
    pub scope: String,
    /// Provider prompt mode, always `consent` for interactive sign-in.
    pub prompt: String,
    /// CSRF state echoed back by the provider.
    pub state: String,
    /// Fully built authorization URL for browser-based prompts.
    pub authorization_url: Url,
}

/// Invoked once per consent request with the profile, or `None` on failure.
pub type ResultCallback = std::sync::Arc<dyn Fn(Option<&UserProfile>) + Send + Sync>;
