use async_trait::async_trait;

use super::{AccessToken, AuthError, ConsentRequest, ScriptTag, UserProfile};

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Durable string key-value storage (the browser's local storage, natively a file).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;
}

/// The document external scripts are injected into.
#[async_trait]
pub trait ScriptHost: Send + Sync {
    /// Whether a script with this element id is already present.
    fn is_present(&self, id: &str) -> bool;

    /// Inject the script and wait for it to load or fail.
    ///
    /// On success the script is present afterwards; on failure it is not.
    async fn inject(&self, script: &ScriptTag) -> Result<()>;
}

/// Asks the user to grant consent and returns the provider's access token.
#[async_trait]
pub trait ConsentPrompt: Send + Sync {
    async fn request_access_token(&self, request: &ConsentRequest) -> Result<AccessToken>;
}

/// Exchanges an access token for the user's profile.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Perform exactly one request to the provider's profile endpoint.
    async fn fetch_profile(&self, token: AccessToken) -> Result<UserProfile>;
}
