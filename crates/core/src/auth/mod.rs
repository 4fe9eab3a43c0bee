mod error;
mod functions;
mod state;
mod traits;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{generate_state, mask_client_id};
pub use state::BridgeState;
pub use traits::{ConsentPrompt, KeyValueStore, ProfileFetcher, Result, ScriptHost};
pub use types::{
    AccessToken, ConsentRequest, ResultCallback, ScriptTag, UserInfoResponse, UserProfile,
    UserRecord,
};
pub use validation::{parse_token_redirect, parse_userinfo};

/// Durable storage key holding the serialized [`UserRecord`].
pub const USER_STORAGE_KEY: &str = "user";

/// OAuth scopes requested at sign-in.
pub const SIGN_IN_SCOPE: &str = "email profile";
