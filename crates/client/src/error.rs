//! Client error types.

use pizzadash_core::auth::AuthError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Shown to the user as the auth error's friendly message.
    #[error("{}", .0.user_message())]
    Auth(#[from] AuthError),

    #[error("Sign-in is unavailable: {0}")]
    SignInBlocked(&'static str),

    #[error("Not signed in. Run `pizzadash login` first.")]
    NotSignedIn,

    #[error("Invalid configuration: {0}")]
    Config(#[from] pizzadash_auth::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_show_user_message() {
        let err = ClientError::from(AuthError::ProfileFetchFailed("userinfo returned 500".into()));
        assert_eq!(err.to_string(), "Failed to authenticate with Google");

        let err = ClientError::from(AuthError::ConfigurationMissing);
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
