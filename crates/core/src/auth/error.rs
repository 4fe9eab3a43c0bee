use thiserror::Error;

/// Everything that can go wrong on the way to a signed-in session.
///
/// None of these are fatal: they are recovered at the auth context and shown
/// to the user as a single message, after which sign-in may be retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("identity provider client ID is not configured")]
    ConfigurationMissing,

    #[error("failed to load identity script: {0}")]
    ScriptLoadFailed(String),

    #[error("user did not grant consent: {0}")]
    ConsentDenied(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("failed to fetch user profile: {0}")]
    ProfileFetchFailed(String),

    #[error("identity bridge is not initialized")]
    NotInitialized,

    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// The message shown on the sign-in view for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ConfigurationMissing => {
                "Configuration error: Google Client ID not found. Please check your environment variables."
            }
            Self::ScriptLoadFailed(_) => "Failed to load Google authentication",
            Self::NotInitialized => "Google authentication not initialized",
            Self::ConsentDenied(_) | Self::Provider(_) | Self::ProfileFetchFailed(_) => {
                "Failed to authenticate with Google"
            }
            Self::Storage(_) => "Failed to save your session",
        }
    }

    /// Whether the error prevents the sign-in view from offering sign-in at all.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::ConfigurationMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_collapse_provider_failures() {
        let expected = "Failed to authenticate with Google";
        assert_eq!(
            AuthError::ConsentDenied("access_denied".into()).user_message(),
            expected
        );
        assert_eq!(AuthError::Provider("boom".into()).user_message(), expected);
        assert_eq!(
            AuthError::ProfileFetchFailed("401".into()).user_message(),
            expected
        );
    }

    #[test]
    fn test_only_missing_configuration_blocks() {
        assert!(AuthError::ConfigurationMissing.is_blocking());
        assert!(!AuthError::NotInitialized.is_blocking());
        assert!(!AuthError::ScriptLoadFailed("dns".into()).is_blocking());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AuthError::ProfileFetchFailed("status 401".into()).to_string(),
            "failed to fetch user profile: status 401"
        );
    }
}
