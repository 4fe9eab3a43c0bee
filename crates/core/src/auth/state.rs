use super::AuthError;

/// Lifecycle of the identity bridge.
///
/// ```text
/// Uninitialized -> ScriptLoading -> Ready -> AwaitingUserConsent
///     -> TokenObtained -> ProfileFetched | Failed(reason)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BridgeState {
    #[default]
    Uninitialized,
    ScriptLoading,
    Ready,
    AwaitingUserConsent,
    TokenObtained,
    ProfileFetched,
    Failed(AuthError),
}

impl BridgeState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::ScriptLoading => "script_loading",
            Self::Ready => "ready",
            Self::AwaitingUserConsent => "awaiting_user_consent",
            Self::TokenObtained => "token_obtained",
            Self::ProfileFetched => "profile_fetched",
            Self::Failed(_) => "failed",
        }
    }

    /// A consent request has run to completion, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ProfileFetched | Self::Failed(_))
    }

    /// Whether a new consent request may start from this state.
    ///
    /// The bridge must additionally have completed `initialize`; a `Failed`
    /// state reached during initialization does not count.
    pub fn accepts_login(&self) -> bool {
        matches!(self, Self::Ready) || self.is_terminal()
    }

    pub fn failure(&self) -> Option<&AuthError> {
        match self {
            Self::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

impl std::fmt::Display for BridgeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed({})", reason),
            other => f.write_str(other.name()),
        }
    }
}
