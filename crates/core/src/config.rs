//! Client ID resolution policy.
//!
//! One function decides what happens when the identity provider client ID is
//! absent, so every caller sees the same behavior.

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Substitute used in development when no client ID is configured.
pub const DEVELOPMENT_CLIENT_ID: &str = "mock-client-id-for-development-only";

/// Operating mode of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppMode {
    Development,
    #[default]
    Production,
}

impl AppMode {
    /// Parse a mode name. Anything other than `development`/`dev` is production.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Self::Development,
            _ => Self::Production,
        }
    }

    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for AppMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// The client ID the bridge will use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdResolution {
    pub client_id: String,
    /// True when the development substitute was used. Callers should warn.
    pub substituted: bool,
}

/// Resolve the configured client ID.
///
/// - present (non-blank) → used as is
/// - absent in development → [`DEVELOPMENT_CLIENT_ID`], flagged as substituted
/// - absent in production → [`AuthError::ConfigurationMissing`]
pub fn resolve_client_id(
    configured: Option<&str>,
    mode: AppMode,
) -> Result<ClientIdResolution, AuthError> {
    match configured.map(str::trim).filter(|id| !id.is_empty()) {
        Some(id) => Ok(ClientIdResolution {
            client_id: id.to_string(),
            substituted: false,
        }),
        None if mode.is_development() => Ok(ClientIdResolution {
            client_id: DEVELOPMENT_CLIENT_ID.to_string(),
            substituted: true,
        }),
        None => Err(AuthError::ConfigurationMissing),
    }
}
