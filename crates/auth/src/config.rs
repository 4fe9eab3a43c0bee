use pizzadash_core::auth::{mask_client_id, AuthError};
use pizzadash_core::config::{resolve_client_id, AppMode, ClientIdResolution};
use thiserror::Error;
use url::Url;

const GOOGLE_SCRIPT_URL: &str = "https://accounts.google.com/gsi/client";
const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/auth/callback";

/// Errors from reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

/// Where the identity provider lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    /// Identity script loaded once per process.
    pub script_url: Url,
    /// Browser consent page.
    pub authorize_url: Url,
    /// Profile endpoint called with the bearer token.
    pub userinfo_url: Url,
}

impl ProviderEndpoints {
    /// Google Identity Services endpoints.
    pub fn google() -> Self {
        Self {
            script_url: GOOGLE_SCRIPT_URL.parse().expect("static URL is valid"),
            authorize_url: GOOGLE_AUTHORIZE_URL.parse().expect("static URL is valid"),
            userinfo_url: GOOGLE_USERINFO_URL.parse().expect("static URL is valid"),
        }
    }

    /// Endpoints of a mock IdP served at `base`.
    pub fn mock(base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            script_url: base.join("/gsi/client")?,
            authorize_url: base.join("/authorize")?,
            userinfo_url: base.join("/oauth2/v3/userinfo")?,
        })
    }
}

/// Auth configuration, read once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub mode: AppMode,
    /// Raw client ID as configured; resolved through [`AuthConfig::client_id`].
    pub configured_client_id: Option<String>,
    pub endpoints: ProviderEndpoints,
    /// Base URL of a mock IdP, when one replaces Google.
    pub mock_idp_url: Option<Url>,
    pub redirect_uri: Url,
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GOOGLE_CLIENT_ID`: Google OAuth client ID (blank counts as unset)
    /// - `PIZZADASH_ENV`: `development` or `production` (default: production)
    /// - `PIZZADASH_IDP_URL`: base URL of a mock IdP; replaces all Google endpoints
    /// - `PIZZADASH_REDIRECT_URI`: consent redirect (default: `http://localhost:3000/auth/callback`)
    ///
    /// # Errors
    ///
    /// Returns an error if one of the URL variables does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mode = lookup("PIZZADASH_ENV")
            .map(|v| AppMode::parse(&v))
            .unwrap_or_default();

        let mock_idp_url = lookup("PIZZADASH_IDP_URL")
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.parse::<Url>())
            .transpose()
            .map_err(|source| ConfigError::InvalidUrl {
                var: "PIZZADASH_IDP_URL",
                source,
            })?;

        let endpoints = match &mock_idp_url {
            Some(base) => ProviderEndpoints::mock(base).map_err(|source| ConfigError::InvalidUrl {
                var: "PIZZADASH_IDP_URL",
                source,
            })?,
            None => ProviderEndpoints::google(),
        };

        let redirect_uri = lookup("PIZZADASH_REDIRECT_URI")
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string())
            .parse()
            .map_err(|source| ConfigError::InvalidUrl {
                var: "PIZZADASH_REDIRECT_URI",
                source,
            })?;

        Ok(Self {
            mode,
            configured_client_id: lookup("GOOGLE_CLIENT_ID"),
            endpoints,
            mock_idp_url,
            redirect_uri,
        })
    }

    /// Configuration pointing at a mock IdP, for development and tests.
    pub fn for_mock_idp(base: Url, mode: AppMode, client_id: Option<&str>) -> Self {
        let endpoints = ProviderEndpoints::mock(&base).unwrap_or_else(|_| ProviderEndpoints::google());
        let redirect_uri = base
            .join("/auth/callback")
            .unwrap_or_else(|_| base.clone());
        Self {
            mode,
            configured_client_id: client_id.map(str::to_string),
            endpoints,
            mock_idp_url: Some(base),
            redirect_uri,
        }
    }

    /// Resolve the client ID under the single configuration policy.
    ///
    /// Logs a warning when the development substitute is used and an error
    /// when production has no client ID.
    pub fn client_id(&self) -> Result<ClientIdResolution, AuthError> {
        match resolve_client_id(self.configured_client_id.as_deref(), self.mode) {
            Ok(resolution) => {
                if resolution.substituted {
                    tracing::warn!(
                        mode = %self.mode,
                        "GOOGLE_CLIENT_ID is not set, using mock client ID for development"
                    );
                }
                Ok(resolution)
            }
            Err(e) => {
                tracing::error!(mode = %self.mode, "GOOGLE_CLIENT_ID is required but not found");
                Err(e)
            }
        }
    }

    /// Settings worth showing in development, with the client ID masked.
    pub fn debug_entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("PIZZADASH_ENV", self.mode.to_string()),
            (
                "GOOGLE_CLIENT_ID",
                self.configured_client_id
                    .as_deref()
                    .map(mask_client_id)
                    .unwrap_or_else(|| "undefined".to_string()),
            ),
            (
                "PIZZADASH_IDP_URL",
                self.mock_idp_url
                    .as_ref()
                    .map(Url::to_string)
                    .unwrap_or_else(|| "undefined".to_string()),
            ),
            ("PIZZADASH_REDIRECT_URI", self.redirect_uri.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AuthConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.mode, AppMode::Production);
        assert_eq!(config.endpoints, ProviderEndpoints::google());
        assert_eq!(config.configured_client_id, None);
        assert_eq!(
            config.redirect_uri.as_str(),
            "http://localhost:3000/auth/callback"
        );
    }

    #[test]
    fn test_mock_idp_replaces_endpoints() {
        let config = AuthConfig::from_lookup(lookup(&[(
            "PIZZADASH_IDP_URL",
            "http://127.0.0.1:3001",
        )]))
        .unwrap();
        assert_eq!(
            config.endpoints.userinfo_url.as_str(),
            "http://127.0.0.1:3001/oauth2/v3/userinfo"
        );
        assert_eq!(
            config.endpoints.script_url.as_str(),
            "http://127.0.0.1:3001/gsi/client"
        );
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let err = AuthConfig::from_lookup(lookup(&[("PIZZADASH_REDIRECT_URI", "not a url")]))
            .unwrap_err();
        assert!(err.to_string().starts_with("PIZZADASH_REDIRECT_URI"));
    }

    #[test]
    fn test_client_id_policy_by_mode() {
        let dev = AuthConfig::from_lookup(lookup(&[("PIZZADASH_ENV", "development")])).unwrap();
        assert!(dev.client_id().unwrap().substituted);

        let prod = AuthConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(prod.client_id(), Err(AuthError::ConfigurationMissing));

        let configured =
            AuthConfig::from_lookup(lookup(&[("GOOGLE_CLIENT_ID", "abc.apps.example")])).unwrap();
        assert_eq!(configured.client_id().unwrap().client_id, "abc.apps.example");
    }

    #[test]
    fn test_debug_entries_mask_client_id() {
        let config = AuthConfig::from_lookup(lookup(&[(
            "GOOGLE_CLIENT_ID",
            "123456789012-abcdefghijklmnop.apps.googleusercontent.com",
        )]))
        .unwrap();
        let entries = config.debug_entries();
        let (_, client_id) = entries
            .iter()
            .find(|(k, _)| *k == "GOOGLE_CLIENT_ID")
            .unwrap();
        assert_eq!(client_id, "123456789012-abcdefg...");
    }
}
