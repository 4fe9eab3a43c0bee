//! Application routes and the navigation seam.

use serde::{Deserialize, Serialize};

/// Views of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Landing,
    SignIn,
    /// Landing page for provider errors, keyed by an `error` code.
    AuthError,
    Dashboard,
    Orders,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::SignIn => "/auth/signin",
            Self::AuthError => "/auth/error",
            Self::Dashboard => "/dashboard",
            Self::Orders => "/dashboard/orders",
        }
    }

    /// Routes that require a signed-in user.
    pub fn is_protected(self) -> bool {
        matches!(self, Self::Dashboard | Self::Orders)
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Self::Landing),
            "/auth/signin" => Some(Self::SignIn),
            "/auth/error" => Some(Self::AuthError),
            "/dashboard" => Some(Self::Dashboard),
            "/dashboard/orders" => Some(Self::Orders),
            _ => None,
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Message shown on [`Route::AuthError`] for a provider error code.
///
/// Accepts both the dashboard's own codes and the OAuth codes Google puts in
/// a redirect. Unknown or absent codes get a generic message.
pub fn auth_error_message(code: Option<&str>) -> &'static str {
    match code.map(str::trim) {
        Some("Configuration") => "There is a problem with the server configuration.",
        Some("AccessDenied" | "access_denied") => "You do not have permission to sign in.",
        Some("Verification") => "The verification link has expired or has already been used.",
        Some("OAuthSignin") => "Error starting the sign in process. Please try again.",
        Some("OAuthCallback") => "Error during the sign in process. Please try again.",
        Some("OAuthAccountNotLinked") => "This email is already associated with another account.",
        _ => "An unknown error occurred during authentication.",
    }
}

/// Receives navigation requests from the auth layer.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}
