//! Authentication for PizzaDash.
//!
//! This crate provides:
//! - A session store mirrored into durable key-value storage
//! - The Google identity bridge (script load, consent, profile fetch)
//! - An auth context tying both to navigation and user-facing messages
//! - A mock IdP for development (behind the `mock` feature)

mod bridge;
mod config;
mod context;
mod navigation;
mod providers;
mod session;
mod stores;

pub use bridge::IdentityBridge;
pub use config::{AuthConfig, ConfigError, ProviderEndpoints};
pub use context::{Access, AuthContext, AuthDeps, SignInView, SUBSTITUTE_CLIENT_ID_WARNING};
pub use navigation::History;
pub use providers::{authorization_url, GoogleProfileFetcher, HttpScriptHost};
#[cfg(feature = "mock")]
pub use providers::{decode_mock_token, encode_mock_token, MockConsent, MockIdentity};
pub use session::SessionStore;
pub use stores::{FileStore, MemoryStore};

#[cfg(feature = "mock")]
pub mod mock_idp;
