//! Identity provider integrations.
//!
//! - `google`: profile fetch and authorization URL for Google
//! - `script`: native document that loads the identity script over HTTP
//! - `mock`: consent against the mock IdP (feature `mock`)

mod google;
#[cfg(feature = "mock")]
mod mock;
mod script;

pub use google::{authorization_url, GoogleProfileFetcher};
#[cfg(feature = "mock")]
pub use mock::{decode_mock_token, encode_mock_token, MockConsent, MockIdentity};
pub use script::HttpScriptHost;
