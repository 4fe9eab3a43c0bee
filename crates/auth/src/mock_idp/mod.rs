//! Mock identity provider for development and testing.
//!
//! Serves the identity script, a consent page, a token endpoint and a
//! userinfo endpoint so the full sign-in flow runs without Google.

mod server;
mod templates;

pub use server::{MockIdpHandle, MockIdpServer};
