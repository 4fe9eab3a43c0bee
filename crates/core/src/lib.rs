//! Functional core for PizzaDash.
//!
//! Types, trait seams and pure functions shared by the auth shell and the
//! CLI. Nothing in here performs I/O.

#[cfg(feature = "auth")]
pub mod auth;
#[cfg(feature = "auth")]
pub mod config;
pub mod orders;
pub mod routes;
