//! pizzadash_client - command-line front end for the PizzaDash dashboard.

pub mod app;
pub mod cli;
pub mod consent;
pub mod error;
pub mod output;

pub use app::App;
pub use error::{ClientError, Result};
