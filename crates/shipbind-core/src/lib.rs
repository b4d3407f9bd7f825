//! Core configuration and error types for shipbind.
//!
//! This crate holds the settings shared by the binding engine and the tools
//! built on it: whether captured namespace prefixes are reused on export,
//! whether source line numbers are kept, and the default output formatting.

mod config;
mod error;

pub use config::ShipBindConfig;
pub use error::{ShipBindError, ShipBindResult};
