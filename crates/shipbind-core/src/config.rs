//! Configuration for shipbind parsing and export.
//!
//! All configuration is driven by environment variables so the same settings
//! apply to the CLI and to services embedding the engine.

use crate::error::{ShipBindError, ShipBindResult};

/// Global configuration for shipbind.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipBindConfig {
    /// Log level filter used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Re-use namespace prefixes captured from the source document on export.
    pub use_captured_prefixes: bool,
    /// Keep source line numbers on built nodes.
    pub keep_source_lines: bool,
    /// Pretty-print exported XML.
    pub pretty_print: bool,
    /// Emit an XML declaration before exported documents.
    pub xml_declaration: bool,
}

impl Default for ShipBindConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            use_captured_prefixes: true,
            keep_source_lines: true,
            pretty_print: true,
            xml_declaration: true,
        }
    }
}

impl ShipBindConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> ShipBindResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset keys keep their default value.
    pub fn from_lookup<F>(lookup: F) -> ShipBindResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("LOG_LEVEL") {
            config.log_level = v;
        }
        if let Some(v) = lookup("SHIPBIND_USE_CAPTURED_PREFIXES") {
            config.use_captured_prefixes = parse_bool("SHIPBIND_USE_CAPTURED_PREFIXES", &v)?;
        }
        if let Some(v) = lookup("SHIPBIND_SOURCE_LINES") {
            config.keep_source_lines = parse_bool("SHIPBIND_SOURCE_LINES", &v)?;
        }
        if let Some(v) = lookup("SHIPBIND_PRETTY_PRINT") {
            config.pretty_print = parse_bool("SHIPBIND_PRETTY_PRINT", &v)?;
        }
        if let Some(v) = lookup("SHIPBIND_XML_DECLARATION") {
            config.xml_declaration = parse_bool("SHIPBIND_XML_DECLARATION", &v)?;
        }

        tracing::debug!(?config, "loaded shipbind configuration");
        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> ShipBindResult<bool> {
    match value.trim() {
        "1" | "true" | "yes" | "TRUE" | "YES" => Ok(true),
        "0" | "false" | "no" | "FALSE" | "NO" => Ok(false),
        other => Err(ShipBindError::Config(format!(
            "{key} must be a boolean, got {other:?}"
        ))),
    }
}
