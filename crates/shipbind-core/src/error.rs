//! Error types for the shipbind core.

/// Core error type for shipbind infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum ShipBindError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for shipbind core operations.
pub type ShipBindResult<T> = Result<T, ShipBindError>;
