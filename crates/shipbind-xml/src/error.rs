//! Error types for XML binding.
//!
//! Only conditions the engine cannot represent are errors. Schema looseness
//! such as missing required fields goes to the
//! [`Collector`](crate::Collector) instead.

use std::io;

use shipbind_model::{ModelError, PrimitiveKind};

/// Errors that abort a parse, build or export.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// The input is not well-formed XML.
    #[error("malformed document near line {line}: {message}")]
    MalformedDocument {
        /// Parser message.
        message: String,
        /// 1-based line of the offending token.
        line: u64,
    },

    /// No node type is registered for the tag or type hint.
    #[error("unknown element {tag}{}", near(.line))]
    UnknownElement {
        /// Tag (or type name) that failed to resolve.
        tag: String,
        /// Source line of the element, when known.
        line: Option<u64>,
    },

    /// Text content does not match the declared primitive grammar.
    #[error("invalid {expected} value {value:?} at {path}{}: {reason}", near(.line))]
    InvalidPrimitive {
        /// Slash-separated element path of the offending field.
        path: String,
        /// Source line of the offending element, when known.
        line: Option<u64>,
        /// Declared primitive kind.
        expected: PrimitiveKind,
        /// Offending text.
        value: String,
        /// Codec message.
        reason: String,
    },

    /// A typed node rejected a value.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// An I/O error while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[allow(clippy::ref_option)]
fn near(line: &Option<u64>) -> String {
    line.map(|l| format!(" near line {l}")).unwrap_or_default()
}

/// A primitive codec failure, before path and line are known.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected} value {value:?}: {reason}")]
pub struct PrimitiveError {
    /// Kind the text was parsed as.
    pub expected: PrimitiveKind,
    /// Offending text.
    pub value: String,
    /// What is wrong with it.
    pub reason: String,
}

impl PrimitiveError {
    pub(crate) fn new(
        expected: PrimitiveKind,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            expected,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Attaches location information, producing a fatal build error.
    #[must_use]
    pub fn at(self, path: impl Into<String>, line: Option<u64>) -> XmlError {
        XmlError::InvalidPrimitive {
            path: path.into(),
            line,
            expected: self.expected,
            value: self.value,
            reason: self.reason,
        }
    }
}

/// Convenience result type for XML binding operations.
pub type XmlResult<T> = Result<T, XmlError>;
