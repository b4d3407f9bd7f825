//! Mixed-content items.

use crate::node::TypedNode;
use crate::primitive::{PrimitiveKind, Scalar};

/// One item of a mixed-content sequence, in document order.
#[derive(Debug, Clone, PartialEq)]
pub enum MixedItem {
    /// A text segment.
    Text(String),
    /// A simple-typed child element.
    Simple {
        /// Element name.
        name: String,
        /// Parsed value; its kind is the declared type.
        value: Scalar,
    },
    /// A complex child element.
    Complex {
        /// Element name.
        name: String,
        /// Nested node.
        node: Box<TypedNode>,
    },
    /// A wildcard child element, kept as serialized markup.
    Any {
        /// Element name.
        name: String,
        /// Compact markup of the whole element.
        markup: String,
    },
}

impl MixedItem {
    /// Creates a text item.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Creates a simple element item.
    #[must_use]
    pub fn simple(name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self::Simple {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a complex element item.
    #[must_use]
    pub fn complex(name: impl Into<String>, node: TypedNode) -> Self {
        Self::Complex {
            name: name.into(),
            node: Box::new(node),
        }
    }

    /// Creates a wildcard element item from its markup.
    #[must_use]
    pub fn any(name: impl Into<String>, markup: impl Into<String>) -> Self {
        Self::Any {
            name: name.into(),
            markup: markup.into(),
        }
    }

    /// Returns the element name, or `None` for text.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Simple { name, .. } | Self::Complex { name, .. } | Self::Any { name, .. } => {
                Some(name)
            }
        }
    }

    /// Returns the declared primitive kind of a simple item.
    #[must_use]
    pub fn kind(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Simple { value, .. } => Some(value.kind()),
            _ => None,
        }
    }

    /// Returns `true` for a text item holding only whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}
