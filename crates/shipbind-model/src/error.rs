//! Errors raised when mutating typed nodes.

/// Error raised by [`TypedNode`](crate::TypedNode) mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// The type declares no field with this name.
    #[error("type {type_name} has no field named {field}")]
    UnknownField {
        /// Type name of the node.
        type_name: &'static str,
        /// Requested field name.
        field: String,
    },

    /// The value does not match the field kind.
    #[error("field {field} of {type_name} expects {expected}")]
    KindMismatch {
        /// Type name of the node.
        type_name: &'static str,
        /// Field name.
        field: &'static str,
        /// Expected value kind.
        expected: &'static str,
    },

    /// The index is past the end of the field's values.
    #[error("index {index} out of range for field {field} with {len} values")]
    IndexOutOfRange {
        /// Field name.
        field: &'static str,
        /// Requested index.
        index: usize,
        /// Number of values present.
        len: usize,
    },
}
