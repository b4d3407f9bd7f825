//! Data model for shipbind.
//!
//! Schemas are static descriptor tables ([`NodeSchema`], [`FieldDescriptor`]).
//! Documents bound against them become trees of [`TypedNode`]s holding
//! [`Scalar`] values, nested nodes, raw `xs:any` markup and mixed content.
//! Parent relations live in a per-parse [`Lineage`] table.

mod error;
mod lineage;
mod mixed;
mod node;
mod primitive;
mod schema;

pub use error::ModelError;
pub use lineage::{Lineage, LineageEntry, NodeId};
pub use mixed::MixedItem;
pub use node::{TypedNode, Value};
pub use primitive::{PrimitiveKind, Scalar, XsDate, XsDateTime, XsTime};
pub use schema::{
    ContentModel, Facets, FieldDescriptor, FieldKind, MaxOccurs, NodeSchema, Occurs, Placement,
    SchemaSet, SimpleType,
};
