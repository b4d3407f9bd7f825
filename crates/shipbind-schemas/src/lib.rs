//! Carrier schema tables for shipbind.
//!
//! Each carrier module holds the static [`NodeSchema`](shipbind_model::NodeSchema)
//! tables of one service and a [`SchemaSet`] grouping them. [`registry`]
//! builds a [`TypeRegistry`] covering every bundled set.

pub mod aramex;

use shipbind_model::SchemaSet;
use shipbind_xml::TypeRegistry;

/// Every bundled schema set.
pub static ALL: &[&SchemaSet] = &[&aramex::RATES];

/// Builds a registry with every bundled schema set.
#[must_use]
pub fn registry() -> TypeRegistry {
    ALL.iter()
        .fold(TypeRegistry::builder(), |builder, set| {
            tracing::debug!(schema = set.name, types = set.types.len(), "registering schema set");
            builder.schema_set(set)
        })
        .build()
}
