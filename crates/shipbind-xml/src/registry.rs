//! Type registry: element tags and type hints to node schemas.
//!
//! A registry is assembled once with [`TypeRegistryBuilder`] and is immutable
//! afterwards, so one instance can serve any number of concurrent parses.
//!
//! Resolution order for a tag:
//!
//! 1. an `xsi:type` hint, when it names a known type, replaces the tag's
//!    nominal type;
//! 2. otherwise the tag's global element mapping gives the type name;
//! 3. an override registered for the chosen type name wins over the type's
//!    own schema.

use std::collections::HashMap;

use shipbind_model::{NodeSchema, SchemaSet, TypedNode};

use crate::error::{XmlError, XmlResult};

/// Immutable mapping from tags and type names to node schemas.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<&'static str, &'static NodeSchema>,
    elements: HashMap<String, &'static str>,
    tags: HashMap<&'static str, String>,
    overrides: HashMap<&'static str, &'static NodeSchema>,
}

impl TypeRegistry {
    /// Starts building a registry.
    #[must_use]
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// Resolves the schema for an element tag, honouring a type hint.
    pub fn resolve(&self, tag: &str, type_hint: Option<&str>) -> XmlResult<&'static NodeSchema> {
        if let Some(hinted) = self.known_hint(type_hint) {
            return self.lookup(hinted);
        }
        let type_name = self
            .elements
            .get(tag)
            .ok_or_else(|| unknown(tag))?;
        self.lookup(type_name)
    }

    /// Resolves the schema for a declared type name, honouring a type hint.
    pub fn resolve_type(
        &self,
        type_name: &str,
        type_hint: Option<&str>,
    ) -> XmlResult<&'static NodeSchema> {
        let chosen = self.known_hint(type_hint).unwrap_or(type_name);
        self.lookup(chosen)
    }

    /// Returns `true` if a type (or an override) is registered under `name`.
    #[must_use]
    pub fn is_known_type(&self, name: &str) -> bool {
        self.types.contains_key(name) || self.overrides.contains_key(name)
    }

    /// Returns the type name mapped to a global element tag.
    #[must_use]
    pub fn element_type(&self, tag: &str) -> Option<&'static str> {
        self.elements.get(tag).copied()
    }

    /// Returns the tag new nodes of a type are exported under.
    ///
    /// An alias wins over the global element tag; otherwise the type name is
    /// used.
    #[must_use]
    pub fn tag_for(&self, type_name: &str) -> String {
        if let Some(tag) = self.tags.get(type_name) {
            return tag.clone();
        }
        self.elements
            .iter()
            .filter(|(_, ty)| **ty == type_name)
            .map(|(tag, _)| tag.as_str())
            .min()
            .unwrap_or(type_name)
            .to_owned()
    }

    /// Creates an empty node of a registered type, tagged for export.
    pub fn new_node(&self, type_name: &str) -> XmlResult<TypedNode> {
        let schema = self.lookup(type_name)?;
        Ok(TypedNode::new(schema).with_tag(self.tag_for(type_name)))
    }

    fn known_hint<'h>(&self, type_hint: Option<&'h str>) -> Option<&'h str> {
        type_hint
            .map(strip_prefix)
            .filter(|name| self.is_known_type(name))
    }

    fn lookup(&self, type_name: &str) -> XmlResult<&'static NodeSchema> {
        self.overrides
            .get(type_name)
            .or_else(|| self.types.get(type_name))
            .copied()
            .ok_or_else(|| unknown(type_name))
    }
}

fn unknown(tag: &str) -> XmlError {
    XmlError::UnknownElement {
        tag: tag.to_owned(),
        line: None,
    }
}

/// Strips a `prefix:` part from a qualified type name.
#[must_use]
pub fn strip_prefix(qualified: &str) -> &str {
    qualified
        .split_once(':')
        .map_or(qualified, |(_, local)| local)
}

/// Builder for [`TypeRegistry`].
#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    registry: TypeRegistry,
}

impl TypeRegistryBuilder {
    /// Registers every type and global element of a schema set.
    #[must_use]
    pub fn schema_set(mut self, set: &SchemaSet) -> Self {
        for schema in set.types {
            self = self.node_type(*schema);
        }
        for (tag, type_name) in set.elements {
            self = self.element(*tag, *type_name);
        }
        self
    }

    /// Registers a node type under its own name.
    #[must_use]
    pub fn node_type(mut self, schema: &'static NodeSchema) -> Self {
        self.registry.types.insert(schema.name, schema);
        self
    }

    /// Maps a global element tag to a type name.
    #[must_use]
    pub fn element(mut self, tag: impl Into<String>, type_name: &'static str) -> Self {
        self.registry.elements.insert(tag.into(), type_name);
        self
    }

    /// Maps `tag` to a type and makes it the tag new nodes of that type are
    /// exported under.
    #[must_use]
    pub fn alias(mut self, tag: impl Into<String>, type_name: &'static str) -> Self {
        let tag = tag.into();
        self.registry.tags.insert(type_name, tag.clone());
        self.registry.elements.insert(tag, type_name);
        self
    }

    /// Builds nodes of `type_name` from `schema` instead of the type's own
    /// schema.
    #[must_use]
    pub fn override_type(mut self, type_name: &'static str, schema: &'static NodeSchema) -> Self {
        self.registry.overrides.insert(type_name, schema);
        self
    }

    /// Finishes the registry.
    #[must_use]
    pub fn build(self) -> TypeRegistry {
        tracing::debug!(
            types = self.registry.types.len(),
            elements = self.registry.elements.len(),
            overrides = self.registry.overrides.len(),
            "built type registry"
        );
        self.registry
    }
}
