//! Builder: element tree to typed tree.
//!
//! Children are matched to field descriptors by local name in document
//! order. Primitive content that does not match its declared grammar aborts
//! the build; everything else the schema would reject (missing required
//! fields, occurrence counts out of bounds, facet violations) is reported to
//! the [`Collector`] and the build continues.

use shipbind_core::ShipBindConfig;
use shipbind_model::{
    ContentModel, FieldDescriptor, FieldKind, Lineage, MaxOccurs, MixedItem, NodeId, NodeSchema,
    PrimitiveKind, Scalar, SimpleType, TypedNode, Value,
};

use crate::codec;
use crate::diagnostics::Collector;
use crate::element::{Element, WriteOptions, XmlNode};
use crate::error::{XmlError, XmlResult};
use crate::registry::TypeRegistry;

/// Per-call build settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Record source line numbers on nodes and in diagnostics.
    pub keep_source_lines: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            keep_source_lines: true,
        }
    }
}

impl From<&ShipBindConfig> for BuildOptions {
    fn from(config: &ShipBindConfig) -> Self {
        Self {
            keep_source_lines: config.keep_source_lines,
        }
    }
}

/// Returns the `xsi:type` value of an element.
#[must_use]
pub fn type_hint(element: &Element) -> Option<&str> {
    element.attribute("xsi:type")
}

/// Recursive-descent builder for one document.
#[derive(Debug)]
pub struct Builder<'a> {
    registry: &'a TypeRegistry,
    options: &'a BuildOptions,
    collector: &'a mut Collector,
    lineage: Lineage,
}

impl<'a> Builder<'a> {
    /// Creates a builder reporting to `collector`.
    pub fn new(
        registry: &'a TypeRegistry,
        options: &'a BuildOptions,
        collector: &'a mut Collector,
    ) -> Self {
        Self {
            registry,
            options,
            collector,
            lineage: Lineage::new(),
        }
    }

    /// Builds the root node, choosing its type from the element's tag.
    pub fn build(&mut self, element: &Element) -> XmlResult<TypedNode> {
        let line = self.line_of(element);
        let schema = self
            .registry
            .resolve(element.local_name(), type_hint(element))
            .map_err(|e| with_line(e, line))?;
        tracing::debug!(tag = element.local_name(), type_name = schema.name, "building document root");
        self.build_node(element, schema, None)
    }

    /// Builds the root node as `type_name`, whatever its tag.
    pub fn build_as(&mut self, element: &Element, type_name: &str) -> XmlResult<TypedNode> {
        let line = self.line_of(element);
        let schema = self
            .registry
            .resolve_type(type_name, type_hint(element))
            .map_err(|e| with_line(e, line))?;
        tracing::debug!(tag = element.local_name(), type_name = schema.name, "building document root");
        self.build_node(element, schema, None)
    }

    /// Returns the lineage of the nodes built so far.
    #[must_use]
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    /// Consumes the builder, returning the lineage table.
    #[must_use]
    pub fn into_lineage(self) -> Lineage {
        self.lineage
    }

    fn line_of(&self, element: &Element) -> Option<u64> {
        if self.options.keep_source_lines {
            element.line
        } else {
            None
        }
    }

    fn build_node(
        &mut self,
        element: &Element,
        schema: &'static NodeSchema,
        parent: Option<NodeId>,
    ) -> XmlResult<TypedNode> {
        let line = self.line_of(element);
        let id = self.lineage.register(element.local_name(), parent, line);
        tracing::trace!(tag = element.local_name(), type_name = schema.name, ?line, "building node");

        let mut node = TypedNode::new(schema).with_tag(element.local_name());
        node.set_prefix(element.prefix.clone());
        node.set_type_hint(type_hint(element).map(str::to_owned));
        node.set_origin(id, line);
        if let Some(parent) = parent {
            node.attach_parent(parent);
        }

        self.build_attributes(element, &mut node, id)?;
        match schema.content {
            ContentModel::Elements => self.build_children(element, &mut node, id)?,
            ContentModel::Mixed => self.build_mixed(element, &mut node, id)?,
            ContentModel::Simple(simple_type) => {
                let path = self.lineage.path_of(id);
                let value = self.scalar_content(element, &simple_type, &path, element.local_name())?;
                node.set_text(value);
            }
        }
        self.check_cardinality(&node, line);
        Ok(node)
    }

    fn build_attributes(&mut self, element: &Element, node: &mut TypedNode, id: NodeId) -> XmlResult<()> {
        let schema = node.schema();
        for attr in &element.attributes {
            if attr.prefix.as_deref() == Some("xsi") {
                continue;
            }
            let Some(descriptor) = schema.attribute_field(&attr.name) else {
                continue;
            };
            let FieldKind::Simple(simple_type) = descriptor.kind else {
                continue;
            };
            let line = self.line_of(element);
            let path = format!("{}/@{}", self.lineage.path_of(id), attr.name);
            let value = parse_checked(&simple_type, &attr.value, &path, line)?;
            self.check_facets(descriptor.name, &simple_type, &attr.value, &value, line);
            if let Some(prefix) = &attr.prefix {
                node.set_field_prefix(descriptor.name, Some(prefix.clone()))?;
            }
            node.push(descriptor.name, value)?;
        }
        Ok(())
    }

    fn build_children(&mut self, element: &Element, node: &mut TypedNode, id: NodeId) -> XmlResult<()> {
        let schema = node.schema();
        for child in element.child_elements() {
            let Some(descriptor) = schema.element_field(child.local_name()) else {
                tracing::trace!(tag = child.local_name(), type_name = schema.name, "ignoring unknown child");
                continue;
            };
            if let Some(prefix) = &child.prefix {
                node.set_field_prefix(descriptor.name, Some(prefix.clone()))?;
            }
            if let Some(value) = self.field_value(child, descriptor, id)? {
                node.push(descriptor.name, value)?;
            }
        }
        Ok(())
    }

    fn build_mixed(&mut self, element: &Element, node: &mut TypedNode, id: NodeId) -> XmlResult<()> {
        let schema = node.schema();
        for child in &element.children {
            let child = match child {
                XmlNode::Text(text) | XmlNode::CData(text) => {
                    node.push_mixed(MixedItem::text(text.as_str()));
                    continue;
                }
                XmlNode::Comment(_) => continue,
                XmlNode::Element(child) => child,
            };
            let Some(descriptor) = schema.element_field(child.local_name()) else {
                continue;
            };
            match self.field_value(child, descriptor, id)? {
                Some(Value::Scalar(value)) => {
                    node.push_mixed(MixedItem::simple(descriptor.name, value));
                }
                Some(Value::Node(nested)) => node.push_mixed(MixedItem::Complex {
                    name: descriptor.name.to_owned(),
                    node: nested,
                }),
                Some(Value::Any(markup)) => {
                    node.push_mixed(MixedItem::any(descriptor.name, markup));
                }
                None => {}
            }
        }
        Ok(())
    }

    /// Builds the value of one child element; `None` means absent.
    fn field_value(
        &mut self,
        child: &Element,
        descriptor: &'static FieldDescriptor,
        parent: NodeId,
    ) -> XmlResult<Option<Value>> {
        match descriptor.kind {
            FieldKind::Simple(simple_type) => {
                let path = format!("{}/{}", self.lineage.path_of(parent), descriptor.name);
                Ok(self
                    .scalar_content(child, &simple_type, &path, descriptor.name)?
                    .map(Value::Scalar))
            }
            FieldKind::Node { type_name } => {
                let line = self.line_of(child);
                let schema = self
                    .registry
                    .resolve_type(type_name, type_hint(child))
                    .map_err(|e| with_line(e, line))?;
                let nested = self.build_node(child, schema, Some(parent))?;
                Ok(Some(Value::from(nested)))
            }
            FieldKind::Any => {
                let markup = child.to_xml_string(&WriteOptions {
                    pretty: false,
                    xml_declaration: false,
                })?;
                Ok(Some(Value::Any(markup)))
            }
        }
    }

    /// Parses the text of `element` as a simple type. Blank text in a
    /// non-string field is treated as absent.
    fn scalar_content(
        &mut self,
        element: &Element,
        simple_type: &SimpleType,
        path: &str,
        field: &str,
    ) -> XmlResult<Option<Scalar>> {
        let text = element.text();
        let is_plain_string = simple_type.kind == PrimitiveKind::String && !simple_type.list;
        if !is_plain_string && text.trim().is_empty() {
            return Ok(None);
        }
        let line = self.line_of(element);
        let value = parse_checked(simple_type, &text, path, line)?;
        self.check_facets(field, simple_type, &text, &value, line);
        Ok(Some(value))
    }

    fn check_facets(
        &mut self,
        field: &str,
        simple_type: &SimpleType,
        lexical: &str,
        value: &Scalar,
        line: Option<u64>,
    ) {
        if simple_type.facets.is_empty() {
            return;
        }
        for violation in codec::check_facets(&simple_type.facets, lexical, value) {
            self.collector.add_field(field, line, &violation);
        }
    }

    fn check_cardinality(&mut self, node: &TypedNode, line: Option<u64>) {
        for descriptor in node.schema().fields {
            let count = node.count(descriptor.name);
            let min = descriptor.occurs.min as usize;
            if count == 0 && descriptor.required {
                self.collector
                    .add_field(descriptor.name, line, "required value is missing");
                continue;
            }
            if count < min {
                self.collector.add_field(
                    descriptor.name,
                    line,
                    &format!(
                        "number of values is below the minimum allowed, expected at least {min}, found {count}"
                    ),
                );
            }
            if !descriptor.occurs.max.allows(count) {
                let MaxOccurs::Bounded(max) = descriptor.occurs.max else {
                    continue;
                };
                self.collector.add_field(
                    descriptor.name,
                    line,
                    &format!(
                        "number of values is above the maximum allowed, expected at most {max}, found {count}"
                    ),
                );
            }
        }
    }
}

fn parse_checked(
    simple_type: &SimpleType,
    text: &str,
    path: &str,
    line: Option<u64>,
) -> XmlResult<Scalar> {
    let value = codec::parse_scalar(simple_type, text).map_err(|e| e.at(path, line))?;
    codec::validate_scalar(simple_type, &value).map_err(|e| e.at(path, line))?;
    Ok(value)
}

fn with_line(err: XmlError, line: Option<u64>) -> XmlError {
    match err {
        XmlError::UnknownElement { tag, line: None } => XmlError::UnknownElement { tag, line },
        other => other,
    }
}
