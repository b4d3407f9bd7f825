//! Exporter: typed tree back to XML.
//!
//! A node is first lowered to an [`Element`] and then printed, so callers
//! that embed payloads (SOAP envelopes, carrier wrappers) can work with the
//! element tree directly through [`to_element`].

use std::io::Write;

use shipbind_core::ShipBindConfig;
use shipbind_model::{ContentModel, MixedItem, Scalar, TypedNode, Value};

use crate::codec;
use crate::element::{Element, WriteOptions};
use crate::error::XmlResult;
use crate::namespace::{NamespaceBindings, XSI_NAMESPACE};

/// Per-call export settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Indent nested elements and end each with a newline.
    pub pretty: bool,
    /// Start documents with an XML declaration.
    pub xml_declaration: bool,
    /// Write the namespace prefixes captured at parse time.
    pub use_captured_prefixes: bool,
    /// Tag for the root element instead of the node's own tag.
    pub root_tag: Option<String>,
    /// Namespace declarations for the root element.
    pub namespaces: Option<NamespaceBindings>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            xml_declaration: true,
            use_captured_prefixes: true,
            root_tag: None,
            namespaces: None,
        }
    }
}

impl From<&ShipBindConfig> for ExportOptions {
    fn from(config: &ShipBindConfig) -> Self {
        Self {
            pretty: config.pretty_print,
            xml_declaration: config.xml_declaration,
            use_captured_prefixes: config.use_captured_prefixes,
            ..Self::default()
        }
    }
}

impl ExportOptions {
    fn write_options(&self) -> WriteOptions {
        WriteOptions {
            pretty: self.pretty,
            xml_declaration: self.xml_declaration,
        }
    }
}

/// Lowers a node to an element tree.
///
/// The root tag is `tag`, else [`ExportOptions::root_tag`], else the node's
/// own tag. `namespace_prefix` is used wherever no captured prefix applies.
pub fn to_element(
    node: &TypedNode,
    tag: Option<&str>,
    namespace_prefix: Option<&str>,
    options: &ExportOptions,
) -> XmlResult<Element> {
    let tag = tag
        .or(options.root_tag.as_deref())
        .unwrap_or_else(|| node.tag());
    let bindings = options.namespaces.as_ref();
    let xsi_prefix = bindings
        .and_then(|b| b.prefix_for(XSI_NAMESPACE))
        .unwrap_or("xsi")
        .to_owned();

    let lowering = Lowering {
        options,
        xsi_prefix: &xsi_prefix,
    };
    let mut root = lowering.node_element(node, tag, namespace_prefix)?;

    if let Some(bindings) = bindings {
        for (prefix, uri) in bindings.declarations() {
            root.declare_namespace(prefix.as_deref(), uri);
        }
    }
    let declares_xsi = root
        .namespace_declarations
        .iter()
        .any(|(_, uri)| uri == XSI_NAMESPACE);
    if !declares_xsi && has_type_hints(node) {
        root.declare_namespace(Some(&xsi_prefix), XSI_NAMESPACE);
    }
    Ok(root)
}

/// Writes a node as XML at `indent_level`.
pub fn export<W: Write>(
    node: &TypedNode,
    writer: W,
    indent_level: usize,
    namespace_prefix: Option<&str>,
    options: &ExportOptions,
) -> XmlResult<()> {
    let element = to_element(node, None, namespace_prefix, options)?;
    tracing::debug!(
        tag = element.local_name(),
        type_name = node.type_name(),
        pretty = options.pretty,
        "exporting node"
    );
    element.write_to(writer, indent_level, &options.write_options())?;
    Ok(())
}

/// Serializes a node as a complete document.
pub fn to_xml(node: &TypedNode, options: &ExportOptions) -> XmlResult<String> {
    to_element(node, None, None, options)?.to_xml_string(&options.write_options())
}

fn has_type_hints(node: &TypedNode) -> bool {
    if node.type_hint().is_some() {
        return true;
    }
    let in_fields = node
        .populated_fields()
        .flat_map(|(_, values)| values)
        .filter_map(Value::as_node)
        .any(has_type_hints);
    in_fields
        || node.mixed().iter().any(|item| match item {
            MixedItem::Complex { node, .. } => has_type_hints(node),
            _ => false,
        })
}

struct Lowering<'a> {
    options: &'a ExportOptions,
    xsi_prefix: &'a str,
}

impl Lowering<'_> {
    fn prefix<'n>(&self, captured: Option<&'n str>, inherited: Option<&'n str>) -> Option<&'n str> {
        let captured = if self.options.use_captured_prefixes {
            captured
        } else {
            None
        };
        captured.or(inherited)
    }

    fn node_element(&self, node: &TypedNode, tag: &str, inherited: Option<&str>) -> XmlResult<Element> {
        let prefix = self.prefix(node.prefix(), inherited);
        let mut element = Element::new(tag).with_prefix(prefix.map(str::to_owned));

        if let Some(hint) = node.type_hint() {
            element.set_attribute(Some(self.xsi_prefix), "type", hint);
        }
        for (descriptor, values) in node.populated_fields() {
            if !descriptor.is_attribute() {
                continue;
            }
            if let Some(value) = values.first().and_then(Value::as_scalar) {
                // Unprefixed attributes stay unqualified; the element prefix is not inherited.
                let attr_prefix = self.prefix(node.field_prefix(descriptor.name), None);
                element.set_attribute(attr_prefix, descriptor.name, codec::format_scalar(value));
            }
        }

        match node.schema().content {
            ContentModel::Elements => {}
            ContentModel::Mixed => {
                for item in node.mixed() {
                    match item {
                        MixedItem::Text(text) if text.trim().is_empty() => {}
                        MixedItem::Text(text) => element.push_text(text),
                        MixedItem::Simple { name, value } => {
                            let child_prefix = self.prefix(node.field_prefix(name), prefix);
                            element.push_element(scalar_element(name, child_prefix, value));
                        }
                        MixedItem::Complex { name, node: nested } => {
                            element.push_element(self.node_element(nested, name, prefix)?);
                        }
                        MixedItem::Any { markup, .. } => {
                            element.push_element(Element::parse_str(markup)?);
                        }
                    }
                }
            }
            ContentModel::Simple(_) => {
                if let Some(text) = node.text() {
                    let text = codec::format_scalar(text);
                    if !text.is_empty() {
                        element.push_text(&text);
                    }
                }
            }
        }

        for (descriptor, values) in node.populated_fields() {
            if descriptor.is_attribute() {
                continue;
            }
            let child_prefix = self.prefix(node.field_prefix(descriptor.name), prefix);
            for value in values {
                match value {
                    Value::Scalar(scalar) => {
                        element.push_element(scalar_element(descriptor.name, child_prefix, scalar));
                    }
                    Value::Node(nested) => {
                        element.push_element(self.node_element(nested, descriptor.name, prefix)?);
                    }
                    Value::Any(markup) => element.push_element(Element::parse_str(markup)?),
                }
            }
        }
        Ok(element)
    }
}

fn scalar_element(name: &str, prefix: Option<&str>, value: &Scalar) -> Element {
    let mut element = Element::new(name).with_prefix(prefix.map(str::to_owned));
    let text = codec::format_scalar(value);
    if !text.is_empty() {
        element.push_text(&text);
    }
    element
}
