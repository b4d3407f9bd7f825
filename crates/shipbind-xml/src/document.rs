//! Document-level entry points: parse, bind and re-export a whole document.
//!
//! Each call owns its own diagnostics collector, namespace bindings and
//! lineage table; only the registry is shared.

use std::io::Write;
use std::path::Path;

use shipbind_model::{Lineage, TypedNode};

use crate::builder::{BuildOptions, Builder};
use crate::diagnostics::Collector;
use crate::element::Element;
use crate::error::XmlResult;
use crate::export::{self, ExportOptions};
use crate::namespace::NamespaceBindings;
use crate::registry::TypeRegistry;

/// Result of binding one document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// Typed root node.
    pub root: TypedNode,
    /// Tag of the root element as written in the source.
    pub root_tag: String,
    /// Namespace bindings captured from the source.
    pub namespaces: NamespaceBindings,
    /// Non-fatal diagnostics collected while building.
    pub diagnostics: Collector,
    /// Parent links and source lines of every built node.
    pub lineage: Lineage,
}

impl ParsedDocument {
    /// Exports the root under its source tag.
    ///
    /// The captured namespace bindings are declared on the root unless
    /// `options` carries its own.
    pub fn to_xml(&self, options: &ExportOptions) -> XmlResult<String> {
        let options = self.export_options(options);
        export::to_xml(&self.root, &options)
    }

    /// Writes the root to `writer`, like [`ParsedDocument::to_xml`].
    pub fn export<W: Write>(&self, writer: W, options: &ExportOptions) -> XmlResult<()> {
        let options = self.export_options(options);
        export::export(&self.root, writer, 0, None, &options)
    }

    fn export_options(&self, options: &ExportOptions) -> ExportOptions {
        let mut options = options.clone();
        if options.namespaces.is_none() {
            options.namespaces = Some(self.namespaces.clone());
        }
        if options.root_tag.is_none() {
            options.root_tag = Some(self.root_tag.clone());
        }
        options
    }
}

/// Parses and binds a document held in a string.
pub fn parse_str(
    xml: &str,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    tracing::debug!(bytes = xml.len(), "parsing document from string");
    bind(&Element::parse_str(xml)?, None, registry, options)
}

/// Parses and binds a document held in a string as `type_name`.
pub fn parse_str_as(
    xml: &str,
    type_name: &str,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    tracing::debug!(bytes = xml.len(), type_name, "parsing document from string");
    bind(&Element::parse_str(xml)?, Some(type_name), registry, options)
}

/// Parses and binds a UTF-8 document held in bytes.
pub fn parse_bytes(
    bytes: &[u8],
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    tracing::debug!(bytes = bytes.len(), "parsing document from bytes");
    bind(&Element::parse_bytes(bytes)?, None, registry, options)
}

/// Parses and binds a UTF-8 document held in bytes as `type_name`.
pub fn parse_bytes_as(
    bytes: &[u8],
    type_name: &str,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    tracing::debug!(bytes = bytes.len(), type_name, "parsing document from bytes");
    bind(&Element::parse_bytes(bytes)?, Some(type_name), registry, options)
}

/// Reads, parses and binds a document file.
pub fn parse_file(
    path: impl AsRef<Path>,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "parsing document file");
    bind(&Element::parse_file(path)?, None, registry, options)
}

/// Reads, parses and binds a document file as `type_name`.
pub fn parse_file_as(
    path: impl AsRef<Path>,
    type_name: &str,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), type_name, "parsing document file");
    bind(&Element::parse_file(path)?, Some(type_name), registry, options)
}

/// Binds an in-memory element tree. No source lines are recorded.
pub fn parse_element(
    element: &Element,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    bind(element, None, registry, &in_memory(options))
}

/// Binds an in-memory element tree as `type_name`. No source lines are
/// recorded.
pub fn parse_element_as(
    element: &Element,
    type_name: &str,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    bind(element, Some(type_name), registry, &in_memory(options))
}

fn in_memory(options: &BuildOptions) -> BuildOptions {
    let mut options = options.clone();
    options.keep_source_lines = false;
    options
}

fn bind(
    element: &Element,
    type_name: Option<&str>,
    registry: &TypeRegistry,
    options: &BuildOptions,
) -> XmlResult<ParsedDocument> {
    let namespaces = NamespaceBindings::capture(element);
    let mut diagnostics = Collector::new();
    let mut builder = Builder::new(registry, options, &mut diagnostics);
    let root = match type_name {
        Some(type_name) => builder.build_as(element, type_name)?,
        None => builder.build(element)?,
    };
    let lineage = builder.into_lineage();
    tracing::debug!(
        root = element.local_name(),
        type_name = root.type_name(),
        nodes = lineage.len(),
        diagnostics = diagnostics.len(),
        "bound document"
    );
    Ok(ParsedDocument {
        root,
        root_tag: element.local_name().to_owned(),
        namespaces,
        diagnostics,
        lineage,
    })
}
