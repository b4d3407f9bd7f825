//! Schema-driven XML binding for carrier payloads.
//!
//! This crate turns XML documents into trees of [`TypedNode`]s described by
//! static node schemas, and writes such trees back to XML.
//!
//! # Key components
//!
//! - [`Element`]: a generic element tree with source line numbers, parsed with
//!   `quick-xml`
//! - [`TypeRegistry`]: maps element tags and `xsi:type` hints to node schemas
//! - [`Builder`]: binds an element tree to typed nodes, reporting schema
//!   looseness to a [`Collector`]
//! - [`export`](export::export) and [`to_xml`]: write typed nodes back out
//! - [`codec`]: lexical parsing, validation and formatting of XSD primitives
//! - [`envelope`]: SOAP envelopes and faults
//! - [`parse_str`] and friends: one-call parse and bind of a whole document
//!
//! # Conventions
//!
//! - Booleans: `true`/`false` (`1`/`0` accepted on input)
//! - Date-times: `2024-03-01T10:00:00+02:00`, `Z` for UTC
//! - XML declaration: `<?xml version="1.0" encoding="UTF-8"?>`
//!
//! [`TypedNode`]: shipbind_model::TypedNode

pub mod builder;
pub mod codec;
pub mod diagnostics;
pub mod document;
pub mod element;
pub mod envelope;
pub mod error;
pub mod export;
pub mod json;
pub mod namespace;
pub mod registry;

pub use builder::{BuildOptions, Builder, type_hint};
pub use diagnostics::Collector;
pub use document::{
    ParsedDocument, parse_bytes, parse_bytes_as, parse_element, parse_element_as, parse_file,
    parse_file_as, parse_str, parse_str_as,
};
pub use element::{Attribute, Element, WriteOptions, XmlNode, escape_text};
pub use envelope::{SoapFault, SoapVersion};
pub use error::{PrimitiveError, XmlError, XmlResult};
pub use export::{ExportOptions, to_element, to_xml};
pub use json::to_json;
pub use namespace::{NamespaceBindings, XSI_NAMESPACE};
pub use registry::{TypeRegistry, TypeRegistryBuilder, strip_prefix};
