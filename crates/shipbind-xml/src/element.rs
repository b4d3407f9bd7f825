//! Generic XML element tree with source lines.
//!
//! The builder consumes this tree and the exporter produces it. Parsing goes
//! through `quick-xml` with text trimming disabled, so whitespace and mixed
//! content reach the builder untouched. Entity and character references are
//! resolved; comments are kept.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::{partial_escape, unescape};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{XmlError, XmlResult};

/// An attribute that is not a namespace declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace prefix.
    pub prefix: Option<String>,
    /// Local name.
    pub name: String,
    /// Unescaped value.
    pub value: String,
}

impl Attribute {
    /// Creates an unprefixed attribute.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            prefix: None,
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns `prefix:name` or `name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.name)
    }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Nested element.
    Element(Element),
    /// Character data, unescaped.
    Text(String),
    /// A CDATA section.
    CData(String),
    /// A comment.
    Comment(String),
}

/// An XML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Namespace prefix of the tag.
    pub prefix: Option<String>,
    /// Local name of the tag.
    pub name: String,
    /// `xmlns` (prefix `None`) and `xmlns:p` declarations, in source order.
    pub namespace_declarations: Vec<(Option<String>, String)>,
    /// Attributes other than namespace declarations.
    pub attributes: Vec<Attribute>,
    /// Children in document order.
    pub children: Vec<XmlNode>,
    /// 1-based line of the start tag, for parsed documents.
    pub line: Option<u64>,
}

/// Printer settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Indent nested elements by four spaces per level.
    pub pretty: bool,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` first.
    pub xml_declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            xml_declaration: false,
        }
    }
}

const INDENT: &[u8] = b"    ";

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_owned(),
    }
}

fn split_qname(qname: &str) -> (Option<String>, String) {
    match qname.split_once(':') {
        Some((prefix, local)) => (Some(prefix.to_owned()), local.to_owned()),
        None => (None, qname.to_owned()),
    }
}

impl Element {
    /// Creates an empty unprefixed element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the prefix, builder style.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Option<String>) -> Self {
        self.prefix = prefix;
        self
    }

    /// Returns the local name.
    #[must_use]
    pub fn local_name(&self) -> &str {
        &self.name
    }

    /// Returns `prefix:name` or `name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(self.prefix.as_deref(), &self.name)
    }

    /// Returns the value of the attribute with this qualified name.
    #[must_use]
    pub fn attribute(&self, qualified_name: &str) -> Option<&str> {
        let (prefix, name) = split_qname(qualified_name);
        self.attributes
            .iter()
            .find(|a| a.prefix == prefix && a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Adds or replaces an attribute.
    pub fn set_attribute(&mut self, prefix: Option<&str>, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|a| a.prefix.as_deref() == prefix && a.name == name)
        {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute {
                prefix: prefix.map(str::to_owned),
                name: name.to_owned(),
                value,
            }),
        }
    }

    /// Declares a namespace on this element; `None` declares the default.
    pub fn declare_namespace(&mut self, prefix: Option<&str>, uri: impl Into<String>) {
        let uri = uri.into();
        match self
            .namespace_declarations
            .iter_mut()
            .find(|(p, _)| p.as_deref() == prefix)
        {
            Some(existing) => existing.1 = uri,
            None => self
                .namespace_declarations
                .push((prefix.map(str::to_owned), uri)),
        }
    }

    /// Returns the URI this element itself declares for `prefix`.
    #[must_use]
    pub fn declared_namespace(&self, prefix: Option<&str>) -> Option<&str> {
        self.namespace_declarations
            .iter()
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// Appends a child element.
    pub fn push_element(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    /// Appends text, merging with a preceding text node.
    pub fn push_text(&mut self, text: &str) {
        if let Some(XmlNode::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlNode::Text(text.to_owned()));
        }
    }

    /// Iterates over child elements.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Returns the first child element with this local name.
    #[must_use]
    pub fn child(&self, local_name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == local_name)
    }

    /// Concatenates direct text and CDATA children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if any direct text child holds non-whitespace.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.children.iter().any(|child| match child {
            XmlNode::Text(t) => !t.trim().is_empty(),
            XmlNode::CData(_) => true,
            _ => false,
        })
    }

    /// Returns `true` if every child is text or CDATA, blank or not.
    #[must_use]
    pub fn has_only_text(&self) -> bool {
        self.children
            .iter()
            .all(|child| matches!(child, XmlNode::Text(_) | XmlNode::CData(_)))
    }

    /// Collects this element and its descendants with a local name, depth first.
    #[must_use]
    pub fn find_all(&self, local_name: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_named(local_name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, local_name: &str, found: &mut Vec<&'a Element>) {
        if self.name == local_name {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_named(local_name, found);
        }
    }

    /// Parses a document from a string.
    pub fn parse_str(xml: &str) -> XmlResult<Self> {
        TreeParser::new(xml).parse()
    }

    /// Parses a UTF-8 document from bytes.
    pub fn parse_bytes(bytes: &[u8]) -> XmlResult<Self> {
        match std::str::from_utf8(bytes) {
            Ok(xml) => Self::parse_str(xml),
            Err(e) => {
                let valid = &bytes[..e.valid_up_to()];
                let line = 1 + valid.iter().filter(|b| **b == b'\n').count() as u64;
                Err(XmlError::MalformedDocument {
                    message: format!("invalid UTF-8: {e}"),
                    line,
                })
            }
        }
    }

    /// Reads and parses a document from a file.
    pub fn parse_file(path: impl AsRef<Path>) -> XmlResult<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::parse_bytes(&bytes)
    }

    /// Writes this element at `indent_level`.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        indent_level: usize,
        options: &WriteOptions,
    ) -> io::Result<()> {
        let mut writer = Writer::new(writer);
        if options.xml_declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            writer.get_mut().write_all(b"\n")?;
        }
        write_element(&mut writer, self, indent_level, options.pretty)
    }

    /// Serializes this element to a string.
    pub fn to_xml_string(&self, options: &WriteOptions) -> XmlResult<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, 0, options)?;
        String::from_utf8(buf).map_err(|e| XmlError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

struct TreeParser<'a> {
    reader: Reader<&'a [u8]>,
    line_starts: Vec<usize>,
    stack: Vec<Element>,
}

impl<'a> TreeParser<'a> {
    fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        let line_starts = std::iter::once(0)
            .chain(xml.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            reader,
            line_starts,
            stack: Vec::new(),
        }
    }

    fn line_at(&self, offset: u64) -> u64 {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        self.line_starts.partition_point(|start| *start <= offset) as u64
    }

    fn malformed(&self, message: impl Into<String>, offset: u64) -> XmlError {
        XmlError::MalformedDocument {
            message: message.into(),
            line: self.line_at(offset),
        }
    }

    fn parse(mut self) -> XmlResult<Element> {
        let mut root: Option<Element> = None;

        loop {
            let event_start = self.reader.buffer_position();
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.malformed(e.to_string(), self.reader.error_position())),
            };

            match event {
                Event::Start(e) => {
                    let element = self.open(&e, event_start)?;
                    self.stack.push(element);
                }
                Event::Empty(e) => {
                    let element = self.open(&e, event_start)?;
                    self.close(element, &mut root, event_start)?;
                }
                Event::End(_) => {
                    let Some(element) = self.stack.pop() else {
                        return Err(self.malformed("unexpected closing tag", event_start));
                    };
                    self.close(element, &mut root, event_start)?;
                }
                Event::Text(e) => {
                    let decoded = e
                        .decode()
                        .map_err(|err| self.malformed(err.to_string(), event_start))?;
                    let text = unescape(&decoded)
                        .map_err(|err| self.malformed(err.to_string(), event_start))?;
                    self.append_text(&text, event_start)?;
                }
                Event::GeneralRef(r) => {
                    let name = r
                        .decode()
                        .map_err(|err| self.malformed(err.to_string(), event_start))?;
                    let text = unescape(&format!("&{name};"))
                        .map_err(|err| self.malformed(err.to_string(), event_start))?
                        .into_owned();
                    self.append_text(&text, event_start)?;
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    match self.stack.last_mut() {
                        Some(parent) => parent.children.push(XmlNode::CData(text)),
                        None => {
                            return Err(self.malformed("CDATA outside the root element", event_start));
                        }
                    }
                }
                Event::Comment(e) => {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if let Some(parent) = self.stack.last_mut() {
                        parent.children.push(XmlNode::Comment(text));
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(XmlError::MalformedDocument {
                message: format!("unclosed element <{}>", open.qualified_name()),
                line: open.line.unwrap_or(1),
            });
        }
        root.ok_or_else(|| XmlError::MalformedDocument {
            message: "document has no root element".to_owned(),
            line: 1,
        })
    }

    fn open(&self, start: &BytesStart<'_>, event_start: u64) -> XmlResult<Element> {
        let qname = std::str::from_utf8(start.name().as_ref())
            .map_err(|e| self.malformed(e.to_string(), event_start))?
            .to_owned();
        let (prefix, name) = split_qname(&qname);
        let mut element = Element {
            prefix,
            name,
            line: Some(self.line_at(event_start)),
            ..Element::default()
        };

        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.malformed(e.to_string(), event_start))?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| self.malformed(e.to_string(), event_start))?;
            let raw = std::str::from_utf8(&attr.value)
                .map_err(|e| self.malformed(e.to_string(), event_start))?;
            let value = unescape(raw)
                .map_err(|e| self.malformed(e.to_string(), event_start))?
                .into_owned();

            if key == "xmlns" {
                element.namespace_declarations.push((None, value));
            } else if let Some(prefix) = key.strip_prefix("xmlns:") {
                element
                    .namespace_declarations
                    .push((Some(prefix.to_owned()), value));
            } else {
                let (prefix, name) = split_qname(key);
                element.attributes.push(Attribute {
                    prefix,
                    name,
                    value,
                });
            }
        }
        Ok(element)
    }

    fn close(
        &mut self,
        element: Element,
        root: &mut Option<Element>,
        event_start: u64,
    ) -> XmlResult<()> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(XmlNode::Element(element));
            return Ok(());
        }
        if root.is_some() {
            return Err(self.malformed("multiple root elements", event_start));
        }
        *root = Some(element);
        Ok(())
    }

    fn append_text(&mut self, text: &str, event_start: u64) -> XmlResult<()> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent.push_text(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(self.malformed("text outside the root element", event_start)),
        }
    }
}

// ---------------------------------------------------------------------------
// Printing
// ---------------------------------------------------------------------------

/// Escapes `&`, `<` and `>` in text, passing `<![CDATA[...]]>` spans through.
#[must_use]
pub fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;
    while let Some(open) = rest.find("<![CDATA[") {
        out.push_str(&partial_escape(&rest[..open]));
        match rest[open..].find("]]>") {
            Some(close) => {
                let end = open + close + 3;
                out.push_str(&rest[open..end]);
                rest = &rest[end..];
            }
            None => {
                out.push_str(&partial_escape(&rest[open..]));
                rest = "";
            }
        }
    }
    out.push_str(&partial_escape(rest));
    Cow::Owned(out)
}

fn start_tag(element: &Element) -> BytesStart<'static> {
    let mut start = BytesStart::new(element.qualified_name());
    for (prefix, uri) in &element.namespace_declarations {
        let key = match prefix {
            Some(prefix) => format!("xmlns:{prefix}"),
            None => "xmlns".to_owned(),
        };
        start.push_attribute((key.as_str(), uri.as_str()));
    }
    for attr in &element.attributes {
        start.push_attribute((attr.qualified_name().as_str(), attr.value.as_str()));
    }
    start
}

fn indent<W: Write>(writer: &mut Writer<W>, level: usize) -> io::Result<()> {
    for _ in 0..level {
        writer.get_mut().write_all(INDENT)?;
    }
    Ok(())
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &XmlNode, level: usize, pretty: bool) -> io::Result<()> {
    match node {
        XmlNode::Element(child) => write_element(writer, child, level, pretty),
        XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::from_escaped(escape_text(text)))),
        XmlNode::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str()))),
        XmlNode::Comment(text) => writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str()))),
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    level: usize,
    pretty: bool,
) -> io::Result<()> {
    if pretty {
        indent(writer, level)?;
    }
    let start = start_tag(element);

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else if !pretty || element.has_text() || element.has_only_text() {
        // Text-bearing elements are written inline so their text is preserved.
        writer.write_event(Event::Start(start))?;
        for child in &element.children {
            write_node(writer, child, level, false)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.qualified_name())))?;
    } else {
        writer.write_event(Event::Start(start))?;
        writer.get_mut().write_all(b"\n")?;
        for child in &element.children {
            match child {
                XmlNode::Text(_) => {}
                XmlNode::Element(_) => write_node(writer, child, level + 1, true)?,
                XmlNode::CData(_) | XmlNode::Comment(_) => {
                    indent(writer, level + 1)?;
                    write_node(writer, child, level + 1, true)?;
                    writer.get_mut().write_all(b"\n")?;
                }
            }
        }
        indent(writer, level)?;
        writer.write_event(Event::End(BytesEnd::new(element.qualified_name())))?;
    }

    if pretty {
        writer.get_mut().write_all(b"\n")?;
    }
    Ok(())
}
