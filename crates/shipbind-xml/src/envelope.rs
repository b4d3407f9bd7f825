//! SOAP envelope helpers for carrier web services.
//!
//! Requests are built by embedding an exported payload in an envelope;
//! responses are unwrapped with [`body_content`] before binding, and SOAP
//! faults are read with [`extract_fault`].

use std::fmt;

use crate::element::{Element, WriteOptions};

/// Envelope namespace of SOAP 1.1.
pub const SOAP11_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
/// Envelope namespace of SOAP 1.2.
pub const SOAP12_NAMESPACE: &str = "http://www.w3.org/2003/05/soap-envelope";

/// SOAP protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoapVersion {
    /// SOAP 1.1.
    #[default]
    Soap11,
    /// SOAP 1.2.
    Soap12,
}

impl SoapVersion {
    /// Returns the envelope namespace URI.
    #[must_use]
    pub fn namespace(self) -> &'static str {
        match self {
            Self::Soap11 => SOAP11_NAMESPACE,
            Self::Soap12 => SOAP12_NAMESPACE,
        }
    }

    /// Returns the version whose envelope namespace is `uri`.
    #[must_use]
    pub fn from_namespace(uri: &str) -> Option<Self> {
        match uri {
            SOAP11_NAMESPACE => Some(Self::Soap11),
            SOAP12_NAMESPACE => Some(Self::Soap12),
            _ => None,
        }
    }
}

impl fmt::Display for SoapVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Soap11 => f.write_str("SOAP 1.1"),
            Self::Soap12 => f.write_str("SOAP 1.2"),
        }
    }
}

/// A SOAP fault read from a response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    /// Fault code, e.g. `soap:Server`.
    pub code: String,
    /// Human-readable reason.
    pub reason: String,
    /// Serialized `detail` content, if any.
    pub detail: Option<String>,
    /// Protocol version of the envelope.
    pub version: SoapVersion,
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fault {}: {}", self.version, self.code, self.reason)
    }
}

/// Wraps `body` (and an optional header payload) in an envelope.
#[must_use]
pub fn create_envelope(
    body: Element,
    header: Option<Element>,
    version: SoapVersion,
    prefix: &str,
) -> Element {
    let prefix = Some(prefix.to_owned());
    let mut envelope = Element::new("Envelope").with_prefix(prefix.clone());
    envelope.declare_namespace(prefix.as_deref(), version.namespace());

    let mut header_element = Element::new("Header").with_prefix(prefix.clone());
    if let Some(header) = header {
        header_element.push_element(header);
    }
    envelope.push_element(header_element);

    let mut body_element = Element::new("Body").with_prefix(prefix);
    body_element.push_element(body);
    envelope.push_element(body_element);
    envelope
}

/// Returns the first element inside the envelope body.
///
/// A document that is not an envelope is returned as is.
#[must_use]
pub fn body_content(root: &Element) -> Option<&Element> {
    if root.local_name() != "Envelope" {
        return Some(root);
    }
    root.child("Body")?.child_elements().next()
}

/// Reads the first SOAP fault in a document.
#[must_use]
pub fn extract_fault(root: &Element) -> Option<SoapFault> {
    let fault = find_elements(root, "Fault").into_iter().next()?;
    let version = envelope_version(root);

    if let Some(code) = fault.child("faultcode") {
        return Some(SoapFault {
            code: code.text().trim().to_owned(),
            reason: child_text(fault, "faultstring"),
            detail: fault.child("detail").and_then(detail_markup),
            version: SoapVersion::Soap11,
        });
    }

    let code = fault
        .child("Code")
        .and_then(|code| code.child("Value"))
        .map(|value| value.text().trim().to_owned())
        .unwrap_or_default();
    let reason = fault
        .child("Reason")
        .and_then(|reason| reason.child("Text"))
        .map(|text| text.text().trim().to_owned())
        .unwrap_or_default();
    Some(SoapFault {
        code,
        reason,
        detail: fault.child("Detail").and_then(detail_markup),
        version: version.unwrap_or(SoapVersion::Soap12),
    })
}

/// Collects every element with this local name, depth first.
#[must_use]
pub fn find_elements<'a>(root: &'a Element, local_name: &str) -> Vec<&'a Element> {
    root.find_all(local_name)
}

fn envelope_version(root: &Element) -> Option<SoapVersion> {
    let prefix = root.prefix.as_deref();
    root.declared_namespace(prefix)
        .and_then(SoapVersion::from_namespace)
}

fn child_text(element: &Element, local_name: &str) -> String {
    element
        .child(local_name)
        .map(|child| child.text().trim().to_owned())
        .unwrap_or_default()
}

fn detail_markup(detail: &Element) -> Option<String> {
    let options = WriteOptions {
        pretty: false,
        xml_declaration: false,
    };
    let markup = detail
        .child_elements()
        .filter_map(|child| child.to_xml_string(&options).ok())
        .collect::<String>();
    if markup.is_empty() {
        let text = detail.text();
        let text = text.trim();
        return (!text.is_empty()).then(|| text.to_owned());
    }
    Some(markup)
}
