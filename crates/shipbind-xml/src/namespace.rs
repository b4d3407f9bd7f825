//! Namespace bindings captured from a parsed document.

use std::collections::BTreeMap;

use crate::element::Element;

/// URI of the XML Schema instance namespace.
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix to URI bindings seen in one document.
///
/// The bindings are a snapshot: later changes to the typed tree never touch
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceBindings {
    prefixes: BTreeMap<String, String>,
    default_namespace: Option<String>,
}

impl NamespaceBindings {
    /// Creates empty bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every prefixed declaration in the tree and the root's default
    /// namespace. A prefix declared twice keeps the later URI.
    #[must_use]
    pub fn capture(root: &Element) -> Self {
        let mut bindings = Self {
            default_namespace: root.declared_namespace(None).map(str::to_owned),
            ..Self::default()
        };
        bindings.collect(root);
        tracing::debug!(
            prefixes = bindings.prefixes.len(),
            default = ?bindings.default_namespace,
            "captured namespace bindings"
        );
        bindings
    }

    fn collect(&mut self, element: &Element) {
        for (prefix, uri) in &element.namespace_declarations {
            if let Some(prefix) = prefix {
                self.prefixes.insert(prefix.clone(), uri.clone());
            }
        }
        for child in element.child_elements() {
            self.collect(child);
        }
    }

    /// Returns the URI bound to `prefix`.
    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Returns a prefix bound to `uri`.
    #[must_use]
    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.prefixes
            .iter()
            .find(|(_, bound)| bound.as_str() == uri)
            .map(|(prefix, _)| prefix.as_str())
    }

    /// Binds `prefix` to `uri`, returning the previous URI.
    pub fn insert(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Option<String> {
        self.prefixes.insert(prefix.into(), uri.into())
    }

    /// Returns the default namespace.
    #[must_use]
    pub fn default_namespace(&self) -> Option<&str> {
        self.default_namespace.as_deref()
    }

    /// Replaces the default namespace.
    pub fn set_default_namespace(&mut self, uri: Option<String>) {
        self.default_namespace = uri;
    }

    /// Iterates over prefixed bindings, ordered by prefix.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes
            .iter()
            .map(|(prefix, uri)| (prefix.as_str(), uri.as_str()))
    }

    /// Number of prefixed bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Returns `true` when nothing is bound, default namespace included.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.default_namespace.is_none()
    }

    /// Returns the bindings as element namespace declarations, default first.
    #[must_use]
    pub fn declarations(&self) -> Vec<(Option<String>, String)> {
        self.default_namespace
            .iter()
            .map(|uri| (None, uri.clone()))
            .chain(
                self.prefixes
                    .iter()
                    .map(|(prefix, uri)| (Some(prefix.clone()), uri.clone())),
            )
            .collect()
    }
}
