//! Parent back-references for nodes built from one document.
//!
//! Nodes never point at their parents directly. Each node built from a source
//! document is registered here and carries the returned [`NodeId`]; the table
//! answers parent, tag and line queries for diagnostics.

use std::fmt;

/// Identifier of a node inside one [`Lineage`] table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Returns the position of the node in its table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the table knows about one node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageEntry {
    /// Originating tag (local name).
    pub tag: String,
    /// Parent node, `None` for the root.
    pub parent: Option<NodeId>,
    /// Source line, when kept.
    pub line: Option<u64>,
}

/// Append-only table of node origins for one parse.
#[derive(Debug, Clone, Default)]
pub struct Lineage {
    entries: Vec<LineageEntry>,
}

impl Lineage {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node and returns its id.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        parent: Option<NodeId>,
        line: Option<u64>,
    ) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(LineageEntry {
            tag: tag.into(),
            parent,
            line,
        });
        id
    }

    /// Returns the entry of a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&LineageEntry> {
        self.entries.get(id.0)
    }

    /// Returns the parent of a node.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|entry| entry.parent)
    }

    /// Returns the source line of a node.
    #[must_use]
    pub fn line_of(&self, id: NodeId) -> Option<u64> {
        self.get(id).and_then(|entry| entry.line)
    }

    /// Returns the slash-separated tag path from the root to `id`.
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> String {
        let mut tags = Vec::new();
        let mut current = Some(id);
        // Parents are always registered before their children.
        while let Some(node) = current {
            let Some(entry) = self.get(node) else { break };
            tags.push(entry.tag.as_str());
            current = entry.parent.filter(|parent| parent.0 < node.0);
        }
        tags.reverse();
        tags.join("/")
    }

    /// Number of registered nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no node was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
