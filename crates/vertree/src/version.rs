//! Version graphs and tags.
//!
//! The tree builder reads a version history through the [`VersionGraph`]
//! trait so any store that can enumerate vertices and outgoing edges in a
//! stable order can be laid out. [`VersionHistory`] is the in-memory
//! implementation used by the CLI and the tests.
//!
//! Enumeration order matters: it decides which parent a merged version is
//! attached to and the left-to-right order of siblings in the final layout.

use indexmap::IndexMap;
use petgraph::graphmap::DiGraphMap;

use vertree_core::identifier::VersionId;

/// Read-only view of a directed version graph.
pub trait VersionGraph {
    /// All vertices, in a stable order.
    fn vertices(&self) -> impl Iterator<Item = VersionId> + '_;

    /// Returns `true` if `id` is a vertex of the graph.
    fn contains(&self, id: VersionId) -> bool;

    /// Versions reachable from `id` in one hop, in a stable order.
    fn edges_from(&self, id: VersionId) -> impl Iterator<Item = VersionId> + '_;
}

/// In-memory version history backed by a petgraph [`DiGraphMap`].
///
/// Vertices and outgoing edges enumerate in insertion order. The root
/// version ([`VersionId::ROOT`]) is always present.
///
/// # Examples
///
/// ```
/// # use vertree::version::{VersionGraph, VersionHistory};
/// # use vertree::identifier::VersionId;
/// let mut history = VersionHistory::new();
/// history.add_version(VersionId::ROOT, VersionId::new(1));
/// history.add_version(VersionId::ROOT, VersionId::new(2));
///
/// let children: Vec<_> = history.edges_from(VersionId::ROOT).collect();
/// assert_eq!(children, vec![VersionId::new(1), VersionId::new(2)]);
/// ```
#[derive(Debug, Clone)]
pub struct VersionHistory {
    graph: DiGraphMap<VersionId, ()>,
}

impl VersionHistory {
    /// Creates a history holding only the root version.
    pub fn new() -> Self {
        let mut graph = DiGraphMap::new();
        graph.add_node(VersionId::ROOT);
        Self { graph }
    }

    /// Records `child` as derived from `parent`, adding either vertex if missing.
    pub fn add_version(&mut self, parent: VersionId, child: VersionId) {
        self.add_edge(parent, child);
    }

    /// Adds a directed edge between two versions.
    ///
    /// Besides plain derivation this is how merges are recorded: a version
    /// with several incoming edges. Re-adding an existing edge is a no-op.
    pub fn add_edge(&mut self, from: VersionId, to: VersionId) {
        self.graph.add_edge(from, to, ());
    }

    /// Adds a vertex with no edges.
    pub fn add_vertex(&mut self, id: VersionId) {
        self.graph.add_node(id);
    }

    pub fn version_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for VersionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionGraph for VersionHistory {
    fn vertices(&self) -> impl Iterator<Item = VersionId> + '_ {
        self.graph.nodes()
    }

    fn contains(&self, id: VersionId) -> bool {
        self.graph.contains_node(id)
    }

    fn edges_from(&self, id: VersionId) -> impl Iterator<Item = VersionId> + '_ {
        self.graph.neighbors_directed(id, petgraph::Direction::Outgoing)
    }
}

/// A human-readable name bound to a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Tags keyed by version, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TagMap {
    tags: IndexMap<VersionId, Tag>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags `id`, replacing any previous tag while keeping its position.
    pub fn insert(&mut self, id: VersionId, tag: Tag) -> Option<Tag> {
        self.tags.insert(id, tag)
    }

    pub fn get(&self, id: VersionId) -> Option<&Tag> {
        self.tags.get(&id)
    }

    /// Iterates `(id, tag)` pairs in insertion order.
    pub fn items(&self) -> impl Iterator<Item = (VersionId, &Tag)> {
        self.tags.iter().map(|(id, tag)| (*id, tag))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(VersionId, S)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (VersionId, S)>>(iter: I) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(|(id, name)| (id, Tag::new(name)))
                .collect(),
        }
    }
}
