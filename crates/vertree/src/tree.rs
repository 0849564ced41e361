//! Arena-backed rooted trees.
//!
//! A [`Tree`] stores its nodes in a flat vector and links them by
//! [`NodeIndex`]: parents own an ordered list of child indices, children keep
//! a non-owning back reference to their parent. The first node added is the
//! root and can never receive a parent.
//!
//! Trees are built by [`TreeBuilder`] from a version graph and consumed by the
//! layout engine. All traversals are iterative, so arbitrarily deep version
//! histories do not exhaust the call stack.

mod builder;

pub use builder::{BuildError, TreeBuilder};

use std::collections::HashMap;

use vertree_core::{geometry::Size, identifier::VersionId};

/// Position of a node in its [`Tree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(usize);

impl NodeIndex {
    /// Returns the raw arena slot.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node of a version tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    id: VersionId,
    label: String,
    size: Size,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl TreeNode {
    pub fn id(&self) -> VersionId {
        self.id
    }

    /// Display text: a tag name, empty for an untagged root, a single space otherwise.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Intrinsic box size, independent of layout.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Children in attachment order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A rooted, ordered tree of versions.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    index: HashMap<VersionId, NodeIndex>,
    dropped_edges: Vec<(VersionId, VersionId)>,
    detached: Vec<VersionId>,
}

impl Tree {
    /// Creates a tree holding only its root.
    pub fn new(root: VersionId, label: impl Into<String>, size: Size) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            dropped_edges: Vec::new(),
            detached: Vec::new(),
        };
        tree.add_node(root, label, size);
        tree
    }

    /// Adds a parentless node, or returns the existing node for `id`.
    pub fn add_node(&mut self, id: VersionId, label: impl Into<String>, size: Size) -> NodeIndex {
        if let Some(&existing) = self.index.get(&id) {
            return existing;
        }

        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(TreeNode {
            id,
            label: label.into(),
            size,
            parent: None,
            children: Vec::new(),
        });
        self.index.insert(id, idx);
        idx
    }

    /// Makes `child` the last child of `parent` if `child` has no parent yet.
    ///
    /// Returns `false`, leaving the tree untouched and recording the edge as
    /// dropped, when `child` already has a parent, is the root, or is
    /// `parent` itself. The first edge to reach a node decides its parent.
    pub fn try_attach(&mut self, parent: NodeIndex, child: NodeIndex) -> bool {
        let attachable =
            child != self.root() && child != parent && self.nodes[child.0].parent.is_none();

        if !attachable {
            let edge = (self.nodes[parent.0].id, self.nodes[child.0].id);
            self.dropped_edges.push(edge);
            return false;
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        true
    }

    pub fn root(&self) -> NodeIndex {
        NodeIndex(0)
    }

    pub fn node(&self, idx: NodeIndex) -> &TreeNode {
        &self.nodes[idx.0]
    }

    /// Looks up the node for a version.
    pub fn get(&self, id: VersionId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    /// Number of nodes in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges rejected by [`Tree::try_attach`], in the order they were tried.
    pub fn dropped_edges(&self) -> &[(VersionId, VersionId)] {
        &self.dropped_edges
    }

    /// Versions that ended up unreachable from the root.
    pub fn detached(&self) -> &[VersionId] {
        &self.detached
    }

    /// Nodes reachable from the root in depth-first pre-order, children left to right.
    pub fn preorder(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];

        while let Some(idx) = stack.pop() {
            order.push(idx);
            stack.extend(self.nodes[idx.0].children.iter().rev().copied());
        }

        order
    }

    /// Depth of every reachable node, indexed by arena slot; `None` for detached nodes.
    pub fn depths(&self) -> Vec<Option<usize>> {
        let mut depths = vec![None; self.nodes.len()];
        for idx in self.preorder() {
            let depth = match self.nodes[idx.0].parent {
                Some(parent) => depths[parent.0].map_or(0, |d: usize| d + 1),
                None => 0,
            };
            depths[idx.0] = Some(depth);
        }
        depths
    }

    /// Recomputes [`Tree::detached`] from the current parent links.
    fn collect_detached(&mut self) {
        let mut reachable = vec![false; self.nodes.len()];
        for idx in self.preorder() {
            reachable[idx.0] = true;
        }

        self.detached = self
            .nodes
            .iter()
            .zip(reachable)
            .filter(|(_, reachable)| !reachable)
            .map(|(node, _)| node.id)
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> Size {
        Size::new(10.0, 10.0)
    }

    fn id(raw: u64) -> VersionId {
        VersionId::new(raw)
    }

    #[test]
    fn test_new_tree_has_root_only() {
        let tree = Tree::new(id(0), "", size());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).id(), id(0));
        assert!(tree.node(tree.root()).parent().is_none());
        assert_eq!(tree.preorder(), vec![tree.root()]);
    }

    #[test]
    fn test_add_node_is_idempotent_per_id() {
        let mut tree = Tree::new(id(0), "", size());
        let a = tree.add_node(id(1), "a", size());
        let again = tree.add_node(id(1), "other", size());
        assert_eq!(a, again);
        assert_eq!(tree.node(a).label(), "a");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_try_attach_first_parent_wins() {
        let mut tree = Tree::new(id(0), "", size());
        let a = tree.add_node(id(1), " ", size());
        let b = tree.add_node(id(2), " ", size());
        let c = tree.add_node(id(3), " ", size());

        assert!(tree.try_attach(tree.root(), a));
        assert!(tree.try_attach(tree.root(), b));
        assert!(tree.try_attach(a, c));
        assert!(!tree.try_attach(b, c));

        assert_eq!(tree.node(c).parent(), Some(a));
        assert!(tree.node(b).is_leaf());
        assert_eq!(tree.dropped_edges(), &[(id(2), id(3))]);
    }

    #[test]
    fn test_try_attach_refuses_root_and_self() {
        let mut tree = Tree::new(id(0), "", size());
        let a = tree.add_node(id(1), " ", size());

        assert!(!tree.try_attach(a, tree.root()));
        assert!(!tree.try_attach(a, a));
        assert!(tree.node(tree.root()).parent().is_none());
        assert_eq!(tree.dropped_edges().len(), 2);
    }

    #[test]
    fn test_preorder_and_depths() {
        let mut tree = Tree::new(id(0), "", size());
        let a = tree.add_node(id(1), " ", size());
        let b = tree.add_node(id(2), " ", size());
        let c = tree.add_node(id(3), " ", size());
        tree.try_attach(tree.root(), a);
        tree.try_attach(tree.root(), b);
        tree.try_attach(a, c);

        assert_eq!(tree.preorder(), vec![tree.root(), a, c, b]);
        assert_eq!(tree.depths(), vec![Some(0), Some(1), Some(1), Some(2)]);
    }

    #[test]
    fn test_collect_detached_finds_unreachable_cycle() {
        let mut tree = Tree::new(id(0), "", size());
        let a = tree.add_node(id(1), " ", size());
        let b = tree.add_node(id(2), " ", size());
        tree.try_attach(a, b);
        tree.try_attach(b, a);
        tree.collect_detached();

        assert_eq!(tree.detached(), &[id(1), id(2)]);
        assert_eq!(tree.preorder(), vec![tree.root()]);
        assert_eq!(tree.depths(), vec![Some(0), None, None]);
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut tree = Tree::new(id(0), "", size());
        let mut parent = tree.root();
        for raw in 1..=50_000 {
            let child = tree.add_node(id(raw), " ", size());
            tree.try_attach(parent, child);
            parent = child;
        }

        assert_eq!(tree.preorder().len(), 50_001);
        assert_eq!(tree.depths()[50_000], Some(50_000));
    }
}
