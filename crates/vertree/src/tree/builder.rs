//! Building version trees from version graphs.

use log::{debug, trace, warn};
use thiserror::Error;

use vertree_core::{geometry::Size, identifier::VersionId, metrics::TextMetrics};

use super::Tree;
use crate::{
    config::NodeStyle,
    version::{TagMap, VersionGraph},
};

/// Label given to versions that carry no tag.
const ANONYMOUS_LABEL: &str = " ";

/// Errors raised while turning a version graph into a tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("root version {0} not found in the version graph")]
    RootNotFound(VersionId),
}

/// Turns a [`VersionGraph`] and its [`TagMap`] into a rooted [`Tree`].
///
/// Nodes are created in a fixed order: the root, then every tagged version
/// present in the graph (tag order), then every other version the first time
/// an edge touches it. Edges are collected vertex by vertex in
/// [`VersionGraph::edges_from`] order and replayed through
/// [`Tree::try_attach`], so the first edge reaching a version decides its
/// parent and later ones are dropped.
///
/// Box sizes come from the injected [`TextMetrics`]:
///
/// ```text
/// width  = max(empty_width, horizontal_margin + metrics.width(label))
/// height = metrics.height() + vertical_margin
/// ```
///
/// where `empty_width` is the width of a label of `empty_label_chars` spaces.
///
/// # Examples
///
/// ```
/// # use vertree::tree::TreeBuilder;
/// # use vertree::version::{TagMap, VersionHistory};
/// # use vertree::identifier::VersionId;
/// # use vertree::metrics::FixedMetrics;
/// let mut history = VersionHistory::new();
/// history.add_version(VersionId::ROOT, VersionId::new(1));
/// let tags: TagMap = [(VersionId::new(1), "first")].into_iter().collect();
///
/// let metrics = FixedMetrics::new(8.0, 16.0).unwrap();
/// let tree = TreeBuilder::new(&metrics).build(&history, &tags).unwrap();
///
/// let first = tree.get(VersionId::new(1)).unwrap();
/// assert_eq!(tree.node(first).label(), "first");
/// assert_eq!(tree.node(first).parent(), Some(tree.root()));
/// ```
pub struct TreeBuilder<M> {
    metrics: M,
    style: NodeStyle,
    root: VersionId,
}

impl<M: TextMetrics> TreeBuilder<M> {
    /// Creates a builder with default node margins and [`VersionId::ROOT`] as root.
    pub fn new(metrics: M) -> Self {
        Self {
            metrics,
            style: NodeStyle::default(),
            root: VersionId::ROOT,
        }
    }

    /// Sets the margins used to size node boxes
    pub fn with_style(mut self, style: NodeStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the version the tree is rooted at
    pub fn with_root(mut self, root: VersionId) -> Self {
        self.root = root;
        self
    }

    /// Builds the tree.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::RootNotFound`] if the root is not a vertex of `graph`.
    pub fn build<G: VersionGraph>(&self, graph: &G, tags: &TagMap) -> Result<Tree, BuildError> {
        if !graph.contains(self.root) {
            return Err(BuildError::RootNotFound(self.root));
        }

        let root_label = tags.get(self.root).map_or("", |tag| tag.name());
        let mut tree = Tree::new(self.root, root_label, self.node_size(root_label));

        for (id, tag) in tags.items() {
            if !graph.contains(id) {
                debug!(version = id.get(); "Skipping tag for unknown version");
                continue;
            }
            tree.add_node(id, tag.name(), self.node_size(tag.name()));
        }

        let mut edges = Vec::new();
        for vertex in graph.vertices() {
            for child in graph.edges_from(vertex) {
                edges.push((vertex, child));
                for id in [vertex, child] {
                    if tree.get(id).is_none() {
                        tree.add_node(id, ANONYMOUS_LABEL, self.node_size(ANONYMOUS_LABEL));
                    }
                }
            }
        }
        debug!(nodes = tree.len(), edges = edges.len(); "Collected version graph");

        for (parent_id, child_id) in edges {
            let (Some(parent), Some(child)) = (tree.get(parent_id), tree.get(child_id)) else {
                continue;
            };
            if !tree.try_attach(parent, child) {
                trace!(parent = parent_id.get(), child = child_id.get(); "Dropped edge");
            }
        }

        tree.collect_detached();

        if !tree.dropped_edges().is_empty() {
            warn!(count = tree.dropped_edges().len(); "Dropped edges to versions that already have a parent");
        }
        if !tree.detached().is_empty() {
            warn!(count = tree.detached().len(); "Versions unreachable from the root are left out of the tree");
        }

        Ok(tree)
    }

    fn node_size(&self, label: &str) -> Size {
        let empty_label = ANONYMOUS_LABEL.repeat(self.style.empty_label_chars());
        let empty_width = self.style.horizontal_margin() + self.metrics.width(&empty_label);
        let width = (self.style.horizontal_margin() + self.metrics.width(label)).max(empty_width);
        let height = self.metrics.height() + self.style.vertical_margin();

        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use vertree_core::metrics::FixedMetrics;

    use super::*;
    use crate::version::{Tag, VersionHistory};

    fn id(raw: u64) -> VersionId {
        VersionId::new(raw)
    }

    fn metrics() -> FixedMetrics {
        FixedMetrics::new(10.0, 15.0).unwrap()
    }

    fn labels(tree: &Tree) -> Vec<(u64, String)> {
        tree.preorder()
            .into_iter()
            .map(|idx| (tree.node(idx).id().get(), tree.node(idx).label().to_string()))
            .collect()
    }

    #[test]
    fn test_root_only_graph() {
        let history = VersionHistory::new();
        let tree = TreeBuilder::new(metrics())
            .build(&history, &TagMap::new())
            .unwrap();

        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(tree.root()).label(), "");
        assert!(tree.dropped_edges().is_empty());
        assert!(tree.detached().is_empty());
    }

    #[test]
    fn test_root_not_found() {
        let history = VersionHistory::new();
        let result = TreeBuilder::new(metrics())
            .with_root(id(7))
            .build(&history, &TagMap::new());

        assert_eq!(result.unwrap_err(), BuildError::RootNotFound(id(7)));
    }

    #[test]
    fn test_labels_for_tagged_anonymous_and_root() {
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(1));
        history.add_version(id(1), id(2));
        let tags: TagMap = [(id(2), "release")].into_iter().collect();

        let tree = TreeBuilder::new(metrics()).build(&history, &tags).unwrap();

        assert_eq!(
            labels(&tree),
            vec![
                (0, String::new()),
                (1, " ".to_string()),
                (2, "release".to_string())
            ]
        );
    }

    #[test]
    fn test_tagged_root_keeps_single_node() {
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(1));
        let tags: TagMap = [(id(0), "base")].into_iter().collect();

        let tree = TreeBuilder::new(metrics()).build(&history, &tags).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(tree.root()).label(), "base");
    }

    #[test]
    fn test_tags_for_unknown_versions_are_skipped() {
        let history = VersionHistory::new();
        let tags: TagMap = [(id(99), "ghost")].into_iter().collect();

        let tree = TreeBuilder::new(metrics()).build(&history, &tags).unwrap();
        assert!(tree.get(id(99)).is_none());
    }

    #[test]
    fn test_node_sizes_from_metrics_and_margins() {
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(1));
        history.add_version(id(0), id(2));
        let tags: TagMap = [(id(2), "a much longer tag")].into_iter().collect();

        let tree = TreeBuilder::new(metrics()).build(&history, &tags).unwrap();

        // Empty width: 60 + 5 spaces * 10
        let root = tree.node(tree.root()).size();
        assert_approx_eq!(f32, root.width(), 110.0);
        assert_approx_eq!(f32, root.height(), 50.0);

        let anonymous = tree.node(tree.get(id(1)).unwrap()).size();
        assert_approx_eq!(f32, anonymous.width(), 110.0);

        // 60 + 17 chars * 10
        let tagged = tree.node(tree.get(id(2)).unwrap()).size();
        assert_approx_eq!(f32, tagged.width(), 230.0);
        assert_approx_eq!(f32, tagged.height(), 50.0);
    }

    #[test]
    fn test_custom_style() {
        let history = VersionHistory::new();
        let style = NodeStyle::new(10.0, 4.0, 2);

        let tree = TreeBuilder::new(metrics())
            .with_style(style)
            .build(&history, &TagMap::new())
            .unwrap();

        let root = tree.node(tree.root()).size();
        assert_approx_eq!(f32, root.width(), 30.0);
        assert_approx_eq!(f32, root.height(), 19.0);
    }

    #[test]
    fn test_children_follow_edge_order() {
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(3));
        history.add_version(id(0), id(1));
        history.add_version(id(0), id(2));

        let tree = TreeBuilder::new(metrics())
            .build(&history, &TagMap::new())
            .unwrap();

        let children: Vec<_> = tree
            .node(tree.root())
            .children()
            .iter()
            .map(|&child| tree.node(child).id())
            .collect();
        assert_eq!(children, vec![id(3), id(1), id(2)]);
    }

    #[test]
    fn test_diamond_first_edge_wins() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(1));
        history.add_version(id(0), id(2));
        history.add_version(id(1), id(3));
        history.add_edge(id(2), id(3));

        let tree = TreeBuilder::new(metrics())
            .build(&history, &TagMap::new())
            .unwrap();

        let merged = tree.get(id(3)).unwrap();
        assert_eq!(tree.node(merged).parent(), tree.get(id(1)));
        assert!(tree.node(tree.get(id(2)).unwrap()).is_leaf());
        assert_eq!(tree.dropped_edges(), &[(id(2), id(3))]);
    }

    #[test]
    fn test_vertex_order_decides_merge_parent() {
        // Version 2 is enumerated before version 1, so its edge to 3 wins
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(2));
        history.add_version(id(0), id(1));
        history.add_version(id(1), id(3));
        history.add_edge(id(2), id(3));

        let tree = TreeBuilder::new(metrics())
            .build(&history, &TagMap::new())
            .unwrap();

        let merged = tree.get(id(3)).unwrap();
        assert_eq!(tree.node(merged).parent(), tree.get(id(2)));
        assert_eq!(tree.dropped_edges(), &[(id(1), id(3))]);
    }

    #[test]
    fn test_isolated_untagged_vertex_is_not_a_node() {
        let mut history = VersionHistory::new();
        history.add_vertex(id(5));

        let tree = TreeBuilder::new(metrics())
            .build(&history, &TagMap::new())
            .unwrap();
        assert!(tree.get(id(5)).is_none());
    }

    #[test]
    fn test_unreachable_versions_are_detached() {
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(1));
        history.add_version(id(7), id(8));
        let mut tags = TagMap::new();
        tags.insert(id(7), Tag::new("orphan"));

        let tree = TreeBuilder::new(metrics()).build(&history, &tags).unwrap();

        assert_eq!(tree.detached(), &[id(7), id(8)]);
        assert_eq!(tree.preorder().len(), 2);
    }

    #[test]
    fn test_edge_back_to_root_is_dropped() {
        let mut history = VersionHistory::new();
        history.add_version(id(0), id(1));
        history.add_edge(id(1), id(0));

        let tree = TreeBuilder::new(metrics())
            .build(&history, &TagMap::new())
            .unwrap();

        assert!(tree.node(tree.root()).parent().is_none());
        assert_eq!(tree.dropped_edges(), &[(id(1), id(0))]);
    }
}
