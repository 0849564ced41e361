//! Version tree layout: the graph-to-geometry pipeline.

use indexmap::IndexMap;
use log::{debug, info};

use vertree_core::{
    geometry::{Bounds, Point, Size},
    identifier::VersionId,
    metrics::TextMetrics,
};

use super::TreeLayout;
use crate::{
    config::AppConfig,
    error::VertreeError,
    tree::TreeBuilder,
    version::{TagMap, VersionGraph},
};

/// Geometry of one laid-out version.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    p: Point,
    width: f32,
    height: f32,
    id: VersionId,
    label: String,
}

impl LayoutNode {
    /// Center of the node's box.
    pub fn p(&self) -> Point {
        self.p
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn id(&self) -> VersionId {
        self.id
    }

    /// Tag name, empty for an untagged root, a single space for anonymous versions.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The node's box.
    pub fn bounds(&self) -> Bounds {
        self.p.to_bounds(Size::new(self.width, self.height))
    }
}

/// Flattened layout of a version history, keyed by version.
///
/// Every call to [`VersionTreeLayout::layout_from`] rebuilds the tree and
/// replaces all contents; nothing is carried over between calls.
///
/// # Examples
///
/// ```
/// # use vertree::config::AppConfig;
/// # use vertree::identifier::VersionId;
/// # use vertree::layout::VersionTreeLayout;
/// # use vertree::metrics::FixedMetrics;
/// # use vertree::version::{TagMap, VersionHistory};
/// let mut history = VersionHistory::new();
/// history.add_version(VersionId::ROOT, VersionId::new(1));
/// let tags: TagMap = [(VersionId::new(1), "tagged")].into_iter().collect();
/// let metrics = FixedMetrics::new(8.0, 15.0).unwrap();
///
/// let mut layout = VersionTreeLayout::new();
/// layout
///     .layout_from(&history, &tags, &metrics, &AppConfig::default())
///     .unwrap();
///
/// assert_eq!(layout.nodes().len(), 2);
/// assert_eq!(layout.nodes()[&VersionId::new(1)].label(), "tagged");
/// assert_eq!(layout.scale(), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionTreeLayout {
    nodes: IndexMap<VersionId, LayoutNode>,
    edges: Vec<(VersionId, VersionId)>,
    dropped_edges: Vec<(VersionId, VersionId)>,
    detached: Vec<VersionId>,
    bounds: Bounds,
    width: f32,
    height: f32,
    /// Reserved for a zoom factor. Always 0.0; nothing reads it yet.
    scale: f32,
}

impl VersionTreeLayout {
    /// Creates an empty layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `graph` and returns the result.
    ///
    /// # Errors
    ///
    /// See [`VersionTreeLayout::layout_from`].
    pub fn compute<G: VersionGraph, M: TextMetrics>(
        graph: &G,
        tags: &TagMap,
        metrics: M,
        config: &AppConfig,
    ) -> Result<Self, VertreeError> {
        let mut layout = Self::new();
        layout.layout_from(graph, tags, metrics, config)?;
        Ok(layout)
    }

    /// Rebuilds this layout from a version graph.
    ///
    /// Builds the version tree with `metrics` sizing the node boxes, runs the
    /// tree layout with the configured separations and direction, and
    /// replaces the node map, edges and canvas size.
    ///
    /// # Errors
    ///
    /// Returns [`VertreeError::Build`] if the configured root is not in the
    /// graph and [`VertreeError::Layout`] for invalid separations or node
    /// sizes. On error the previous contents are left untouched.
    pub fn layout_from<G: VersionGraph, M: TextMetrics>(
        &mut self,
        graph: &G,
        tags: &TagMap,
        metrics: M,
        config: &AppConfig,
    ) -> Result<(), VertreeError> {
        info!(root = config.layout().root().get(); "Building version tree");
        let tree = TreeBuilder::new(metrics)
            .with_style(*config.node())
            .with_root(config.layout().root())
            .build(graph, tags)?;

        let layout = TreeLayout::from_config(config.layout()).calculate(&tree)?;

        let mut nodes = IndexMap::with_capacity(tree.len());
        let mut edges = Vec::with_capacity(tree.len().saturating_sub(1));
        for (idx, p) in layout.iter() {
            let node = tree.node(idx);
            let size = node.size();
            nodes.insert(
                node.id(),
                LayoutNode {
                    p,
                    width: size.width(),
                    height: size.height(),
                    id: node.id(),
                    label: node.label().to_string(),
                },
            );
            if let Some(parent) = node.parent() {
                edges.push((tree.node(parent).id(), node.id()));
            }
        }

        let bounds = layout.bounds();
        *self = Self {
            nodes,
            edges,
            dropped_edges: tree.dropped_edges().to_vec(),
            detached: tree.detached().to_vec(),
            bounds,
            width: bounds.width(),
            height: bounds.height(),
            scale: 0.0,
        };

        debug!(
            nodes = self.nodes.len(),
            width = self.width,
            height = self.height;
            "Version tree laid out"
        );
        Ok(())
    }

    /// Laid-out versions in tree pre-order.
    pub fn nodes(&self) -> &IndexMap<VersionId, LayoutNode> {
        &self.nodes
    }

    /// Tree edges `(parent, child)` in pre-order of the child.
    pub fn edges(&self) -> &[(VersionId, VersionId)] {
        &self.edges
    }

    /// Graph edges left out because their target already had a parent.
    pub fn dropped_edges(&self) -> &[(VersionId, VersionId)] {
        &self.dropped_edges
    }

    /// Versions unreachable from the root, not laid out.
    pub fn detached(&self) -> &[VersionId] {
        &self.detached
    }

    /// Bounding box of all node boxes.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Reserved zoom factor, always 0.0.
    pub fn scale(&self) -> f32 {
        self.scale
    }
}
