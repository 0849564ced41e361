//! Tidy layout of version trees.
//!
//! [`TreeLayout`] assigns every node reachable from the root a center point
//! such that:
//!
//! - children follow their parent in order along the sibling axis, with at
//!   least `min_horizontal_separation` between adjacent sibling subtrees
//! - a parent is centered over the row formed by its children's boxes
//! - each level sits at least `min_vertical_separation` past the previous one
//! - the root is centered on the origin
//!
//! The sibling axis is horizontal for [`Direction::TopDown`] and
//! [`Direction::BottomUp`] and vertical for the left/right directions; the
//! separations keep their role in the rotated frame.
//!
//! [`VersionTreeLayout`] wraps the whole pipeline (graph to tree to layout)
//! and flattens the result into an id-keyed map for renderers.

mod tidy;
mod version_tree;

pub use version_tree::{LayoutNode, VersionTreeLayout};

use log::{debug, trace};
use serde::Deserialize;
use thiserror::Error;

use vertree_core::{
    geometry::{Bounds, Point, Size},
    identifier::VersionId,
};

use crate::{
    config::LayoutConfig,
    tree::{NodeIndex, Tree},
};

/// Errors raised by [`TreeLayout::calculate`].
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("node {id} has invalid size {width}x{height}; sizes must be finite and positive")]
    InvalidNodeSize {
        id: VersionId,
        width: f32,
        height: f32,
    },

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidSeparation { name: &'static str, value: f32 },
}

/// Where children are placed relative to their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Root at the top, levels grow downward.
    #[default]
    TopDown,
    /// Root at the bottom, levels grow upward.
    BottomUp,
    /// Root on the left, levels grow rightward.
    LeftRight,
    /// Root on the right, levels grow leftward.
    RightLeft,
}

impl Direction {
    fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftRight | Direction::RightLeft)
    }

    /// Size measured as (sibling axis, level axis).
    fn oriented(self, size: Size) -> Size {
        if self.is_horizontal() {
            size.transpose()
        } else {
            size
        }
    }

    /// Maps a (sibling axis, level axis) coordinate back to layout space.
    fn to_point(self, breadth: f32, depth: f32) -> Point {
        match self {
            Direction::TopDown => Point::new(breadth, depth),
            Direction::BottomUp => Point::new(breadth, -depth),
            Direction::LeftRight => Point::new(depth, breadth),
            Direction::RightLeft => Point::new(-depth, breadth),
        }
    }
}

/// Positions computed for a [`Tree`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutResult {
    positions: Vec<Option<Point>>,
    order: Vec<NodeIndex>,
    bounds: Bounds,
}

impl LayoutResult {
    /// Center of the node's box, or `None` if the node is detached from the root.
    pub fn position(&self, idx: NodeIndex) -> Option<Point> {
        self.positions.get(idx.index()).copied().flatten()
    }

    /// Laid-out nodes with their centers, in tree pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, Point)> + '_ {
        self.order
            .iter()
            .filter_map(|&idx| self.position(idx).map(|point| (idx, point)))
    }

    /// Union of all node boxes.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

/// The tidy tree layout engine.
///
/// A parent is centered over the row of its children's own boxes, not over
/// their whole subtrees, so a lopsided child subtree does not pull its parent
/// sideways.
///
/// # Examples
///
/// ```
/// # use vertree::layout::{Direction, TreeLayout};
/// # use vertree::tree::Tree;
/// # use vertree::geometry::Size;
/// # use vertree::identifier::VersionId;
/// let mut tree = Tree::new(VersionId::ROOT, "", Size::new(100.0, 40.0));
/// let child = tree.add_node(VersionId::new(1), " ", Size::new(100.0, 40.0));
/// tree.try_attach(tree.root(), child);
///
/// let layout = TreeLayout::new()
///     .with_direction(Direction::TopDown)
///     .calculate(&tree)
///     .unwrap();
///
/// let position = layout.position(child).unwrap();
/// assert_eq!(position.x(), 0.0);
/// assert_eq!(position.y(), 90.0);
/// ```
#[derive(Debug, Clone)]
pub struct TreeLayout {
    min_horizontal_separation: f32,
    min_vertical_separation: f32,
    direction: Direction,
    compact: bool,
}

impl TreeLayout {
    /// Creates an engine with the default separations (20 between siblings,
    /// 50 between levels), top-down, bounding-box packing.
    pub fn new() -> Self {
        Self::from_config(&LayoutConfig::default())
    }

    /// Creates an engine from a [`LayoutConfig`].
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            min_horizontal_separation: config.min_horizontal_separation(),
            min_vertical_separation: config.min_vertical_separation(),
            direction: config.direction(),
            compact: config.compact(),
        }
    }

    /// Set the minimum gap between adjacent sibling subtrees
    pub fn with_horizontal_separation(mut self, separation: f32) -> Self {
        self.min_horizontal_separation = separation;
        self
    }

    /// Set the minimum gap between consecutive levels
    pub fn with_vertical_separation(mut self, separation: f32) -> Self {
        self.min_vertical_separation = separation;
        self
    }

    /// Set the layout direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Pack sibling subtrees level by level along their contours.
    ///
    /// Compact layouts may tuck a subtree under a neighbour's overhang, so
    /// sibling subtree bounding boxes can overlap even though no two node
    /// boxes do.
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Calculate positions for every node reachable from the root.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::InvalidSeparation`] for negative or non-finite separations
    /// - [`LayoutError::InvalidNodeSize`] for nodes without a finite, positive size
    pub fn calculate(&self, tree: &Tree) -> Result<LayoutResult, LayoutError> {
        self.validate_separations()?;

        let order = tree.preorder();
        let depths = tree.depths();
        let mut sizes = vec![Size::default(); tree.len()];
        for &idx in &order {
            let node = tree.node(idx);
            let size = node.size();
            if !size.is_positive() {
                return Err(LayoutError::InvalidNodeSize {
                    id: node.id(),
                    width: size.width(),
                    height: size.height(),
                });
            }
            sizes[idx.index()] = self.direction.oriented(size);
        }

        let breadths = tidy::place_siblings(
            tree,
            &order,
            &sizes,
            self.min_horizontal_separation,
            self.compact,
        );
        let levels = self.level_centers(&order, &depths, &sizes);

        let mut positions = vec![None; tree.len()];
        let mut bounds: Option<Bounds> = None;
        for &idx in &order {
            let depth = depths[idx.index()].unwrap_or_default();
            let point = self
                .direction
                .to_point(breadths[idx.index()], levels[depth]);
            positions[idx.index()] = Some(point);

            let node_bounds = point.to_bounds(tree.node(idx).size());
            bounds = Some(bounds.map_or(node_bounds, |acc| acc.merge(&node_bounds)));
        }

        let bounds = bounds.unwrap_or_default();
        debug!(
            nodes = order.len(),
            levels = levels.len(),
            width = bounds.width(),
            height = bounds.height();
            "Tree layout calculated"
        );
        trace!(positions:?; "Node positions");

        Ok(LayoutResult {
            positions,
            order,
            bounds,
        })
    }

    fn validate_separations(&self) -> Result<(), LayoutError> {
        for (name, value) in [
            ("min_horizontal_separation", self.min_horizontal_separation),
            ("min_vertical_separation", self.min_vertical_separation),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidSeparation { name, value });
            }
        }
        Ok(())
    }

    /// Center line of each level along the level axis; level 0 sits at zero.
    fn level_centers(
        &self,
        order: &[NodeIndex],
        depths: &[Option<usize>],
        sizes: &[Size],
    ) -> Vec<f32> {
        let mut extents: Vec<f32> = Vec::new();
        for &idx in order {
            let depth = depths[idx.index()].unwrap_or_default();
            if extents.len() <= depth {
                extents.resize(depth + 1, 0.0);
            }
            extents[depth] = extents[depth].max(sizes[idx.index()].height());
        }

        let mut centers = Vec::with_capacity(extents.len());
        let mut center = 0.0;
        for (depth, extent) in extents.iter().enumerate() {
            if depth > 0 {
                center += extents[depth - 1] / 2.0 + self.min_vertical_separation + extent / 2.0;
            }
            centers.push(center);
        }
        centers
    }
}

impl Default for TreeLayout {
    fn default() -> Self {
        Self::new()
    }
}
