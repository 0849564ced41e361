//! Sibling-axis placement by subtree contours.
//!
//! Each subtree is summarised by its contour: for every level below (and
//! including) the subtree root, the leftmost and rightmost box edge. Children
//! are placed left to right; each new child is pushed right just far enough
//! that, on every level both share, its left edge clears the accumulated right
//! edge of its older siblings by the separation. The parent is then centered
//! over its children's row.
//!
//! Outside compact mode a contour keeps a single span, the widest extent of
//! the whole subtree, so each subtree behaves as its bounding rectangle and
//! sibling subtree boxes never overlap.
//!
//! Nodes are visited in reverse pre-order, which places every child before
//! its parent without recursion. A parent takes over the contour of its
//! deepest child and folds the shallower ones into it, so each level is
//! touched once per merge and a chain costs linear time.

use crate::tree::{NodeIndex, Tree};
use vertree_core::geometry::Size;

/// Extent of one level of a subtree along the sibling axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    lo: f32,
    hi: f32,
}

impl Span {
    fn centered(extent: f32) -> Self {
        Self {
            lo: -extent / 2.0,
            hi: extent / 2.0,
        }
    }

    fn shift(self, offset: f32) -> Self {
        Self {
            lo: self.lo + offset,
            hi: self.hi + offset,
        }
    }

    fn union(&mut self, other: Span) {
        self.lo = self.lo.min(other.lo);
        self.hi = self.hi.max(other.hi);
    }
}

/// Level extents of a subtree.
///
/// `spans` are stored deepest level first, relative to `base`, so moving a
/// subtree and adding a level on top are both constant time.
#[derive(Debug, Clone)]
struct Contour {
    spans: Vec<Span>,
    base: f32,
}

impl Contour {
    fn leaf(extent: f32) -> Self {
        Self {
            spans: vec![Span::centered(extent)],
            base: 0.0,
        }
    }

    fn depth(&self) -> usize {
        self.spans.len()
    }

    /// Span of `level`, counted from the subtree root, in absolute coordinates.
    fn level(&self, level: usize) -> Span {
        self.spans[self.spans.len() - 1 - level].shift(self.base)
    }

    fn shift(&mut self, offset: f32) {
        self.base += offset;
    }

    /// Smallest shift of `next` that keeps it `separation` clear of `self` on shared levels.
    fn clearance(&self, next: &Contour, separation: f32) -> f32 {
        (0..self.depth().min(next.depth()))
            .map(|level| self.level(level).hi - next.level(level).lo + separation)
            .fold(f32::NEG_INFINITY, f32::max)
    }

    /// Folds `other` into `self`, keeping whichever span vector is longer.
    fn absorb(&mut self, mut other: Contour) {
        if other.depth() > self.depth() {
            std::mem::swap(self, &mut other);
        }
        let top = self.spans.len() - 1;
        for level in 0..other.depth() {
            let span = other.level(level).shift(-self.base);
            self.spans[top - level].union(span);
        }
    }

    /// Adds the subtree root's own span on top.
    ///
    /// Without `compact` the contour stays a single span covering everything.
    fn push_root(&mut self, span: Span, compact: bool) {
        let span = span.shift(-self.base);
        match self.spans.last_mut() {
            Some(whole) if !compact => whole.union(span),
            _ => self.spans.push(span),
        }
    }
}

/// Returns the sibling-axis center of every node in `order`, indexed by arena slot.
///
/// `sizes` are oriented: `width` runs along the sibling axis.
pub(super) fn place_siblings(
    tree: &Tree,
    order: &[NodeIndex],
    sizes: &[Size],
    separation: f32,
    compact: bool,
) -> Vec<f32> {
    let mut contours: Vec<Option<Contour>> = vec![None; tree.len()];
    let mut offsets = vec![0.0_f32; tree.len()];

    for &idx in order.iter().rev() {
        let own = Span::centered(sizes[idx.index()].width());
        let children = tree.node(idx).children();

        let contour = match children.split_first() {
            None => Contour::leaf(sizes[idx.index()].width()),
            Some((&first, rest)) => {
                let mut row = take_contour(&mut contours, first);
                let mut positions = Vec::with_capacity(children.len());
                positions.push(0.0_f32);

                for &child in rest {
                    let mut next = take_contour(&mut contours, child);
                    let offset = row.clearance(&next, separation);
                    next.shift(offset);
                    row.absorb(next);
                    positions.push(offset);
                }

                let last = children[children.len() - 1];
                let row_lo = positions[0] - sizes[first.index()].width() / 2.0;
                let row_hi = positions[positions.len() - 1] + sizes[last.index()].width() / 2.0;
                let center = (row_lo + row_hi) / 2.0;

                for (&child, position) in children.iter().zip(positions) {
                    offsets[child.index()] = position - center;
                }
                row.shift(-center);
                row.push_root(own, compact);
                row
            }
        };

        contours[idx.index()] = Some(contour);
    }

    let mut centers = vec![0.0_f32; tree.len()];
    for &idx in order {
        if let Some(parent) = tree.node(idx).parent() {
            centers[idx.index()] = centers[parent.index()] + offsets[idx.index()];
        }
    }
    centers
}

fn take_contour(contours: &mut [Option<Contour>], idx: NodeIndex) -> Contour {
    contours[idx.index()]
        .take()
        .expect("children are placed before their parent")
}
