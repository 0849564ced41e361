//! Geometric primitives for tree layout.
//!
//! - [`Point`] - A 2D coordinate in layout space
//! - [`Size`] - Width and height of a node box
//! - [`Bounds`] - An axis-aligned rectangle given by its minimum and maximum corners
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! Layout space follows the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Node positions are box centers. A top-down layout therefore grows toward
//! positive Y, with the root centered on the origin.

/// A 2D point in layout space.
///
/// # Examples
///
/// ```
/// # use vertree_core::geometry::{Point, Size};
/// let child = Point::new(40.0, 90.0);
///
/// let bounds = child.to_bounds(Size::new(100.0, 50.0));
/// assert_eq!(bounds.min_x(), -10.0);
/// assert_eq!(bounds.max_y(), 115.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Returns the bounds of a box of `size` centered on this point
    pub fn to_bounds(self, size: Size) -> Bounds {
        Bounds::new_from_center(self, size)
    }
}

/// Width and height of a box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Swaps width and height.
    ///
    /// Used to measure boxes along a rotated frame, e.g. for left-to-right trees.
    pub fn transpose(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Returns `true` if both dimensions are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle defined by its minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates bounds of `size` centered on `center`
    pub fn new_from_center(center: Point, size: Size) -> Self {
        let half_width = size.width / 2.0;
        let half_height = size.height / 2.0;
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_height,
            max_x: center.x + half_width,
            max_y: center.y + half_height,
        }
    }

    pub fn min_x(self) -> f32 {
        self.min_x
    }

    pub fn min_y(self) -> f32 {
        self.min_y
    }

    pub fn max_x(self) -> f32 {
        self.max_x
    }

    pub fn max_y(self) -> f32 {
        self.max_y
    }

    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn to_size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Returns the smallest bounds containing both `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vertree_core::geometry::{Bounds, Point, Size};
    /// let root = Bounds::new_from_center(Point::new(0.0, 0.0), Size::new(100.0, 50.0));
    /// let child = Bounds::new_from_center(Point::new(60.0, 100.0), Size::new(80.0, 50.0));
    ///
    /// let all = root.merge(&child);
    /// assert_eq!(all.min_x(), -50.0);
    /// assert_eq!(all.max_x(), 100.0);
    /// assert_eq!(all.height(), 150.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Grows the bounds outward by `insets` on each side
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left(),
            min_y: self.min_y - insets.top(),
            max_x: self.max_x + insets.right(),
            max_y: self.max_y + insets.bottom(),
        }
    }
}

/// Spacing around an element with independent values per side
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Insets {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Insets {
    /// Creates insets in CSS order: top, right, bottom, left
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on every side
    pub fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn top(self) -> f32 {
        self.top
    }

    pub fn right(self) -> f32 {
        self.right
    }

    pub fn bottom(self) -> f32 {
        self.bottom
    }

    pub fn left(self) -> f32 {
        self.left
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_point_to_bounds() {
        let bounds = Point::new(10.0, 20.0).to_bounds(Size::new(6.0, 8.0));

        assert_eq!(bounds.min_x(), 7.0);
        assert_eq!(bounds.min_y(), 16.0);
        assert_eq!(bounds.max_x(), 13.0);
        assert_eq!(bounds.max_y(), 24.0);
    }

    #[test]
    fn test_size_transpose() {
        let size = Size::new(120.0, 50.0).transpose();
        assert_eq!(size.width(), 50.0);
        assert_eq!(size.height(), 120.0);
    }

    #[test]
    fn test_size_is_positive() {
        assert!(Size::new(1.0, 1.0).is_positive());
        assert!(!Size::new(0.0, 1.0).is_positive());
        assert!(!Size::new(1.0, -2.0).is_positive());
        assert!(!Size::new(f32::NAN, 1.0).is_positive());
        assert!(!Size::new(f32::INFINITY, 1.0).is_positive());
    }

    #[test]
    fn test_bounds_new_from_center() {
        let center = Point::new(50.0, 60.0);
        let bounds = Bounds::new_from_center(center, Size::new(20.0, 30.0));

        assert_eq!(bounds.min_x(), 40.0);
        assert_eq!(bounds.min_y(), 45.0);
        assert_eq!(bounds.width(), 20.0);
        assert_eq!(bounds.height(), 30.0);
        assert_eq!(bounds.max_y(), 75.0);
    }

    #[test]
    fn test_bounds_to_size() {
        let bounds = Bounds::new_from_center(Point::new(5.0, 5.0), Size::new(10.0, 20.0));
        assert_eq!(bounds.to_size(), Size::new(10.0, 20.0));
    }

    #[test]
    fn test_bounds_merge_is_commutative() {
        let a = Bounds::new_from_center(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_center(Point::new(-3.5, 21.5), Size::new(3.0, 3.0));

        assert_eq!(a.merge(&b), b.merge(&a));
        assert_eq!(a.merge(&a), a);
    }

    #[test]
    fn test_bounds_add_padding() {
        let bounds = Bounds::new_from_center(Point::new(50.0, 25.0), Size::new(100.0, 50.0));
        let padded = bounds.add_padding(Insets::new(1.0, 2.0, 3.0, 4.0));

        assert_approx_eq!(f32, padded.min_x(), -4.0);
        assert_approx_eq!(f32, padded.min_y(), -1.0);
        assert_approx_eq!(f32, padded.width(), 106.0);
        assert_approx_eq!(f32, padded.height(), 54.0);
    }

    #[test]
    fn test_insets_uniform() {
        assert_eq!(Insets::uniform(7.0), Insets::new(7.0, 7.0, 7.0, 7.0));
    }
}
