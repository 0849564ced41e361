//! Color handling for rendered version trees.
//!
//! [`Color`] wraps `DynamicColor` from the color crate so styles can be
//! written as CSS color strings and handed to the SVG writer directly.

use std::{fmt, str::FromStr};

use color::DynamicColor;

/// A parsed CSS color.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Parses a CSS color string such as `"#ff0000"`, `"rgb(0, 0, 255)"` or `"navy"`.
    ///
    /// # Errors
    ///
    /// Returns a message naming the rejected input if it is not a valid color.
    ///
    /// # Examples
    ///
    /// ```
    /// use vertree_core::color::Color;
    ///
    /// let fill = Color::new("#f5f5dc").unwrap();
    /// assert_eq!(fill.alpha(), 1.0);
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
