//! Configuration types for version tree layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! external sources; every field is optional and falls back to the defaults
//! documented on each type.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Separations, direction and packing of the layout engine.
//! - [`NodeStyle`] - Margins used to size node boxes around their labels.
//! - [`StyleConfig`] - Fonts, text metrics and colors for rendering.
//!
//! # Example
//!
//! ```
//! # use vertree::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().min_horizontal_separation(), 20.0);
//! assert_eq!(config.layout().min_vertical_separation(), 50.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use vertree_core::{
    color::Color,
    identifier::VersionId,
    metrics::{FixedMetrics, FontMetrics, MetricsError, TextMetrics},
};

use crate::layout::Direction;

/// Top-level configuration combining layout, node sizing and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    node: NodeStyle,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, node: NodeStyle, style: StyleConfig) -> Self {
        Self {
            layout,
            node,
            style,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the node sizing configuration.
    pub fn node(&self) -> &NodeStyle {
        &self.node
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Layout engine parameters.
///
/// | Field | Default |
/// |-------|---------|
/// | `direction` | `top-down` |
/// | `min_horizontal_separation` | `20` |
/// | `min_vertical_separation` | `50` |
/// | `compact` | `false` |
/// | `root` | `0` |
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Where children are placed relative to their parent.
    direction: Direction,

    /// Minimum gap between adjacent sibling subtrees.
    min_horizontal_separation: f32,

    /// Minimum gap between consecutive levels.
    min_vertical_separation: f32,

    /// Pack subtrees level by level instead of by bounding box.
    compact: bool,

    /// Version the tree is rooted at.
    root: VersionId,
}

impl LayoutConfig {
    /// Creates a layout configuration with explicit separations and the
    /// remaining fields at their defaults.
    pub fn new(min_horizontal_separation: f32, min_vertical_separation: f32) -> Self {
        Self {
            min_horizontal_separation,
            min_vertical_separation,
            ..Self::default()
        }
    }

    /// Sets the layout direction
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Enables or disables contour packing
    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Sets the root version
    pub fn with_root(mut self, root: VersionId) -> Self {
        self.root = root;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn min_horizontal_separation(&self) -> f32 {
        self.min_horizontal_separation
    }

    pub fn min_vertical_separation(&self) -> f32 {
        self.min_vertical_separation
    }

    pub fn compact(&self) -> bool {
        self.compact
    }

    pub fn root(&self) -> VersionId {
        self.root
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            min_horizontal_separation: 20.0,
            min_vertical_separation: 50.0,
            compact: false,
            root: VersionId::ROOT,
        }
    }
}

/// Margins added around label text to size node boxes.
///
/// | Field | Default |
/// |-------|---------|
/// | `horizontal_margin` | `60` |
/// | `vertical_margin` | `35` |
/// | `empty_label_chars` | `5` |
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    /// Added to the label width.
    horizontal_margin: f32,

    /// Added to the line height.
    vertical_margin: f32,

    /// Minimum box width, expressed as a label of this many spaces.
    empty_label_chars: usize,
}

impl NodeStyle {
    pub fn new(horizontal_margin: f32, vertical_margin: f32, empty_label_chars: usize) -> Self {
        Self {
            horizontal_margin,
            vertical_margin,
            empty_label_chars,
        }
    }

    pub fn horizontal_margin(&self) -> f32 {
        self.horizontal_margin
    }

    pub fn vertical_margin(&self) -> f32 {
        self.vertical_margin
    }

    pub fn empty_label_chars(&self) -> usize {
        self.empty_label_chars
    }
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self::new(60.0, 35.0, 5)
    }
}

/// Which [`TextMetrics`] implementation sizes the node boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MetricsConfig {
    /// Real fonts through cosmic-text, using the style's font family and size.
    #[default]
    Font,

    /// Monospace cell model.
    Fixed { advance: f32, line_height: f32 },
}

/// Visual styling for rendered trees.
///
/// Color fields are CSS color strings; unset colors fall back to renderer
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_family: String,
    font_size: u16,
    metrics: MetricsConfig,
    background_color: Option<String>,
    node_fill: Option<String>,
    node_stroke: Option<String>,
    edge_color: Option<String>,
    text_color: Option<String>,

    /// Space between the tree's bounding box and the canvas edge.
    padding: f32,
}

impl StyleConfig {
    /// Returns a copy using the given metrics provider
    pub fn with_metrics(mut self, metrics: MetricsConfig) -> Self {
        self.metrics = metrics;
        self
    }

    /// Returns a copy with the given background color string
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn metrics(&self) -> MetricsConfig {
        self.metrics
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Builds the configured [`TextMetrics`] provider.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError`] if fonts cannot be loaded or the fixed
    /// metrics are not positive.
    pub fn text_metrics(&self) -> Result<Box<dyn TextMetrics>, MetricsError> {
        Ok(match self.metrics {
            MetricsConfig::Font => Box::new(FontMetrics::new(&self.font_family, self.font_size)?),
            MetricsConfig::Fixed {
                advance,
                line_height,
            } => Box::new(FixedMetrics::new(advance, line_height)?),
        })
    }

    /// Returns the parsed background [`Color`], or `None` if none is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_optional("background_color", self.background_color.as_deref())
    }

    /// Node box fill, `#f5f5dc` by default.
    pub fn node_fill(&self) -> Result<Color, String> {
        parse_or("node_fill", self.node_fill.as_deref(), "#f5f5dc")
    }

    /// Node box outline, `#333333` by default.
    pub fn node_stroke(&self) -> Result<Color, String> {
        parse_or("node_stroke", self.node_stroke.as_deref(), "#333333")
    }

    /// Tree edge stroke, `#777777` by default.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_or("edge_color", self.edge_color.as_deref(), "#777777")
    }

    /// Label color, `None` for the SVG default.
    pub fn text_color(&self) -> Result<Option<Color>, String> {
        parse_optional("text_color", self.text_color.as_deref())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12,
            metrics: MetricsConfig::default(),
            background_color: None,
            node_fill: None,
            node_stroke: None,
            edge_color: None,
            text_color: None,
            padding: 20.0,
        }
    }
}

fn parse_optional(field: &str, value: Option<&str>) -> Result<Option<Color>, String> {
    value
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {field} in config: {err}"))
}

fn parse_or(field: &str, value: Option<&str>, default: &str) -> Result<Color, String> {
    Color::new(value.unwrap_or(default)).map_err(|err| format!("Invalid {field} in config: {err}"))
}
