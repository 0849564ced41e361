//! SVG rendering of a [`VersionTreeLayout`].
//!
//! The document is sized to the layout's bounding box plus the style's
//! padding. Tree edges are drawn first, center to center, so the node boxes
//! painted on top hide the line ends.

use log::debug;
use svg::{
    Document,
    node::element::{Group, Line, Rectangle, Text},
};

use vertree_core::{
    color::Color,
    geometry::{Insets, Point},
};

use super::ExportError;
use crate::{
    config::StyleConfig,
    layout::{LayoutNode, VersionTreeLayout},
};

/// Corner radius of node boxes.
const NODE_CORNER_RADIUS: f32 = 8.0;

/// Renders `layout` with the colors and fonts of `style`.
///
/// # Errors
///
/// Returns [`ExportError::InvalidColor`] if any configured color fails to parse.
pub fn render(layout: &VersionTreeLayout, style: &StyleConfig) -> Result<Document, ExportError> {
    Ok(Svg::from_style(style)?.render(layout))
}

/// SVG renderer with colors resolved from a [`StyleConfig`].
#[derive(Debug, Clone)]
pub struct Svg {
    background: Option<Color>,
    node_fill: Color,
    node_stroke: Color,
    edge_color: Color,
    text_color: Option<Color>,
    font_family: String,
    font_size: u16,
    padding: Insets,
}

impl Svg {
    /// Resolves the colors and fonts of `style`.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidColor`] if any configured color fails to parse.
    pub fn from_style(style: &StyleConfig) -> Result<Self, ExportError> {
        Ok(Self {
            background: style
                .background_color()
                .map_err(ExportError::InvalidColor)?,
            node_fill: style.node_fill().map_err(ExportError::InvalidColor)?,
            node_stroke: style.node_stroke().map_err(ExportError::InvalidColor)?,
            edge_color: style.edge_color().map_err(ExportError::InvalidColor)?,
            text_color: style.text_color().map_err(ExportError::InvalidColor)?,
            font_family: style.font_family().to_string(),
            font_size: style.font_size(),
            padding: Insets::uniform(style.padding()),
        })
    }

    /// Renders the layout to an SVG document
    pub fn render(&self, layout: &VersionTreeLayout) -> Document {
        let content_bounds = layout.bounds();
        let canvas = content_bounds.add_padding(self.padding).to_size();

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", canvas.width(), canvas.height()),
            )
            .set("width", canvas.width())
            .set("height", canvas.height());

        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", canvas.width())
                    .set("height", canvas.height())
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        // Shift the tree so its bounding box starts at the padding corner
        let mut main_group = Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                self.padding.left() - content_bounds.min_x(),
                self.padding.top() - content_bounds.min_y()
            ),
        );

        let mut edges = Group::new().set("class", "edges");
        for (parent, child) in layout.edges() {
            let (Some(parent), Some(child)) = (layout.nodes().get(parent), layout.nodes().get(child))
            else {
                continue;
            };
            edges = edges.add(self.render_edge(parent.p(), child.p()));
        }
        main_group = main_group.add(edges);

        let mut nodes = Group::new().set("class", "versions");
        for node in layout.nodes().values() {
            nodes = nodes.add(self.render_node(node));
        }
        main_group = main_group.add(nodes);

        debug!(
            nodes = layout.nodes().len(),
            edges = layout.edges().len(),
            width = canvas.width(),
            height = canvas.height();
            "Rendered SVG document"
        );

        doc.add(main_group)
    }

    fn render_edge(&self, from: Point, to: Point) -> Line {
        Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", &self.edge_color)
            .set("stroke-width", 1.5)
    }

    fn render_node(&self, node: &LayoutNode) -> Group {
        let bounds = node.bounds();
        let mut group = Group::new()
            .set("class", "version")
            .set("data-id", node.id().to_string());

        group = group.add(
            Rectangle::new()
                .set("x", bounds.min_x())
                .set("y", bounds.min_y())
                .set("width", bounds.width())
                .set("height", bounds.height())
                .set("rx", NODE_CORNER_RADIUS)
                .set("fill", &self.node_fill)
                .set("fill-opacity", self.node_fill.alpha())
                .set("stroke", &self.node_stroke),
        );

        let label = node.label().trim();
        if !label.is_empty() {
            let mut text = Text::new(label)
                .set("x", node.p().x())
                .set("y", node.p().y())
                .set("text-anchor", "middle")
                .set("dominant-baseline", "central")
                .set("font-family", self.font_family.as_str())
                .set("font-size", self.font_size);
            if let Some(color) = &self.text_color {
                text = text
                    .set("fill", color)
                    .set("fill-opacity", color.alpha());
            }
            group = group.add(text);
        }

        group
    }
}
