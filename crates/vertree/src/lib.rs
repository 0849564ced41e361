//! Vertree - tidy layout of version-history trees.
//!
//! Turns a version graph (versions linked parent to child, possibly with merge
//! edges) and its tags into a rooted tree of labelled boxes, then places every
//! box so that siblings never overlap, parents sit centered over their
//! children and each depth occupies its own band.
//!
//! The pipeline has three stages:
//!
//! 1. [`tree::TreeBuilder`] selects a spanning tree and sizes each node from
//!    its label using a [`metrics::TextMetrics`] implementation.
//! 2. [`layout::TreeLayout`] computes node centers.
//! 3. [`layout::VersionTreeLayout`] exposes the result keyed by version id,
//!    ready for rendering with [`export::svg::render`].
//!
//! [`LayoutBuilder`] runs all of them from an [`config::AppConfig`].

pub mod config;
pub mod export;
pub mod layout;
pub mod tree;
pub mod version;

mod error;

pub use vertree_core::{color, geometry, identifier, metrics};

pub use error::VertreeError;

use log::{debug, info, trace};

use config::AppConfig;
use layout::VersionTreeLayout;
use metrics::TextMetrics;
use version::{TagMap, VersionGraph};

/// Builder for laying out and rendering version trees.
///
/// # Examples
///
/// ```rust
/// use vertree::{
///     LayoutBuilder,
///     config::AppConfig,
///     identifier::VersionId,
///     metrics::FixedMetrics,
///     version::{TagMap, VersionHistory},
/// };
///
/// let mut history = VersionHistory::new();
/// history.add_version(VersionId::ROOT, VersionId::new(1));
/// history.add_version(VersionId::new(1), VersionId::new(2));
///
/// let tags: TagMap = [(VersionId::new(2), "release")].into_iter().collect();
///
/// let builder = LayoutBuilder::new(AppConfig::default());
/// let metrics = FixedMetrics::new(8.0, 15.0).expect("valid metrics");
/// let layout = builder
///     .layout_with_metrics(&history, &tags, metrics)
///     .expect("Failed to lay out");
///
/// assert_eq!(layout.nodes().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct LayoutBuilder {
    config: AppConfig,
}

impl LayoutBuilder {
    /// Create a new layout builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including layout, node and style settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// The configuration this builder runs with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Lay out a version graph, measuring labels as configured by the style.
    ///
    /// # Errors
    ///
    /// Returns [`VertreeError::Metrics`] if the configured text metrics cannot
    /// be created, plus every error of [`LayoutBuilder::layout_with_metrics`].
    pub fn layout<G: VersionGraph>(
        &self,
        graph: &G,
        tags: &TagMap,
    ) -> Result<VersionTreeLayout, VertreeError> {
        debug!(metrics:? = self.config.style().metrics(); "Creating text metrics");
        let metrics = self.config.style().text_metrics()?;
        self.layout_with_metrics(graph, tags, metrics)
    }

    /// Lay out a version graph with explicit text metrics.
    ///
    /// # Errors
    ///
    /// Returns [`VertreeError::Build`] if the configured root is missing from
    /// the graph and [`VertreeError::Layout`] for invalid separations or node
    /// sizes.
    pub fn layout_with_metrics<G: VersionGraph, M: TextMetrics>(
        &self,
        graph: &G,
        tags: &TagMap,
        metrics: M,
    ) -> Result<VersionTreeLayout, VertreeError> {
        info!(tags = tags.len(); "Laying out version tree");
        let layout = VersionTreeLayout::compute(graph, tags, metrics, &self.config)?;
        info!(
            nodes = layout.nodes().len(),
            dropped_edges = layout.dropped_edges().len(),
            detached = layout.detached().len();
            "Layout calculated"
        );
        trace!(layout:?; "Computed layout");

        Ok(layout)
    }

    /// Render a computed layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`VertreeError::Export`] if a configured color is invalid.
    pub fn render_svg(&self, layout: &VersionTreeLayout) -> Result<String, VertreeError> {
        info!("Rendering SVG");
        let document = export::svg::render(layout, self.config.style())?;

        let output = document.to_string();
        debug!(bytes = output.len(); "SVG rendered successfully");
        Ok(output)
    }
}
