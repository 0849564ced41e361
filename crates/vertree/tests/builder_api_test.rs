//! Integration tests for the LayoutBuilder API

use float_cmp::assert_approx_eq;

use vertree::{
    LayoutBuilder, VertreeError,
    config::{AppConfig, LayoutConfig, MetricsConfig, NodeStyle, StyleConfig},
    identifier::VersionId,
    layout::Direction,
    metrics::FixedMetrics,
    tree::BuildError,
    version::{TagMap, VersionHistory},
};

fn fixed_style() -> StyleConfig {
    StyleConfig::default().with_metrics(MetricsConfig::Fixed {
        advance: 10.0,
        line_height: 15.0,
    })
}

fn history() -> VersionHistory {
    let mut history = VersionHistory::new();
    history.add_version(VersionId::ROOT, VersionId::new(1));
    history.add_version(VersionId::new(1), VersionId::new(2));
    history.add_version(VersionId::new(1), VersionId::new(3));
    history.add_version(VersionId::new(3), VersionId::new(4));
    // Merge of 2 into 4
    history.add_edge(VersionId::new(2), VersionId::new(4));
    history
}

#[test]
fn test_builder_api_exists() {
    let _builder = LayoutBuilder::default();
}

#[test]
fn test_layout_with_configured_fixed_metrics() {
    let config = AppConfig::new(LayoutConfig::default(), NodeStyle::default(), fixed_style());
    let builder = LayoutBuilder::new(config);
    let tags: TagMap = [(VersionId::new(4), "v1.0")].into_iter().collect();

    let layout = builder
        .layout(&history(), &tags)
        .expect("Failed to lay out history");

    assert_eq!(layout.nodes().len(), 5);
    assert_eq!(layout.edges().len(), 4);
    assert_eq!(layout.dropped_edges().len(), 1);
    assert!(layout.detached().is_empty());

    let root = &layout.nodes()[&VersionId::ROOT];
    assert_approx_eq!(f32, root.p().x(), 0.0);
    assert_approx_eq!(f32, root.p().y(), 0.0);
    assert_eq!(layout.nodes()[&VersionId::new(4)].label(), "v1.0");
}

#[test]
fn test_layout_children_below_parents() {
    let builder = LayoutBuilder::default();
    let metrics = FixedMetrics::new(8.0, 15.0).unwrap();
    let layout = builder
        .layout_with_metrics(&history(), &TagMap::new(), metrics)
        .unwrap();

    for (parent, child) in layout.edges() {
        let parent = &layout.nodes()[parent];
        let child = &layout.nodes()[child];
        assert!(child.p().y() > parent.p().y());
    }
}

#[test]
fn test_layout_missing_root() {
    let layout_config = LayoutConfig::default().with_root(VersionId::new(99));
    let config = AppConfig::new(layout_config, NodeStyle::default(), fixed_style());
    let builder = LayoutBuilder::new(config);

    let result = builder.layout(&history(), &TagMap::new());
    assert!(matches!(
        result,
        Err(VertreeError::Build(BuildError::RootNotFound(id))) if id == VersionId::new(99)
    ));
}

#[test]
fn test_layout_with_subtree_root() {
    let layout_config = LayoutConfig::default().with_root(VersionId::new(3));
    let config = AppConfig::new(layout_config, NodeStyle::default(), fixed_style());
    let builder = LayoutBuilder::new(config);

    let mut history = VersionHistory::new();
    history.add_version(VersionId::ROOT, VersionId::new(1));
    history.add_version(VersionId::new(1), VersionId::new(2));
    history.add_version(VersionId::new(1), VersionId::new(3));
    history.add_version(VersionId::new(3), VersionId::new(4));

    let layout = builder.layout(&history, &TagMap::new()).unwrap();

    assert_eq!(layout.detached().len(), 3);
    let ids: Vec<_> = layout.nodes().keys().copied().collect();
    assert_eq!(ids, vec![VersionId::new(3), VersionId::new(4)]);
}

#[test]
fn test_invalid_separation_is_reported() {
    let layout_config = LayoutConfig::new(-1.0, 50.0);
    let config = AppConfig::new(layout_config, NodeStyle::default(), fixed_style());
    let builder = LayoutBuilder::new(config);

    let result = builder.layout(&history(), &TagMap::new());
    assert!(matches!(result, Err(VertreeError::Layout(_))));
}

#[test]
fn test_render_svg() {
    let config = AppConfig::new(
        LayoutConfig::default().with_direction(Direction::LeftRight),
        NodeStyle::default(),
        fixed_style(),
    );
    let builder = LayoutBuilder::new(config);
    let tags: TagMap = [(VersionId::new(2), "feature")].into_iter().collect();

    let layout = builder.layout(&history(), &tags).unwrap();
    let svg = builder.render_svg(&layout).expect("Failed to render");

    assert!(svg.contains("<svg"));
    assert!(svg.contains("feature"));
    assert_eq!(svg.matches("<rect").count(), 5);
}
