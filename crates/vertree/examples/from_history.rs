//! Example: laying out a version history built in code
//!
//! Builds a small history with a branch and a merge, prints where each
//! version lands and writes the SVG next to the working directory.

use vertree::{
    LayoutBuilder,
    config::{AppConfig, LayoutConfig, MetricsConfig, NodeStyle, StyleConfig},
    identifier::VersionId,
    version::{TagMap, VersionHistory},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let v = VersionId::new;

    let mut history = VersionHistory::new();
    history.add_version(VersionId::ROOT, v(1));
    history.add_version(v(1), v(2));
    history.add_version(v(1), v(3));
    history.add_version(v(2), v(4));
    // 4 also merges the work done in 3; only the first edge is drawn
    history.add_edge(v(3), v(4));

    let tags: TagMap = [(v(1), "import"), (v(3), "experiment"), (v(4), "release")]
        .into_iter()
        .collect();

    // Fixed metrics keep the example independent of installed fonts
    let style = StyleConfig::default().with_metrics(MetricsConfig::Fixed {
        advance: 7.0,
        line_height: 14.0,
    });
    let config = AppConfig::new(LayoutConfig::default(), NodeStyle::default(), style);
    let builder = LayoutBuilder::new(config);

    let layout = builder.layout(&history, &tags)?;
    for node in layout.nodes().values() {
        println!(
            "version {:>2} {:<12} at ({:>7.1}, {:>6.1})",
            node.id(),
            format!("{:?}", node.label()),
            node.p().x(),
            node.p().y()
        );
    }
    for (parent, child) in layout.dropped_edges() {
        println!("dropped edge {parent} -> {child}");
    }

    let svg = builder.render_svg(&layout)?;
    std::fs::write("from_history.svg", svg)?;
    println!("\nWrote from_history.svg ({} x {})", layout.width(), layout.height());

    Ok(())
}
