#![forbid(unsafe_code)]

//! ASCII diagrams of DAGs built from pre-drawn text boxes.
//!
//! Callers hand over boxes that are already drawn (borders and all); the
//! pipeline only positions them and draws the edges between them:
//!
//! ```
//! use visualflow::Dag;
//!
//! let mut dag = Dag::new();
//! dag.add_node("a", "+---+\n| A |\n+---+").unwrap();
//! dag.add_node("b", "+---+\n| B |\n+---+").unwrap();
//! dag.add_edge("a", "b");
//!
//! let diagram = visualflow::render(&dag).unwrap();
//! assert!(diagram.contains("| A |"));
//! ```
//!
//! The graph is split into connected components, each component is laid
//! out by a [`Positioner`], its edges are routed by a [`Router`], and the
//! result is rasterized onto a [`Canvas`] with the selected [`GlyphTheme`].
//! Standalone nodes come last, below the connected components.

pub mod settings;

pub use settings::default_theme;
pub use visualflow_core::{
    Dag, Edge, EdgePath, GlyphTheme, LayoutResult, Node, NodePosition, PositionMap, Segment,
    partition,
};
pub use visualflow_layout::{LayeredPositioner, Positioner};
pub use visualflow_render::{Canvas, OrthogonalRouter, Router};

use tracing::debug;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] visualflow_core::Error),

    #[error(transparent)]
    Layout(#[from] visualflow_layout::Error),

    #[error(transparent)]
    Render(#[from] visualflow_render::Error),

    /// A layout engine produced output the pipeline cannot draw from:
    /// missing positions, negative coordinates or overlapping boxes.
    #[error("layout engine {name} returned a malformed layout: {message}")]
    MalformedLayout { name: String, message: String },
}

/// Renders with the defaults: the layered positioner, the orthogonal
/// router and the process-default theme (see [`default_theme`]).
pub fn render(dag: &Dag) -> Result<String> {
    render_with(
        dag,
        &LayeredPositioner::default(),
        &OrthogonalRouter::default(),
        &default_theme(),
    )
}

/// Renders `dag` to a multi-line string.
///
/// Connected components render largest first, then the standalone nodes
/// as one final group; blocks are separated by a blank row. An empty graph
/// (or one whose positioner places nothing) renders to `""`. The input is
/// never mutated and nothing is shared between calls, so concurrent
/// renders of disjoint graphs need no coordination.
pub fn render_with(
    dag: &Dag,
    positioner: &dyn Positioner,
    router: &dyn Router,
    theme: &GlyphTheme,
) -> Result<String> {
    dag.validate()?;
    if dag.is_empty() {
        return Ok(String::new());
    }

    let (components, standalones) = partition(dag);
    debug!(
        components = components.len(),
        standalones = standalones.node_count(),
        "rendering graph"
    );

    let mut blocks: Vec<String> = Vec::new();
    for component in &components {
        let block = render_component(component, positioner, router, theme)?;
        if !block.is_empty() {
            blocks.push(block);
        }
    }
    if !standalones.is_empty() {
        let block = render_component(&standalones, positioner, router, theme)?;
        if !block.is_empty() {
            blocks.push(block);
        }
    }
    Ok(blocks.join("\n\n"))
}

fn render_component(
    dag: &Dag,
    positioner: &dyn Positioner,
    router: &dyn Router,
    theme: &GlyphTheme,
) -> Result<String> {
    let layout = positioner.compute(dag)?;
    if layout.positions.is_empty() {
        return Ok(String::new());
    }
    check_layout(positioner.name(), dag, &layout)?;

    let mut canvas = Canvas::new(layout.width, layout.height, *theme);
    for position in layout.positions.values() {
        canvas.place_box(&position.node.content, position.x, position.y);
    }

    if !dag.edges.is_empty() {
        let paths = router.route(&layout.positions, &dag.edges);
        // Each path starts at its exit column, one row below the source
        // box; the connector goes on the border cell above that start.
        for path in &paths {
            if let (Some(source), Some(first)) =
                (layout.positions.get(&path.source_id), path.segments.first())
            {
                canvas.stamp_connector(first.x1, source.bottom() - 1);
            }
        }
        for path in &paths {
            canvas.draw_path(path)?;
        }
        canvas.repair_junctions();
    }

    debug!(
        width = canvas.width(),
        height = canvas.height(),
        "component rasterized"
    );
    Ok(canvas.render())
}

fn check_layout(name: &str, dag: &Dag, layout: &LayoutResult) -> Result<()> {
    let malformed = |message: String| Error::MalformedLayout {
        name: name.to_string(),
        message,
    };

    for id in dag.nodes.keys() {
        if !layout.positions.contains_key(id) {
            return Err(malformed(format!("no position for node {id}")));
        }
    }
    for position in layout.positions.values() {
        if position.x < 0 || position.y < 0 {
            return Err(malformed(format!(
                "negative coordinates ({}, {}) for node {}",
                position.x, position.y, position.node.id
            )));
        }
    }
    let all: Vec<&NodePosition> = layout.positions.values().collect();
    for (i, first) in all.iter().enumerate() {
        for second in &all[i + 1..] {
            if first.overlaps(second) {
                return Err(malformed(format!(
                    "boxes {} and {} overlap",
                    first.node.id, second.node.id
                )));
            }
        }
    }
    Ok(())
}
