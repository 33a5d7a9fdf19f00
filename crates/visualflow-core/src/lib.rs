#![forbid(unsafe_code)]

//! Graph model, glyph themes and partitioning for ASCII DAG diagrams.
//!
//! Boxes arrive pre-drawn (borders included); this crate only models them,
//! validates the graph around them and splits it into renderable pieces.
//! Layout and rasterization live in `visualflow-layout` and
//! `visualflow-render`.

pub mod error;
pub mod model;
pub mod partition;
pub mod theme;

pub use error::{Error, Result};
pub use model::{Dag, Edge, EdgePath, LayoutResult, Node, NodePosition, PositionMap, Segment};
pub use partition::partition;
pub use theme::GlyphTheme;
