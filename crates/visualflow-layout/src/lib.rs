#![forbid(unsafe_code)]

//! Box placement for ASCII DAG diagrams.
//!
//! A [`Positioner`] turns a validated graph into integer character-cell
//! positions. The contract every implementation must honor:
//!
//! - for every edge `(u, v)`, `y(u) + height(u) <= y(v)`
//! - bounding rectangles of distinct boxes are disjoint
//! - all coordinates are non-negative
//! - the reported canvas contains every box, with at least one cell of
//!   top/left margin and the configured spacing as right/bottom padding
//!
//! [`LayeredPositioner`] is the built-in implementation. Engines that
//! delegate to an external layout tool may block and may fail; they
//! report failures through [`Error::EngineFailed`].

pub mod layered;

pub use layered::LayeredPositioner;
use visualflow_core::{Dag, LayoutResult};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout engine {name} failed: {message}")]
    EngineFailed { name: String, message: String },
}

pub trait Positioner {
    /// Short engine name, used when attributing failures.
    fn name(&self) -> &str;

    fn compute(&self, dag: &Dag) -> Result<LayoutResult>;
}
