#![forbid(unsafe_code)]

//! Edge routing and rasterization for ASCII DAG diagrams.
//!
//! [`OrthogonalRouter`] turns box positions plus edges into orthogonal
//! polylines; [`Canvas`] composes pre-drawn boxes and those polylines onto
//! a character grid and resolves junction glyphs.

pub mod canvas;
pub mod route;

pub use canvas::{Canvas, Cell};
pub use route::{OrthogonalRouter, Router};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// A routed segment was neither vertical nor horizontal. Routers never
    /// produce these; seeing one is a bug in a custom router.
    NonOrthogonalSegment {
        source: String,
        target: String,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NonOrthogonalSegment {
                source,
                target,
                x1,
                y1,
                x2,
                y2,
            } => write!(
                f,
                "edge {source} -> {target} produced a non-orthogonal segment ({x1},{y1})->({x2},{y2})"
            ),
        }
    }
}

impl std::error::Error for Error {}
