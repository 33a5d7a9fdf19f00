//! Core data model.
//!
//! Coordinates are character cells: `x` is a column, `y` is a row, origin
//! top-left. Signed integers are used so that malformed positions coming
//! from an external layout engine (e.g. negative coordinates) stay
//! representable long enough to be rejected by the pipeline.

use std::collections::VecDeque;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthStr;

use crate::error::{Error, Result};

/// A node of the graph. `content` is the complete pre-drawn box, borders
/// included; the model never edits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub content: String,
}

impl Node {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
        }
    }

    /// Box width in display columns, taken from the first content line.
    /// East-Asian wide glyphs count as two columns.
    pub fn width(&self) -> i32 {
        self.content
            .split('\n')
            .next()
            .map(|line| line.width() as i32)
            .unwrap_or(0)
    }

    /// Box height in rows (content line count).
    pub fn height(&self) -> i32 {
        self.content.split('\n').count() as i32
    }
}

/// A directed edge between two node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A directed acyclic graph of pre-drawn boxes.
///
/// Nodes keep insertion order; every downstream stage iterates them in
/// that order, which is what makes rendering deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dag {
    pub nodes: IndexMap<String, Node>,
    pub edges: Vec<Edge>,
}

impl Dag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node. Ids must be unique.
    pub fn add_node(&mut self, id: impl Into<String>, content: impl Into<String>) -> Result<()> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }
        let node = Node::new(id.clone(), content);
        self.nodes.insert(id, node);
        Ok(())
    }

    /// Appends a directed edge. Endpoints are checked by [`Dag::validate`],
    /// not here, so graphs can be built in any order.
    pub fn add_edge(&mut self, source: impl Into<String>, target: impl Into<String>) {
        self.edges.push(Edge::new(source, target));
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Checks that every edge endpoint resolves and that the edge relation
    /// is acyclic (Kahn's algorithm). Multigraph edges are allowed.
    pub fn validate(&self) -> Result<()> {
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(Error::UnknownEndpoint {
                        source: edge.source.clone(),
                        target: edge.target.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }

        let mut indegree: FxHashMap<&str, usize> = FxHashMap::default();
        let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for id in self.nodes.keys() {
            indegree.insert(id.as_str(), 0);
        }
        for edge in &self.edges {
            *indegree.entry(edge.target.as_str()).or_insert(0) += 1;
            children
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }

        let mut queue: VecDeque<&str> = self
            .nodes
            .keys()
            .map(String::as_str)
            .filter(|id| indegree[id] == 0)
            .collect();
        let mut processed = 0usize;
        while let Some(id) = queue.pop_front() {
            processed += 1;
            if let Some(kids) = children.get(id) {
                for &kid in kids {
                    let deg = indegree.entry(kid).or_insert(0);
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(kid);
                    }
                }
            }
        }

        if processed < self.nodes.len() {
            // Every unprocessed node sits on (or downstream of) a cycle;
            // report the first one in insertion order.
            let id = self
                .nodes
                .keys()
                .find(|id| indegree[id.as_str()] > 0)
                .cloned()
                .unwrap_or_default();
            return Err(Error::Cycle { id });
        }
        Ok(())
    }
}

/// A positioned node: `x`/`y` address the top-left cell of its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePosition {
    pub node: Node,
    pub x: i32,
    pub y: i32,
}

impl NodePosition {
    pub fn new(node: Node, x: i32, y: i32) -> Self {
        Self { node, x, y }
    }

    pub fn width(&self) -> i32 {
        self.node.width()
    }

    pub fn height(&self) -> i32 {
        self.node.height()
    }

    /// Column of the box center.
    pub fn center_x(&self) -> i32 {
        self.x + self.node.width() / 2
    }

    /// First row below the box.
    pub fn bottom(&self) -> i32 {
        self.y + self.node.height()
    }

    /// First column right of the box.
    pub fn right(&self) -> i32 {
        self.x + self.node.width()
    }

    /// True when the bounding rectangles of `self` and `other` share a cell.
    pub fn overlaps(&self, other: &NodePosition) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Positions keyed by node id, in layout emission order.
pub type PositionMap = IndexMap<String, NodePosition>;

/// Output of a positioner: positions plus a canvas size guaranteed to
/// contain every box with padding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub positions: PositionMap,
    pub width: i32,
    pub height: i32,
}

/// One axis-aligned stroke of an edge path, from `(x1, y1)` to `(x2, y2)`
/// inclusive. Zero-length segments rasterize as a single glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Segment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }

    pub fn is_horizontal(&self) -> bool {
        self.y1 == self.y2
    }

    pub fn is_axis_aligned(&self) -> bool {
        self.is_vertical() || self.is_horizontal()
    }

    pub fn start(&self) -> (i32, i32) {
        (self.x1, self.y1)
    }

    pub fn end(&self) -> (i32, i32) {
        (self.x2, self.y2)
    }
}

/// The routed polyline for one edge. Consecutive segments are
/// piecewise-connected: segment `i + 1` starts where segment `i` ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePath {
    pub source_id: String,
    pub target_id: String,
    pub segments: Vec<Segment>,
}

impl EdgePath {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        segments: Vec<Segment>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            segments,
        }
    }
}
