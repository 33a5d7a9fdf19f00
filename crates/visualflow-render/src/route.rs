//! Orthogonal edge routing.
//!
//! Edges leave a source through the bottom border and enter a target from
//! the row above its top border. Beyond the plain vertical/Z/L shapes the
//! router recognizes two patterns:
//!
//! - **trunk-and-split**: a source whose targets all share a rank, none
//!   of them fanned into from elsewhere, gets one exit, a common trunk and
//!   sweep, and per-target drops;
//! - **merge**: every edge into a target fed by several sources descends
//!   to a shared row and joins the target's center column, so the drawn
//!   paths fuse below that row.

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;
use visualflow_core::{Edge, EdgePath, NodePosition, PositionMap, Segment};

/// Computes paths for a set of edges over fixed box positions. Edges whose
/// endpoints are not positioned are skipped.
pub trait Router {
    fn route(&self, positions: &PositionMap, edges: &[Edge]) -> Vec<EdgePath>;
}

#[derive(Debug, Clone)]
pub struct OrthogonalRouter {
    /// Targets whose top rows differ by no more than this many rows count
    /// as one rank for trunk-and-split detection.
    pub same_rank_tolerance: i32,
}

impl Default for OrthogonalRouter {
    fn default() -> Self {
        Self {
            same_rank_tolerance: 10,
        }
    }
}

impl Router for OrthogonalRouter {
    fn route(&self, positions: &PositionMap, edges: &[Edge]) -> Vec<EdgePath> {
        let mut by_source: IndexMap<&str, Vec<&Edge>> = IndexMap::new();
        let mut by_target: IndexMap<&str, Vec<&Edge>> = IndexMap::new();
        for edge in edges {
            if !positions.contains_key(&edge.source) || !positions.contains_key(&edge.target) {
                continue;
            }
            by_source.entry(edge.source.as_str()).or_default().push(edge);
            by_target.entry(edge.target.as_str()).or_default().push(edge);
        }

        // A target merges when several distinct sources fan into it.
        // Duplicate edges from one source stay independent, so they route
        // identically and rasterize as a single path.
        let merge_targets: FxHashSet<&str> = by_target
            .iter()
            .filter(|(_, group)| {
                group
                    .iter()
                    .map(|edge| edge.source.as_str())
                    .collect::<FxHashSet<&str>>()
                    .len()
                    > 1
            })
            .map(|(target, _)| *target)
            .collect();

        let merge_rows = merge_rows(positions, &by_target, &merge_targets);

        let mut paths: Vec<EdgePath> = Vec::new();
        for (source_id, source_edges) in &by_source {
            let Some(source) = positions.get(*source_id) else {
                continue;
            };

            let mut independent: Vec<&Edge> = Vec::new();
            let mut merging: Vec<&Edge> = Vec::new();
            for edge in source_edges {
                if merge_targets.contains(edge.target.as_str()) {
                    merging.push(edge);
                } else {
                    independent.push(edge);
                }
            }

            // A pure fan-out to one rank shares a single trunk. Merge edges
            // opt out: their targets belong to the merge pattern instead.
            if source_edges.len() > 1 && merging.is_empty() {
                let cluster = self.same_rank_targets(positions, source_edges);
                if cluster == source_edges.len() {
                    paths.extend(route_trunk_split(positions, source_id, source, source_edges));
                    continue;
                }
            }

            // Independent edges take the leftmost exits, merge edges the
            // rightmost, each group in target-x order.
            let target_x = |edge: &Edge| positions.get(&edge.target).map_or(0, |p| p.x);
            independent.sort_by_key(|e| target_x(e));
            merging.sort_by_key(|e| target_x(e));

            let exits = exit_columns(source, source_edges.len());
            let mut assigned: Vec<(&Edge, i32)> = Vec::with_capacity(source_edges.len());
            for (i, edge) in independent.iter().copied().chain(merging.iter().copied()).enumerate() {
                assigned.push((edge, exits[i.min(exits.len() - 1)]));
            }
            assigned.sort_by_key(|(edge, _)| target_x(edge));

            for (edge, exit_x) in assigned {
                let Some(target) = positions.get(&edge.target) else {
                    continue;
                };
                let segments = match merge_rows.get(edge.target.as_str()) {
                    Some(&merge_y) => merge_path(exit_x, source, target, merge_y),
                    None => shape_path(exit_x, source, target),
                };
                paths.push(EdgePath::new(edge.source.clone(), edge.target.clone(), segments));
            }
        }

        debug!(edges = edges.len(), paths = paths.len(), "routed edges");
        paths
    }
}

impl OrthogonalRouter {
    /// Size of the largest same-rank cluster among the targets of
    /// `source_edges`, counted per edge. All edges route trunk-and-split
    /// exactly when the cluster covers them all.
    ///
    /// Within the tolerance window every target counts as one cluster;
    /// beyond it targets fall into `y / tolerance` buckets and the largest
    /// bucket wins (first seen breaks ties). Clusters of one do not count.
    fn same_rank_targets(&self, positions: &PositionMap, source_edges: &[&Edge]) -> usize {
        let target_ys: Vec<i32> = source_edges
            .iter()
            .filter_map(|edge| positions.get(&edge.target).map(|p| p.y))
            .collect();
        if target_ys.len() < 2 {
            return 0;
        }

        let min = target_ys.iter().copied().min().unwrap_or(0);
        let max = target_ys.iter().copied().max().unwrap_or(0);
        if max - min <= self.same_rank_tolerance {
            return target_ys.len();
        }

        let tolerance = self.same_rank_tolerance.max(1);
        let mut buckets: IndexMap<i32, usize> = IndexMap::new();
        for y in target_ys {
            *buckets.entry(y.div_euclid(tolerance)).or_insert(0) += 1;
        }
        let largest = buckets.values().copied().max().unwrap_or(0);
        if largest > 1 { largest } else { 0 }
    }
}

/// Shared merge row per target with indegree > 1: halfway between the
/// lowest source bottom and three rows above the target entry row, clamped
/// to the open band between them. Targets without vertical room for a
/// merge are absent and their edges fall back to plain shapes.
fn merge_rows<'a>(
    positions: &PositionMap,
    by_target: &IndexMap<&'a str, Vec<&Edge>>,
    merge_targets: &FxHashSet<&str>,
) -> FxHashMap<&'a str, i32> {
    let mut rows = FxHashMap::default();
    for (target_id, group) in by_target {
        if !merge_targets.contains(*target_id) {
            continue;
        }
        let Some(target) = positions.get(*target_id) else {
            continue;
        };
        let entry_row = target.y - 1;
        let max_bottom = group
            .iter()
            .filter_map(|edge| positions.get(&edge.source).map(NodePosition::bottom))
            .max()
            .unwrap_or(0);
        if entry_row < max_bottom + 2 {
            continue;
        }
        let merge_y = ((max_bottom + entry_row - 3) / 2).clamp(max_bottom + 1, entry_row - 1);
        rows.insert(*target_id, merge_y);
    }
    rows
}

/// Exit columns on a source's bottom border for `count` outgoing edges.
///
/// One edge exits at the center. Several spread across the border minus
/// its corner cells; a border too narrow for two columns of separation
/// collapses every exit onto the center (overlap is acceptable). Two exits
/// sit at the thirds of the usable span.
pub fn exit_columns(source: &NodePosition, count: usize) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }
    let center = source.center_x();
    if count == 1 {
        return vec![center];
    }

    let left = source.x + 1;
    let right = source.x + source.width() - 2;
    let usable = right - left;
    let k = count as i32;
    if usable < 2 * (k - 1) {
        return vec![center; count];
    }
    if count == 2 {
        let third = usable / 3;
        return vec![left + third, right - third];
    }
    let spacing = usable / (k - 1);
    (0..k).map(|i| left + spacing * i).collect()
}

/// Vertical when aligned, otherwise a Z through the halfway row, an L when
/// the boxes sit too close for the Z, and a bare horizontal stroke when the
/// target does not lie below the source at all.
fn shape_path(exit_x: i32, source: &NodePosition, target: &NodePosition) -> Vec<Segment> {
    let sy = source.bottom();
    let tx = target.center_x();
    let ty = target.y - 1;

    if exit_x == tx && sy <= ty {
        return vec![Segment::new(exit_x, sy, tx, ty)];
    }

    let mid = ((sy + ty) / 2).clamp(sy + 1, (ty - 1).max(sy + 1));
    if sy < mid && mid < ty {
        vec![
            Segment::new(exit_x, sy, exit_x, mid),
            Segment::new(exit_x, mid, tx, mid),
            Segment::new(tx, mid, tx, ty),
        ]
    } else if sy < ty {
        vec![
            Segment::new(exit_x, sy, tx, sy),
            Segment::new(tx, sy, tx, ty),
        ]
    } else {
        vec![Segment::new(exit_x, sy, tx, sy)]
    }
}

fn merge_path(exit_x: i32, source: &NodePosition, target: &NodePosition, merge_y: i32) -> Vec<Segment> {
    let sy = source.bottom();
    let tx = target.center_x();
    let ty = target.y - 1;

    // merge_y clamps above every source bottom, so the descent always exists.
    let mut segments = vec![Segment::new(exit_x, sy, exit_x, merge_y)];
    if exit_x != tx {
        segments.push(Segment::new(exit_x, merge_y, tx, merge_y));
    }
    if merge_y < ty {
        segments.push(Segment::new(tx, merge_y, tx, ty));
    }
    segments
}

/// One exit at the source center, a shared trunk down to three rows above
/// the highest target's entry row, a sweep along that row, and a drop per
/// target. Emits one path per edge; the shared cells coincide.
fn route_trunk_split(
    positions: &PositionMap,
    source_id: &str,
    source: &NodePosition,
    source_edges: &[&Edge],
) -> Vec<EdgePath> {
    let exit_x = source.center_x();
    let sy = source.bottom();

    let mut ordered: Vec<&Edge> = source_edges.to_vec();
    ordered.sort_by_key(|edge| positions.get(&edge.target).map_or(0, |p| p.x));

    let split_y = ordered
        .iter()
        .filter_map(|edge| positions.get(&edge.target).map(|p| p.y))
        .min()
        .unwrap_or(sy)
        - 4;

    let mut paths = Vec::with_capacity(ordered.len());
    for edge in ordered {
        let Some(target) = positions.get(&edge.target) else {
            continue;
        };
        let tx = target.center_x();
        let ty = target.y - 1;

        let mut segments = Vec::new();
        if sy < split_y {
            segments.push(Segment::new(exit_x, sy, exit_x, split_y));
        }
        if exit_x != tx {
            segments.push(Segment::new(exit_x, split_y, tx, split_y));
        }
        if split_y < ty {
            segments.push(Segment::new(tx, split_y, tx, ty));
        }
        if segments.is_empty() {
            // Target directly below a touching source; a single drop is all
            // that fits.
            segments.push(Segment::new(exit_x, sy, tx, ty));
        }
        paths.push(EdgePath::new(source_id, edge.target.clone(), segments));
    }
    paths
}
