//! The built-in layered positioner.
//!
//! Places boxes rank by rank: layer assignment by longest path from the
//! roots, within-layer ordering by a barycenter sweep, rows from cumulative
//! layer heights, columns by left-to-right packing nudged toward parent
//! centers. Weakly connected components are laid out independently and
//! placed side by side with a wide gutter.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;
use visualflow_core::{Dag, LayoutResult, NodePosition, PositionMap};

use crate::{Positioner, Result};

/// Gutter between weakly connected components, as a multiple of
/// `horizontal_spacing`.
const COMPONENT_GUTTER: i32 = 4;

#[derive(Debug, Clone)]
pub struct LayeredPositioner {
    /// Columns between neighboring boxes in a layer. Also the left margin
    /// and the right canvas padding.
    pub horizontal_spacing: i32,
    /// Rows between consecutive layers. Also the top margin and the bottom
    /// canvas padding.
    pub vertical_spacing: i32,
    /// Barycenter rounds; each round is one forward and one backward sweep.
    pub ordering_sweeps: usize,
}

impl Default for LayeredPositioner {
    fn default() -> Self {
        Self {
            horizontal_spacing: 4,
            vertical_spacing: 6,
            ordering_sweeps: 2,
        }
    }
}

impl Positioner for LayeredPositioner {
    fn name(&self) -> &str {
        "layered"
    }

    fn compute(&self, dag: &Dag) -> Result<LayoutResult> {
        Ok(self.layout(dag))
    }
}

struct ComponentFrame {
    /// `(id, x, y)` relative to the component origin, in placement order.
    positions: Vec<(String, i32, i32)>,
    width: i32,
}

impl LayeredPositioner {
    fn layout(&self, dag: &Dag) -> LayoutResult {
        if dag.is_empty() {
            return LayoutResult::default();
        }

        let components = weak_components(dag);
        debug!(components = components.len(), "layered placement");

        let mut positions = PositionMap::new();
        let mut x_offset = 0i32;
        for ids in &components {
            let frame = self.layout_component(dag, ids);
            for (id, x, y) in frame.positions {
                let Some(node) = dag.node(&id) else { continue };
                positions.insert(
                    id,
                    NodePosition::new(
                        node.clone(),
                        x + x_offset + self.horizontal_spacing,
                        y + self.vertical_spacing,
                    ),
                );
            }
            x_offset += frame.width + self.horizontal_spacing * COMPONENT_GUTTER;
        }

        let mut width = 0i32;
        let mut height = 0i32;
        for pos in positions.values() {
            width = width.max(pos.right() + self.horizontal_spacing);
            height = height.max(pos.bottom() + self.vertical_spacing);
        }
        debug!(width, height, "layered placement done");
        LayoutResult {
            positions,
            width,
            height,
        }
    }

    fn layout_component(&self, dag: &Dag, ids: &[&str]) -> ComponentFrame {
        let member: FxHashSet<&str> = ids.iter().copied().collect();
        let mut parents: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        let mut children: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
        for edge in &dag.edges {
            let (s, t) = (edge.source.as_str(), edge.target.as_str());
            if member.contains(s) && member.contains(t) {
                children.entry(s).or_default().push(t);
                parents.entry(t).or_default().push(s);
            }
        }

        let layers = assign_layers(ids, &children, &parents);
        let layer_count = ids.iter().map(|id| layers[id] + 1).max().unwrap_or(1);
        let mut groups: Vec<Vec<&str>> = vec![Vec::new(); layer_count];
        for &id in ids {
            groups[layers[id]].push(id);
        }

        for _ in 0..self.ordering_sweeps {
            order_by_barycenter(&mut groups, &parents, &children);
        }

        let mut layer_y = Vec::with_capacity(groups.len());
        let mut y = 0i32;
        for group in &groups {
            layer_y.push(y);
            let tallest = group
                .iter()
                .filter_map(|id| dag.node(id).map(|n| n.height()))
                .max()
                .unwrap_or(0);
            y += tallest + self.vertical_spacing;
        }

        let mut centers: FxHashMap<&str, i32> = FxHashMap::default();
        let mut positions: Vec<(String, i32, i32)> = Vec::with_capacity(ids.len());
        let mut width = 0i32;
        for (li, group) in groups.iter().enumerate() {
            let mut cursor = 0i32;
            for &id in group {
                let w = dag.node(id).map(|n| n.width()).unwrap_or(0);
                let mut x = cursor;
                if li > 0 {
                    // Nudge right toward the mean parent center; never left,
                    // which would collide with the previous box.
                    let parent_centers: Vec<i32> = parents
                        .get(id)
                        .into_iter()
                        .flatten()
                        .filter_map(|p| centers.get(p).copied())
                        .collect();
                    if !parent_centers.is_empty() {
                        let mean =
                            parent_centers.iter().sum::<i32>() / parent_centers.len() as i32;
                        x = x.max(mean - w / 2);
                    }
                }
                centers.insert(id, x + w / 2);
                positions.push((id.to_string(), x, layer_y[li]));
                width = width.max(x + w);
                cursor = x + w + self.horizontal_spacing;
            }
        }

        ComponentFrame { positions, width }
    }
}

/// Weakly connected components, each listing its nodes in the graph's
/// insertion order. Edge-free nodes form singleton components.
fn weak_components<'a>(dag: &'a Dag) -> Vec<Vec<&'a str>> {
    let mut adjacency: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for edge in &dag.edges {
        let (s, t) = (edge.source.as_str(), edge.target.as_str());
        if dag.nodes.contains_key(s) && dag.nodes.contains_key(t) {
            adjacency.entry(s).or_default().push(t);
            adjacency.entry(t).or_default().push(s);
        }
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut components = Vec::new();
    for id in dag.nodes.keys() {
        let id = id.as_str();
        if seen.contains(id) {
            continue;
        }
        let mut membership: FxHashSet<&str> = FxHashSet::default();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            membership.insert(current);
            if let Some(neighbors) = adjacency.get(current) {
                for &neighbor in neighbors {
                    if !seen.contains(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }
        let ordered: Vec<&str> = dag
            .nodes
            .keys()
            .map(String::as_str)
            .filter(|n| membership.contains(n))
            .collect();
        components.push(ordered);
    }
    components
}

/// Longest-path layer per node: roots sit at layer 0, every other node one
/// past its deepest parent. Nodes kept unreachable by a cycle fall back
/// to layer 0 rather than looping forever.
fn assign_layers<'a>(
    ids: &[&'a str],
    children: &FxHashMap<&'a str, Vec<&'a str>>,
    parents: &FxHashMap<&'a str, Vec<&'a str>>,
) -> FxHashMap<&'a str, usize> {
    let mut indegree: FxHashMap<&str, usize> = ids
        .iter()
        .map(|&id| (id, parents.get(id).map_or(0, Vec::len)))
        .collect();

    let mut layers: FxHashMap<&'a str, usize> = FxHashMap::default();
    let mut queue: VecDeque<&'a str> = VecDeque::new();
    for &id in ids {
        if indegree[id] == 0 {
            layers.insert(id, 0);
            queue.push_back(id);
        }
    }

    while let Some(id) = queue.pop_front() {
        let layer = layers[id];
        if let Some(kids) = children.get(id) {
            for &kid in kids {
                let entry = layers.entry(kid).or_insert(0);
                *entry = (*entry).max(layer + 1);
                if let Some(deg) = indegree.get_mut(kid) {
                    *deg = deg.saturating_sub(1);
                    if *deg == 0 {
                        queue.push_back(kid);
                    }
                }
            }
        }
    }

    for &id in ids {
        layers.entry(id).or_insert(0);
    }
    layers
}

/// One barycenter round: order each layer by the mean index of its parents
/// in the layer above (forward), then by the mean index of its children in
/// the layer below (backward). Neighborless nodes sort last; the stable
/// sort keeps ties in their current order.
fn order_by_barycenter<'a>(
    groups: &mut [Vec<&'a str>],
    parents: &FxHashMap<&'a str, Vec<&'a str>>,
    children: &FxHashMap<&'a str, Vec<&'a str>>,
) {
    if groups.len() <= 1 {
        return;
    }

    let mut index_of: Vec<FxHashMap<&str, usize>> = groups.iter().map(|g| index_map(g)).collect();

    for li in 1..groups.len() {
        sort_by_neighbor_mean(&mut groups[li], &index_of[li - 1], parents);
        index_of[li] = index_map(&groups[li]);
    }

    for li in (0..groups.len() - 1).rev() {
        sort_by_neighbor_mean(&mut groups[li], &index_of[li + 1], children);
        index_of[li] = index_map(&groups[li]);
    }
}

fn index_map<'a>(group: &[&'a str]) -> FxHashMap<&'a str, usize> {
    group.iter().enumerate().map(|(i, &id)| (id, i)).collect()
}

fn sort_by_neighbor_mean<'a>(
    group: &mut Vec<&'a str>,
    neighbor_index: &FxHashMap<&'a str, usize>,
    neighbors: &FxHashMap<&'a str, Vec<&'a str>>,
) {
    let mut keyed: Vec<(&str, f64)> = group
        .iter()
        .map(|&id| {
            let indexes: Vec<f64> = neighbors
                .get(id)
                .into_iter()
                .flatten()
                .filter_map(|n| neighbor_index.get(n).map(|&i| i as f64))
                .collect();
            let key = if indexes.is_empty() {
                f64::MAX
            } else {
                indexes.iter().sum::<f64>() / indexes.len() as f64
            };
            (id, key)
        })
        .collect();
    keyed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    *group = keyed.into_iter().map(|(id, _)| id).collect();
}
