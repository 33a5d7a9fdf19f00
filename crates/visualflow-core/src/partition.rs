//! Splitting a graph into connected subgraphs and standalone nodes.

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::Dag;

/// Partitions `dag` into connected subgraphs plus one group of standalone
/// nodes (nodes with no edges at all).
///
/// Connectivity ignores edge direction. Components are returned largest
/// first; equal-sized components keep discovery order, which follows node
/// insertion order. Each subgraph carries copies of its nodes and of every
/// edge whose both endpoints it contains; the standalone group never has
/// edges. An edge-free graph yields no components and all nodes standalone.
pub fn partition(dag: &Dag) -> (Vec<Dag>, Dag) {
    if dag.nodes.is_empty() {
        return (Vec::new(), Dag::new());
    }

    let mut linked: FxHashSet<&str> = FxHashSet::default();
    let mut adjacency: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for edge in &dag.edges {
        linked.insert(edge.source.as_str());
        linked.insert(edge.target.as_str());
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        adjacency
            .entry(edge.target.as_str())
            .or_default()
            .push(edge.source.as_str());
    }

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut memberships: Vec<FxHashSet<&str>> = Vec::new();
    for id in dag.nodes.keys() {
        let id = id.as_str();
        if !linked.contains(id) || visited.contains(id) {
            continue;
        }
        let mut component: FxHashSet<&str> = FxHashSet::default();
        let mut queue: VecDeque<&str> = VecDeque::from([id]);
        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            component.insert(current);
            if let Some(neighbors) = adjacency.get(current) {
                for &neighbor in neighbors {
                    if !visited.contains(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }
        memberships.push(component);
    }

    // Stable sort keeps discovery order among equal-sized components.
    memberships.sort_by_key(|c| std::cmp::Reverse(c.len()));

    let mut components: Vec<Dag> = Vec::with_capacity(memberships.len());
    for membership in &memberships {
        let mut subgraph = Dag::new();
        for (id, node) in &dag.nodes {
            if membership.contains(id.as_str()) {
                subgraph.nodes.insert(id.clone(), node.clone());
            }
        }
        for edge in &dag.edges {
            if membership.contains(edge.source.as_str()) && membership.contains(edge.target.as_str())
            {
                subgraph.edges.push(edge.clone());
            }
        }
        components.push(subgraph);
    }

    let mut standalones = Dag::new();
    for (id, node) in &dag.nodes {
        if !linked.contains(id.as_str()) {
            standalones.nodes.insert(id.clone(), node.clone());
        }
    }

    (components, standalones)
}
