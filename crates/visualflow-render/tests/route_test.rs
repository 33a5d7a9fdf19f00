use visualflow_core::{Edge, EdgePath, Node, NodePosition, PositionMap, Segment};
use visualflow_render::route::exit_columns;
use visualflow_render::{OrthogonalRouter, Router};

fn box5() -> String {
    "+---+\n| X |\n+---+".to_string()
}

fn box7() -> String {
    "+-----+\n|  X  |\n+-----+".to_string()
}

fn positions(entries: &[(&str, &str, i32, i32)]) -> PositionMap {
    let mut map = PositionMap::new();
    for (id, content, x, y) in entries {
        map.insert(
            (*id).to_string(),
            NodePosition::new(Node::new(*id, *content), *x, *y),
        );
    }
    map
}

fn edges(pairs: &[(&str, &str)]) -> Vec<Edge> {
    pairs
        .iter()
        .map(|(s, t)| Edge::new(*s, *t))
        .collect()
}

fn route(positions: &PositionMap, edge_list: &[Edge]) -> Vec<EdgePath> {
    OrthogonalRouter::default().route(positions, edge_list)
}

fn segments(path: &EdgePath) -> Vec<(i32, i32, i32, i32)> {
    path.segments
        .iter()
        .map(|s| (s.x1, s.y1, s.x2, s.y2))
        .collect()
}

#[test]
fn aligned_boxes_get_one_vertical_segment() {
    let b5 = box5();
    let pos = positions(&[("a", &b5, 4, 6), ("b", &b5, 4, 15)]);
    let paths = route(&pos, &edges(&[("a", "b")]));
    assert_eq!(paths.len(), 1);
    assert_eq!(segments(&paths[0]), vec![(6, 9, 6, 14)]);
}

#[test]
fn offset_boxes_get_a_z_shape() {
    let b5 = box5();
    let pos = positions(&[("a", &b5, 0, 0), ("b", &b5, 10, 10)]);
    let paths = route(&pos, &edges(&[("a", "b")]));
    assert_eq!(
        segments(&paths[0]),
        vec![(2, 3, 2, 6), (2, 6, 12, 6), (12, 6, 12, 9)]
    );
}

#[test]
fn nearly_stacked_boxes_fall_back_to_an_l_shape() {
    let b5 = box5();
    let pos = positions(&[("a", &b5, 0, 0), ("b", &b5, 10, 5)]);
    let paths = route(&pos, &edges(&[("a", "b")]));
    assert_eq!(segments(&paths[0]), vec![(2, 3, 12, 3), (12, 3, 12, 4)]);
}

#[test]
fn a_target_beside_the_source_gets_a_bare_horizontal_stroke() {
    let b5 = box5();
    let pos = positions(&[("a", &b5, 0, 10), ("b", &b5, 10, 12)]);
    let paths = route(&pos, &edges(&[("a", "b")]));
    assert_eq!(segments(&paths[0]), vec![(2, 13, 12, 13)]);
}

#[test]
fn same_rank_fan_out_shares_a_trunk_and_sweep() {
    let b5 = box5();
    let pos = positions(&[
        ("s", &b5, 10, 0),
        ("a", &b5, 0, 10),
        ("b", &b5, 10, 10),
        ("c", &b5, 20, 10),
    ]);
    let paths = route(&pos, &edges(&[("s", "a"), ("s", "b"), ("s", "c")]));
    assert_eq!(paths.len(), 3);
    // Paths come out in target-x order and all leave through the center.
    assert_eq!(
        paths.iter().map(|p| p.target_id.as_str()).collect::<Vec<_>>(),
        ["a", "b", "c"]
    );
    assert_eq!(
        segments(&paths[0]),
        vec![(12, 3, 12, 6), (12, 6, 2, 6), (2, 6, 2, 9)]
    );
    assert_eq!(segments(&paths[1]), vec![(12, 3, 12, 6), (12, 6, 12, 9)]);
    assert_eq!(
        segments(&paths[2]),
        vec![(12, 3, 12, 6), (12, 6, 22, 6), (22, 6, 22, 9)]
    );
}

#[test]
fn fan_out_across_ranks_uses_separate_exits() {
    let b5 = box5();
    let b7 = box7();
    let pos = positions(&[
        ("s", &b7, 0, 0),
        ("near", &b5, 0, 10),
        ("far", &b5, 10, 30),
    ]);
    let paths = route(&pos, &edges(&[("s", "far"), ("s", "near")]));
    assert_eq!(paths.len(), 2);
    // Exit columns at the thirds of the usable span, in target-x order.
    assert_eq!(paths[0].target_id, "near");
    assert_eq!(paths[0].segments[0].x1, 2);
    assert_eq!(paths[1].target_id, "far");
    assert_eq!(paths[1].segments[0].x1, 4);
}

#[test]
fn merge_edges_share_the_merge_row_and_final_drop() {
    let b5 = box5();
    let pos = positions(&[
        ("s1", &b5, 0, 0),
        ("s2", &b5, 12, 0),
        ("m", &b5, 6, 12),
    ]);
    let paths = route(&pos, &edges(&[("s1", "m"), ("s2", "m")]));
    assert_eq!(paths.len(), 2);
    assert_eq!(
        segments(&paths[0]),
        vec![(2, 3, 2, 5), (2, 5, 8, 5), (8, 5, 8, 11)]
    );
    assert_eq!(
        segments(&paths[1]),
        vec![(14, 3, 14, 5), (14, 5, 8, 5), (8, 5, 8, 11)]
    );
}

#[test]
fn mixed_independent_and_merge_edges_split_the_exits() {
    let b5 = box5();
    let b7 = box7();
    let pos = positions(&[
        ("u", &b7, 0, 0),
        ("w", &b5, 20, 0),
        ("x", &b5, 0, 10),
        ("y", &b5, 14, 10),
    ]);
    let paths = route(&pos, &edges(&[("u", "x"), ("u", "y"), ("w", "y")]));
    assert_eq!(paths.len(), 3);

    // The independent edge leaves left of the merge edge.
    let to_x = paths.iter().find(|p| p.target_id == "x").unwrap();
    let to_y_from_u = paths
        .iter()
        .find(|p| p.source_id == "u" && p.target_id == "y")
        .unwrap();
    assert_eq!(to_x.segments[0].x1, 2);
    assert_eq!(to_y_from_u.segments[0].x1, 4);

    // The independent path never joins the merge row.
    assert_eq!(segments(to_x), vec![(2, 3, 2, 9)]);

    // Both merge paths end with the same drop into y.
    let to_y_from_w = paths
        .iter()
        .find(|p| p.source_id == "w" && p.target_id == "y")
        .unwrap();
    assert_eq!(to_y_from_u.segments.last(), to_y_from_w.segments.last());
    assert_eq!(*to_y_from_u.segments.last().unwrap(), Segment::new(16, 4, 16, 9));
}

#[test]
fn duplicate_edges_route_identically() {
    let b5 = box5();
    let pos = positions(&[("a", &b5, 0, 0), ("b", &b5, 0, 10)]);
    let paths = route(&pos, &edges(&[("a", "b"), ("a", "b")]));
    assert_eq!(paths.len(), 2);
    assert_eq!(paths[0].segments, paths[1].segments);
}

#[test]
fn edges_with_missing_endpoints_are_skipped() {
    let b5 = box5();
    let pos = positions(&[("a", &b5, 0, 0)]);
    let paths = route(&pos, &edges(&[("a", "ghost"), ("ghost", "a")]));
    assert!(paths.is_empty());
}

#[test]
fn routing_is_deterministic() {
    let b5 = box5();
    let pos = positions(&[
        ("a", &b5, 0, 0),
        ("b", &b5, 10, 0),
        ("c", &b5, 0, 12),
        ("d", &b5, 10, 12),
    ]);
    let edge_list = edges(&[("a", "c"), ("a", "d"), ("b", "d")]);
    assert_eq!(route(&pos, &edge_list), route(&pos, &edge_list));
}

#[test]
fn one_exit_sits_at_the_center() {
    let source = NodePosition::new(Node::new("s", box7()), 0, 0);
    assert_eq!(exit_columns(&source, 1), vec![3]);
}

#[test]
fn two_exits_sit_at_the_thirds() {
    let source = NodePosition::new(Node::new("s", box7()), 0, 0);
    assert_eq!(exit_columns(&source, 2), vec![2, 4]);
}

#[test]
fn many_exits_spread_evenly() {
    let source = NodePosition::new(
        Node::new("s", "+-------+\n|   X   |\n+-------+"),
        0,
        0,
    );
    assert_eq!(exit_columns(&source, 3), vec![1, 4, 7]);
}

#[test]
fn a_narrow_box_collapses_exits_onto_the_center() {
    let source = NodePosition::new(Node::new("s", box5()), 0, 0);
    assert_eq!(exit_columns(&source, 3), vec![2, 2, 2]);
}
