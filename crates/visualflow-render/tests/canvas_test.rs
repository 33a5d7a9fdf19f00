use visualflow_core::{EdgePath, GlyphTheme, Segment};
use visualflow_render::{Canvas, Error};

fn canvas(width: i32, height: i32) -> Canvas {
    Canvas::new(width, height, GlyphTheme::light())
}

fn path(segments: &[(i32, i32, i32, i32)]) -> EdgePath {
    EdgePath::new(
        "s",
        "t",
        segments
            .iter()
            .map(|&(x1, y1, x2, y2)| Segment::new(x1, y1, x2, y2))
            .collect(),
    )
}

#[test]
fn a_box_renders_exactly_where_it_was_placed() {
    let mut canvas = canvas(12, 6);
    canvas.place_box("+---+\n| A |\n+---+", 2, 1);
    let rows: Vec<&str> = ["", "  +---+", "  | A |", "  +---+"].to_vec();
    assert_eq!(canvas.render(), rows.join("\n"));
}

#[test]
fn boxes_clip_silently_at_the_grid_edge() {
    let mut canvas = canvas(4, 2);
    canvas.place_box("+---+\n| A |\n+---+", 2, 0);
    assert_eq!(canvas.render(), "  +-\n  |");
}

#[test]
fn wide_glyphs_occupy_two_columns_and_stay_aligned() {
    let mut canvas = canvas(10, 1);
    canvas.place_box("│ 中 │", 0, 0);
    assert_eq!(canvas.glyph_at(0, 0), Some('│'));
    assert_eq!(canvas.glyph_at(2, 0), Some('中'));
    // The cell right of a wide glyph holds no glyph of its own.
    assert_eq!(canvas.glyph_at(3, 0), None);
    assert_eq!(canvas.glyph_at(5, 0), Some('│'));
    assert_eq!(canvas.render(), "│ 中 │");
}

#[test]
fn a_wide_glyph_clipped_at_the_edge_still_advances_the_cursor() {
    let mut canvas = canvas(3, 1);
    canvas.place_box("中中", 1, 0);
    assert_eq!(canvas.glyph_at(1, 0), Some('中'));
    // The second glyph starts out of bounds and is dropped.
    assert_eq!(canvas.render(), " 中");
}

#[test]
fn vertical_paths_end_in_an_arrow() {
    let mut canvas = canvas(6, 6);
    canvas.draw_path(&path(&[(2, 1, 2, 4)])).unwrap();
    assert_eq!(canvas.glyph_at(2, 1), Some('│'));
    assert_eq!(canvas.glyph_at(2, 3), Some('│'));
    assert_eq!(canvas.glyph_at(2, 4), Some('▼'));
}

#[test]
fn a_zero_length_final_segment_is_a_single_arrow() {
    let mut canvas = canvas(6, 6);
    canvas.draw_path(&path(&[(3, 2, 3, 2)])).unwrap();
    assert_eq!(canvas.glyph_at(3, 2), Some('▼'));
}

#[test]
fn z_paths_get_their_corners() {
    let mut canvas = canvas(10, 8);
    canvas
        .draw_path(&path(&[(2, 1, 2, 3), (2, 3, 6, 3), (6, 3, 6, 5)]))
        .unwrap();
    assert_eq!(canvas.glyph_at(2, 3), Some('└'));
    assert_eq!(canvas.glyph_at(6, 3), Some('┐'));
    assert_eq!(canvas.glyph_at(4, 3), Some('─'));
    assert_eq!(canvas.glyph_at(6, 5), Some('▼'));
}

#[test]
fn leftward_turns_mirror_the_corner_choice() {
    let mut canvas = canvas(10, 8);
    canvas
        .draw_path(&path(&[(6, 1, 6, 3), (6, 3, 2, 3), (2, 3, 2, 5)]))
        .unwrap();
    assert_eq!(canvas.glyph_at(6, 3), Some('┘'));
    assert_eq!(canvas.glyph_at(2, 3), Some('┌'));
}

#[test]
fn edges_never_write_into_box_content() {
    let mut canvas = canvas(10, 6);
    canvas.place_box("+---+\n| A |\n+---+", 0, 0);
    // A stroke across the interior row must leave the box untouched.
    canvas.draw_path(&path(&[(0, 1, 6, 1)])).unwrap();
    assert_eq!(canvas.glyph_at(1, 1), Some(' '));
    assert_eq!(canvas.glyph_at(2, 1), Some('A'));
    assert_eq!(canvas.glyph_at(0, 1), Some('|'));
    // Outside the box the stroke lands normally.
    assert_eq!(canvas.glyph_at(5, 1), Some('─'));
}

#[test]
fn independent_crossings_keep_the_later_stroke() {
    let mut canvas = canvas(10, 10);
    canvas.draw_path(&path(&[(4, 0, 4, 8)])).unwrap();
    canvas.draw_path(&path(&[(0, 4, 8, 4)])).unwrap();
    canvas.repair_junctions();
    // Line glyphs may replace other line glyphs, so the later stroke owns
    // the cell; repair leaves non-junction cells alone.
    assert_eq!(canvas.glyph_at(4, 4), Some('─'));
}

#[test]
fn junction_glyphs_never_overwrite_plus_or_v_in_content() {
    // '+' and 'v' are ordinary content here, not theme glyphs.
    let mut canvas = canvas(12, 8);
    canvas.place_box("| C++ v |", 2, 3);
    // A corner joint lands on the first '+'.
    canvas
        .draw_path(&path(&[(5, 0, 5, 3), (5, 3, 0, 3)]))
        .unwrap();
    // An arrow endpoint lands on the 'v'.
    canvas.draw_path(&path(&[(8, 0, 8, 3)])).unwrap();
    assert_eq!(canvas.glyph_at(5, 3), Some('+'));
    assert_eq!(canvas.glyph_at(8, 3), Some('v'));
    assert_eq!(canvas.glyph_at(4, 3), Some('C'));
    // The strokes above the box are unaffected.
    assert_eq!(canvas.glyph_at(5, 2), Some('│'));
    assert_eq!(canvas.glyph_at(8, 2), Some('│'));
}

#[test]
fn colliding_corners_fuse_into_a_tee() {
    let mut canvas = canvas(12, 8);
    // Two paths drop from the same cell and turn opposite ways.
    canvas
        .draw_path(&path(&[(5, 0, 5, 3), (5, 3, 1, 3), (1, 3, 1, 6)]))
        .unwrap();
    canvas
        .draw_path(&path(&[(5, 0, 5, 3), (5, 3, 9, 3), (9, 3, 9, 6)]))
        .unwrap();
    canvas.repair_junctions();
    assert_eq!(canvas.glyph_at(5, 3), Some('┴'));
}

#[test]
fn junction_repair_is_idempotent() {
    let mut canvas = canvas(14, 10);
    canvas
        .draw_path(&path(&[(6, 0, 6, 4), (6, 4, 2, 4), (2, 4, 2, 8)]))
        .unwrap();
    canvas
        .draw_path(&path(&[(6, 0, 6, 4), (6, 4, 10, 4), (10, 4, 10, 8)]))
        .unwrap();
    canvas
        .draw_path(&path(&[(6, 0, 6, 4), (6, 4, 6, 8)]))
        .unwrap();
    canvas.repair_junctions();
    let once = canvas.render();
    canvas.repair_junctions();
    assert_eq!(canvas.render(), once);
}

#[test]
fn connector_stamping_upgrades_border_glyphs() {
    let theme = GlyphTheme::light();
    let mut canvas = Canvas::new(8, 4, theme);
    canvas.place_box("+---+\n| A |\n+-─-+", 0, 0);
    canvas.stamp_connector(1, 2);
    canvas.stamp_connector(2, 2);
    assert_eq!(canvas.glyph_at(1, 2), Some('┬'));
    assert_eq!(canvas.glyph_at(2, 2), Some('┬'));
    // Stamping the same exit twice is a no-op.
    canvas.stamp_connector(1, 2);
    assert_eq!(canvas.glyph_at(1, 2), Some('┬'));
    // Interior content is never stamped.
    canvas.stamp_connector(2, 1);
    assert_eq!(canvas.glyph_at(2, 1), Some('A'));
}

#[test]
fn connector_over_an_upward_tee_becomes_a_cross() {
    let theme = GlyphTheme::light();
    let mut canvas = Canvas::new(6, 3, theme);
    canvas.place_box("─┴─", 0, 0);
    canvas.stamp_connector(1, 0);
    assert_eq!(canvas.glyph_at(1, 0), Some('┼'));
}

#[test]
fn non_orthogonal_segments_are_rejected() {
    let mut canvas = canvas(8, 8);
    let err = canvas.draw_path(&path(&[(0, 0, 3, 3)])).unwrap_err();
    assert!(matches!(err, Error::NonOrthogonalSegment { .. }));
}

#[test]
fn drawing_clips_outside_the_grid() {
    let mut canvas = canvas(4, 4);
    canvas.draw_path(&path(&[(2, -5, 2, 10)])).unwrap();
    assert_eq!(canvas.glyph_at(2, 0), Some('│'));
    assert_eq!(canvas.glyph_at(2, 3), Some('│'));
}

#[test]
fn render_strips_trailing_space_and_blank_rows() {
    let mut canvas = canvas(10, 6);
    canvas.place_box("ab", 0, 0);
    let out = canvas.render();
    assert_eq!(out, "ab");
}

#[test]
fn an_empty_canvas_renders_to_nothing() {
    assert_eq!(canvas(0, 0).render(), "");
    assert_eq!(canvas(5, 3).render(), "");
}
