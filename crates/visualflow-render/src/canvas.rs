//! The character grid.
//!
//! Boxes are blitted verbatim, edge polylines are stamped with theme
//! glyphs under a strict precedence (edges never write into box content),
//! and a final repair pass recomputes every junction from its actual
//! neighbors. All writes clip silently at the grid edge.

use unicode_width::UnicodeWidthChar;
use visualflow_core::{EdgePath, GlyphTheme, Segment};

use crate::{Error, Result};

/// One display cell. A double-width glyph owns two cells: the primary and
/// a continuation that renders as nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Glyph(char),
    Wide(char),
    Continuation,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    theme: GlyphTheme,
    grid: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: i32, height: i32, theme: GlyphTheme) -> Self {
        let width = width.max(0) as usize;
        let height = height.max(0) as usize;
        Self {
            width,
            height,
            theme,
            grid: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// The glyph at `(x, y)`, if the cell holds one. Continuation cells and
    /// anything off-grid read as `None`.
    pub fn glyph_at(&self, x: i32, y: i32) -> Option<char> {
        match self.index(x, y).map(|i| self.grid[i])? {
            Cell::Glyph(ch) | Cell::Wide(ch) => Some(ch),
            Cell::Empty | Cell::Continuation => None,
        }
    }

    /// Blits a pre-drawn box with its top-left corner at `(x, y)`.
    ///
    /// The column cursor advances by display width, so glyphs after a
    /// double-width one stay aligned with the box borders, and clipped
    /// glyphs still advance it.
    pub fn place_box(&mut self, content: &str, x: i32, y: i32) {
        for (row, line) in content.split('\n').enumerate() {
            let cy = y + row as i32;
            let mut col = 0i32;
            for ch in line.chars() {
                let glyph_width = ch.width().unwrap_or(1).max(1) as i32;
                let cx = x + col;
                if let Some(i) = self.index(cx, cy) {
                    if glyph_width == 2 {
                        self.grid[i] = Cell::Wide(ch);
                        if let Some(next) = self.index(cx + 1, cy) {
                            self.grid[next] = Cell::Continuation;
                        }
                    } else {
                        self.grid[i] = Cell::Glyph(ch);
                    }
                }
                col += glyph_width;
            }
        }
    }

    /// Marks an edge exit on a box bottom border: border strokes become a
    /// downward tee, an upward tee (something already attaches from below)
    /// becomes a cross. Anything else, including an existing downward tee,
    /// is left alone.
    pub fn stamp_connector(&mut self, x: i32, y: i32) {
        let Some(i) = self.index(x, y) else { return };
        let Cell::Glyph(existing) = self.grid[i] else {
            return;
        };
        let t = self.theme;
        if existing == '-' || existing == '+' || existing == '─' || existing == t.vertical {
            self.grid[i] = Cell::Glyph(t.tee_down);
        } else if existing == t.tee_up {
            self.grid[i] = Cell::Glyph(t.cross);
        }
    }

    /// Rasterizes one polyline: line glyphs along each segment, an arrow at
    /// the end of a final vertical segment, and a corner at every joint of
    /// two connected segments.
    pub fn draw_path(&mut self, path: &EdgePath) -> Result<()> {
        for segment in &path.segments {
            if !segment.is_axis_aligned() {
                return Err(Error::NonOrthogonalSegment {
                    source: path.source_id.clone(),
                    target: path.target_id.clone(),
                    x1: segment.x1,
                    y1: segment.y1,
                    x2: segment.x2,
                    y2: segment.y2,
                });
            }
        }

        let t = self.theme;
        let count = path.segments.len();
        for (i, segment) in path.segments.iter().enumerate() {
            let is_last = i + 1 == count;
            if segment.is_vertical() {
                let (lo, hi) = (segment.y1.min(segment.y2), segment.y1.max(segment.y2));
                for y in lo..=hi {
                    if is_last && y == hi {
                        self.put_edge_glyph(t.arrow_down, segment.x1, y);
                    } else {
                        self.put_edge_glyph(t.vertical, segment.x1, y);
                    }
                }
            } else {
                let (lo, hi) = (segment.x1.min(segment.x2), segment.x1.max(segment.x2));
                for x in lo..=hi {
                    self.put_edge_glyph(t.horizontal, x, segment.y1);
                }
            }
        }

        for pair in path.segments.windows(2) {
            let (incoming, outgoing) = (&pair[0], &pair[1]);
            if incoming.end() == outgoing.start() {
                if let Some(corner) = corner_for(&t, incoming, outgoing) {
                    self.put_edge_glyph(corner, incoming.x2, incoming.y2);
                }
            }
        }
        Ok(())
    }

    /// Writes one edge glyph under the precedence rules:
    ///
    /// - nothing ever lands on box content (`Wide`, `Continuation`, or any
    ///   glyph a box placed, interior spaces included; only untouched
    ///   cells and edge glyphs are writable);
    /// - colliding corners fuse into the tee/cross their union implies;
    /// - a line glyph upgrades an existing corner to the matching tee;
    /// - line glyphs otherwise only land on empty cells or other lines;
    /// - junction glyphs and arrows may replace lines and junctions.
    fn put_edge_glyph(&mut self, ch: char, x: i32, y: i32) {
        let Some(i) = self.index(x, y) else { return };
        let t = self.theme;
        let existing = match self.grid[i] {
            Cell::Empty => {
                self.grid[i] = Cell::Glyph(ch);
                return;
            }
            Cell::Glyph(existing) => existing,
            Cell::Wide(_) | Cell::Continuation => return,
        };
        if existing == ch {
            return;
        }

        if t.is_corner(existing) && t.is_corner(ch) {
            self.grid[i] = Cell::Glyph(merge_corners(&t, existing, ch));
            return;
        }

        if ch == t.vertical && t.is_corner(existing) {
            self.grid[i] = Cell::Glyph(if existing == t.corner_tl || existing == t.corner_bl {
                t.tee_right
            } else {
                t.tee_left
            });
            return;
        }
        if ch == t.horizontal && t.is_corner(existing) {
            self.grid[i] = Cell::Glyph(if existing == t.corner_tl || existing == t.corner_tr {
                t.tee_down
            } else {
                t.tee_up
            });
            return;
        }

        if t.is_line(ch) {
            if t.is_line(existing) {
                self.grid[i] = Cell::Glyph(ch);
            }
            return;
        }

        if t.is_line(existing) || t.is_junction(existing) || existing == t.arrow_down {
            self.grid[i] = Cell::Glyph(ch);
        }
    }

    /// Recomputes every junction glyph from the strokes its four neighbors
    /// actually present. Incremental writes cannot always pick the right
    /// glyph when several paths overlap; this pass can, and running it a
    /// second time changes nothing.
    pub fn repair_junctions(&mut self) {
        let t = self.theme;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let Some(current) = self.glyph_at(x, y) else {
                    continue;
                };
                if !t.is_junction(current) {
                    continue;
                }
                let up = self.glyph_at(x, y - 1).is_some_and(|c| t.strokes_down(c));
                let down = self.glyph_at(x, y + 1).is_some_and(|c| t.strokes_up(c));
                let left = self.glyph_at(x - 1, y).is_some_and(|c| t.strokes_right(c));
                let right = self.glyph_at(x + 1, y).is_some_and(|c| t.strokes_left(c));
                if let Some(correct) = t.junction_for(up, down, left, right) {
                    if correct != current {
                        if let Some(i) = self.index(x, y) {
                            self.grid[i] = Cell::Glyph(correct);
                        }
                    }
                }
            }
        }
    }

    /// Assembles the final string: continuation cells vanish, rows lose
    /// trailing whitespace, trailing blank rows are dropped.
    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.height);
        for y in 0..self.height {
            let mut line = String::with_capacity(self.width);
            for x in 0..self.width {
                match self.grid[y * self.width + x] {
                    Cell::Empty => line.push(' '),
                    Cell::Glyph(ch) | Cell::Wide(ch) => line.push(ch),
                    Cell::Continuation => {}
                }
            }
            line.truncate(line.trim_end().len());
            lines.push(line);
        }
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        lines.join("\n")
    }
}

/// Corner for a joint, picked from the travel directions of the segments
/// meeting there. Collinear joints have no corner.
fn corner_for(theme: &GlyphTheme, incoming: &Segment, outgoing: &Segment) -> Option<char> {
    if incoming.is_vertical() {
        if outgoing.is_vertical() {
            return None;
        }
        let downward = incoming.y2 > incoming.y1;
        let rightward = outgoing.x2 > outgoing.x1;
        Some(match (downward, rightward) {
            (true, true) => theme.corner_bl,
            (true, false) => theme.corner_br,
            (false, true) => theme.corner_tl,
            (false, false) => theme.corner_tr,
        })
    } else {
        if outgoing.is_horizontal() {
            return None;
        }
        let rightward = incoming.x2 > incoming.x1;
        let downward = outgoing.y2 > outgoing.y1;
        Some(match (rightward, downward) {
            (true, true) => theme.corner_tr,
            (true, false) => theme.corner_br,
            (false, true) => theme.corner_tl,
            (false, false) => theme.corner_bl,
        })
    }
}

/// Two corners in one cell imply a tee (or a cross for opposite pairs).
fn merge_corners(theme: &GlyphTheme, a: char, b: char) -> char {
    let pair = |x: char, y: char| (a == x && b == y) || (a == y && b == x);
    if pair(theme.corner_bl, theme.corner_br) {
        theme.tee_up
    } else if pair(theme.corner_tl, theme.corner_tr) {
        theme.tee_down
    } else if pair(theme.corner_bl, theme.corner_tl) {
        theme.tee_right
    } else if pair(theme.corner_br, theme.corner_tr) {
        theme.tee_left
    } else {
        theme.cross
    }
}
