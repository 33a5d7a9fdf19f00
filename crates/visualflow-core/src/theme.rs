//! Glyph themes for edge rasterization.
//!
//! A theme names every non-content character the pipeline may emit. Any
//! single-column character works; wide glyphs as theme characters are
//! unsupported.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphTheme {
    pub vertical: char,
    pub horizontal: char,
    pub corner_tl: char,
    pub corner_tr: char,
    pub corner_bl: char,
    pub corner_br: char,
    pub tee_down: char,
    pub tee_up: char,
    pub tee_right: char,
    pub tee_left: char,
    pub cross: char,
    pub arrow_down: char,
}

impl Default for GlyphTheme {
    fn default() -> Self {
        Self::ascii()
    }
}

impl GlyphTheme {
    /// ASCII lines with Unicode junctions. The fallback theme.
    pub const fn ascii() -> Self {
        Self {
            vertical: '|',
            horizontal: '-',
            corner_tl: '┌',
            corner_tr: '┐',
            corner_bl: '└',
            corner_br: '┘',
            tee_down: '┬',
            tee_up: '┴',
            tee_right: '├',
            tee_left: '┤',
            cross: '┼',
            arrow_down: 'v',
        }
    }

    pub const fn light() -> Self {
        Self {
            vertical: '│',
            horizontal: '─',
            corner_tl: '┌',
            corner_tr: '┐',
            corner_bl: '└',
            corner_br: '┘',
            tee_down: '┬',
            tee_up: '┴',
            tee_right: '├',
            tee_left: '┤',
            cross: '┼',
            arrow_down: '▼',
        }
    }

    pub const fn rounded() -> Self {
        Self {
            vertical: '│',
            horizontal: '─',
            corner_tl: '╭',
            corner_tr: '╮',
            corner_bl: '╰',
            corner_br: '╯',
            tee_down: '┬',
            tee_up: '┴',
            tee_right: '├',
            tee_left: '┤',
            cross: '┼',
            arrow_down: '▼',
        }
    }

    pub const fn heavy() -> Self {
        Self {
            vertical: '┃',
            horizontal: '━',
            corner_tl: '┏',
            corner_tr: '┓',
            corner_bl: '┗',
            corner_br: '┛',
            tee_down: '┳',
            tee_up: '┻',
            tee_right: '┣',
            tee_left: '┫',
            cross: '╋',
            arrow_down: '▼',
        }
    }

    /// Looks up a preset by name (`default`, `light`, `rounded`, `heavy`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "default" => Some(Self::ascii()),
            "light" => Some(Self::light()),
            "rounded" => Some(Self::rounded()),
            "heavy" => Some(Self::heavy()),
            _ => None,
        }
    }

    pub fn is_line(&self, ch: char) -> bool {
        ch == self.vertical || ch == self.horizontal
    }

    pub fn is_corner(&self, ch: char) -> bool {
        ch == self.corner_tl || ch == self.corner_tr || ch == self.corner_bl || ch == self.corner_br
    }

    pub fn is_tee(&self, ch: char) -> bool {
        ch == self.tee_down || ch == self.tee_up || ch == self.tee_right || ch == self.tee_left
    }

    pub fn is_junction(&self, ch: char) -> bool {
        self.is_corner(ch) || self.is_tee(ch) || ch == self.cross
    }

    /// True when `ch` carries a stroke toward the cell below it. The arrow
    /// counts: it terminates a downward stroke.
    pub fn strokes_down(&self, ch: char) -> bool {
        ch == self.vertical
            || ch == self.corner_tl
            || ch == self.corner_tr
            || ch == self.tee_right
            || ch == self.tee_left
            || ch == self.tee_down
            || ch == self.cross
            || ch == self.arrow_down
    }

    pub fn strokes_up(&self, ch: char) -> bool {
        ch == self.vertical
            || ch == self.corner_bl
            || ch == self.corner_br
            || ch == self.tee_right
            || ch == self.tee_left
            || ch == self.tee_up
            || ch == self.cross
    }

    pub fn strokes_right(&self, ch: char) -> bool {
        ch == self.horizontal
            || ch == self.corner_tl
            || ch == self.corner_bl
            || ch == self.tee_right
            || ch == self.tee_down
            || ch == self.tee_up
            || ch == self.cross
    }

    pub fn strokes_left(&self, ch: char) -> bool {
        ch == self.horizontal
            || ch == self.corner_tr
            || ch == self.corner_br
            || ch == self.tee_left
            || ch == self.tee_down
            || ch == self.tee_up
            || ch == self.cross
    }

    /// The junction glyph implied by stroke connectivity on the four sides.
    /// Returns `None` for straight-through or underconnected cells, which
    /// are not junctions.
    pub fn junction_for(&self, up: bool, down: bool, left: bool, right: bool) -> Option<char> {
        match (up, down, left, right) {
            (true, true, true, true) => Some(self.cross),
            (false, true, true, true) => Some(self.tee_down),
            (true, false, true, true) => Some(self.tee_up),
            (true, true, false, true) => Some(self.tee_right),
            (true, true, true, false) => Some(self.tee_left),
            (true, false, true, false) => Some(self.corner_br),
            (true, false, false, true) => Some(self.corner_bl),
            (false, true, true, false) => Some(self.corner_tr),
            (false, true, false, true) => Some(self.corner_tl),
            _ => None,
        }
    }
}
