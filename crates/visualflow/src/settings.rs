//! Process-wide defaults.

use std::sync::OnceLock;

use visualflow_core::GlyphTheme;

/// Environment variable naming the default theme preset.
pub const THEME_ENV_VAR: &str = "VISUALFLOW_THEME";

/// The process-default glyph theme.
///
/// Resolved once, on first use: a `.env` file in the working directory or
/// any parent is loaded best-effort (a missing file is fine), then
/// `VISUALFLOW_THEME` selects one of `default`, `light`, `rounded` or
/// `heavy`. Unknown or empty values mean the default theme. The result
/// never changes afterwards; pass a theme to
/// [`render_with`](crate::render_with) to override per call.
pub fn default_theme() -> GlyphTheme {
    static THEME: OnceLock<GlyphTheme> = OnceLock::new();
    *THEME.get_or_init(|| {
        let _ = dotenvy::dotenv();
        theme_from_env(std::env::var(THEME_ENV_VAR).ok().as_deref())
    })
}

/// The resolution rule behind [`default_theme`], kept separate from the
/// cached process state.
pub fn theme_from_env(value: Option<&str>) -> GlyphTheme {
    value.and_then(GlyphTheme::from_name).unwrap_or_default()
}
