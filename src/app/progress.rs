//! Fixed-width progress bar rendering
//!
//! Maps a completion percentage onto a sequence of cells. Each cell covers
//! `100 / width` percentage points. Fully covered cells render as the full
//! glyph, the cell the percentage falls into renders as a partial glyph
//! chosen by how far into the cell it reaches, and the rest are blank.
//!
//! ```
//! use node_status::app::progress::render;
//!
//! assert_eq!(render(13.0, 10, true), "#o        ");
//! assert_eq!(render(100.0, 4, false), "\u{2588}".repeat(4));
//! ```

use tracing::warn;

use crate::constants::progress::{
    ASCII_FULL, ASCII_PARTIAL, DEFAULT_WIDTH, EMPTY, UNICODE_FULL, UNICODE_LEVELS,
    UNICODE_PARTIAL_BASE,
};

/// Glyph family used by [`render`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSet {
    /// `#` for full cells, `.oO%` for quarter steps
    Ascii,
    /// Block elements in eighth steps ending with the full block
    Unicode,
}

impl GlyphSet {
    /// Select the glyph set from an `ascii` flag
    pub fn from_ascii(ascii: bool) -> Self {
        if ascii {
            GlyphSet::Ascii
        } else {
            GlyphSet::Unicode
        }
    }

    fn full(self) -> char {
        match self {
            GlyphSet::Ascii => ASCII_FULL,
            GlyphSet::Unicode => UNICODE_FULL,
        }
    }

    fn levels(self) -> usize {
        match self {
            GlyphSet::Ascii => ASCII_PARTIAL.len(),
            GlyphSet::Unicode => UNICODE_LEVELS,
        }
    }

    /// Partial glyph for the given fraction of a cell in `[0, 1)`
    fn partial(self, fraction: f64) -> char {
        let level = ((fraction * self.levels() as f64) as usize).min(self.levels() - 1);
        match self {
            GlyphSet::Ascii => ASCII_PARTIAL[level],
            GlyphSet::Unicode => {
                char::from_u32(UNICODE_PARTIAL_BASE - level as u32).unwrap_or(UNICODE_FULL)
            }
        }
    }
}

/// Render a bar of exactly `width` characters for `percent` in `[0, 100]`
///
/// Out-of-range and NaN inputs are clamped (with a warning) rather than
/// rejected. A zero width yields an empty string.
pub fn render(percent: f64, width: usize, ascii: bool) -> String {
    render_with(percent, width, GlyphSet::from_ascii(ascii))
}

/// Render with the default width
pub fn render_default(percent: f64, ascii: bool) -> String {
    render(percent, DEFAULT_WIDTH, ascii)
}

/// Render a bar using an explicit glyph set
pub fn render_with(percent: f64, width: usize, glyphs: GlyphSet) -> String {
    let percent = clamp_percent(percent);
    let mut bar = String::with_capacity(width.saturating_mul(3));

    if width == 0 {
        return bar;
    }
    if percent >= 100.0 {
        bar.extend(std::iter::repeat(glyphs.full()).take(width));
        return bar;
    }
    if percent <= 0.0 {
        bar.extend(std::iter::repeat(EMPTY).take(width));
        return bar;
    }

    let filled = percent * width as f64 / 100.0;
    let full = (filled.floor() as usize).min(width - 1);
    let fraction = (filled - full as f64).clamp(0.0, 1.0);

    bar.extend(std::iter::repeat(glyphs.full()).take(full));
    bar.push(glyphs.partial(fraction));
    bar.extend(std::iter::repeat(EMPTY).take(width - full - 1));
    bar
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        warn!("Progress percentage is NaN, rendering as 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&percent) {
        warn!("Progress percentage {} outside [0, 100], clamping", percent);
        return percent.clamp(0.0, 100.0);
    }
    percent
}
