//! Text rendering with an embedded TrueType font
//!
//! Glyphs are rasterized with `fontdue` the first time a character is drawn
//! at a given pixel size. Coverage is rounded to a few alpha levels and each
//! bitmap row is merged into runs of equal coverage, so a glyph becomes a
//! handful of solid quads on the same vertex path as every other shape.

use std::cell::RefCell;
use std::collections::HashMap;

use fontdue::{Font, FontSettings};
use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors::with_alpha};
use crate::ui::Rect;

/// Font compiled into the binary
const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf");

/// Coverage levels a pixel is rounded to; level 0 is not drawn
const ALPHA_LEVELS: u16 = 4;

/// Errors that can occur while loading a font
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to load font: {0}")]
    Load(&'static str),
}

/// Pixels of one bitmap row sharing a coverage level
#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
    alpha: f32,
}

#[derive(Debug, Clone)]
struct GlyphRuns {
    /// Left edge relative to the pen
    xmin: i32,
    /// Top edge above the baseline
    top: i32,
    advance: f32,
    runs: Vec<Run>,
}

/// Loaded font plus the glyphs rasterized so far, keyed by character and
/// pixel size
pub struct FontAtlas {
    font: Font,
    glyph_cache: RefCell<HashMap<(char, u32), GlyphRuns>>,
}

impl FontAtlas {
    /// Load a TrueType/OpenType font from raw bytes
    pub fn new(font_data: &[u8]) -> Result<Self, FontError> {
        let font = Font::from_bytes(font_data, FontSettings::default()).map_err(FontError::Load)?;
        log::info!("Loaded font with {} glyphs", font.glyph_count());
        Ok(Self {
            font,
            glyph_cache: RefCell::new(HashMap::new()),
        })
    }

    /// The font shipped with the game
    pub fn embedded() -> Result<Self, FontError> {
        Self::new(EMBEDDED_FONT)
    }

    /// Height of a capital letter. Text is placed by the top of its capitals.
    pub fn cap_height(&self, size: f32) -> f32 {
        self.font.metrics('H', pixel_size(size)).height as f32
    }

    pub fn text_width(&self, s: &str, size: f32) -> f32 {
        let px = pixel_size(size);
        s.chars().map(|c| self.font.metrics(c, px).advance_width).sum()
    }

    /// Draw `s` with the top of its capitals at `pos.y`, starting at `pos.x`
    pub fn text(&self, out: &mut Vec<Vertex>, s: &str, pos: Vec2, size: f32, color: [f32; 4]) {
        let px = pixel_size(size);
        let baseline = (pos.y + self.cap_height(px)).round();
        let mut pen_x = pos.x;

        let mut cache = self.glyph_cache.borrow_mut();
        for c in s.chars() {
            let glyph = cache
                .entry((c, px as u32))
                .or_insert_with(|| rasterize(&self.font, c, px));
            let left = pen_x.round() + glyph.xmin as f32;
            let top = baseline - glyph.top as f32;
            for run in &glyph.runs {
                let cell = Rect::new(left + run.x as f32, top + run.y as f32, run.len as f32, 1.0);
                shapes::rect(out, cell, with_alpha(color, color[3] * run.alpha));
            }
            pen_x += glyph.advance;
        }
    }

    /// Draw `s` horizontally centered on `center_x`, capitals starting at `y`
    pub fn text_centered(
        &self,
        out: &mut Vec<Vertex>,
        s: &str,
        center_x: f32,
        y: f32,
        size: f32,
        color: [f32; 4],
    ) {
        let x = center_x - self.text_width(s, size) * 0.5;
        self.text(out, s, Vec2::new(x, y), size, color);
    }

    #[cfg(test)]
    fn cached_glyphs(&self) -> usize {
        self.glyph_cache.borrow().len()
    }
}

fn pixel_size(size: f32) -> f32 {
    size.round().max(1.0)
}

fn coverage_level(coverage: u8) -> u16 {
    (coverage as u16 * ALPHA_LEVELS + 127) / 255
}

fn rasterize(font: &Font, c: char, px: f32) -> GlyphRuns {
    let (metrics, bitmap) = font.rasterize(c, px);
    let mut runs = Vec::new();
    for (y, row) in bitmap.chunks(metrics.width.max(1)).enumerate() {
        let mut x = 0;
        while x < row.len() {
            let level = coverage_level(row[x]);
            let start = x;
            while x < row.len() && coverage_level(row[x]) == level {
                x += 1;
            }
            if level > 0 {
                runs.push(Run {
                    x: start as u16,
                    y: y as u16,
                    len: (x - start) as u16,
                    alpha: level as f32 / ALPHA_LEVELS as f32,
                });
            }
        }
    }
    GlyphRuns {
        xmin: metrics.xmin,
        top: metrics.ymin + metrics.height as i32,
        advance: metrics.advance_width,
        runs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atlas() -> FontAtlas {
        FontAtlas::embedded().unwrap()
    }

    #[test]
    fn test_rejects_garbage_font() {
        assert!(matches!(FontAtlas::new(&[0, 1, 2, 3]), Err(FontError::Load(_))));
    }

    #[test]
    fn test_width_grows_with_text() {
        let font = atlas();
        assert_eq!(font.text_width("", 20.0), 0.0);
        let one = font.text_width("8", 20.0);
        assert!(one > 0.0);
        // Monospaced digits
        assert!((font.text_width("888", 20.0) - 3.0 * one).abs() < 0.01);
        assert!(font.text_width("SCORE", 40.0) > font.text_width("SCORE", 20.0));
    }

    #[test]
    fn test_text_stays_in_its_box() {
        let font = atlas();
        let mut out = Vec::new();
        let pos = Vec2::new(100.0, 50.0);
        font.text(&mut out, "HI", pos, 24.0, [1.0; 4]);
        assert!(!out.is_empty());
        assert_eq!(out.len() % 6, 0);

        let width = font.text_width("HI", 24.0);
        let cap = font.cap_height(24.0);
        for v in &out {
            let [x, y] = v.position;
            assert!(x >= pos.x - 2.0 && x <= pos.x + width + 2.0, "x {x}");
            assert!(y >= pos.y - 2.0 && y <= pos.y + cap + 2.0, "y {y}");
            assert!(v.color[3] > 0.0 && v.color[3] <= 1.0);
        }
    }

    #[test]
    fn test_space_draws_nothing() {
        let font = atlas();
        let mut out = Vec::new();
        font.text(&mut out, "   ", Vec2::ZERO, 18.0, [1.0; 4]);
        assert!(out.is_empty());
        assert!(font.text_width("   ", 18.0) > 0.0);
    }

    #[test]
    fn test_glyphs_are_cached_per_size() {
        let font = atlas();
        let mut out = Vec::new();
        font.text(&mut out, "AAA", Vec2::ZERO, 18.0, [1.0; 4]);
        assert_eq!(font.cached_glyphs(), 1);
        let first = out.len();
        font.text(&mut out, "A", Vec2::ZERO, 18.0, [1.0; 4]);
        assert_eq!(out.len() - first, first / 3);
        font.text(&mut out, "A", Vec2::ZERO, 30.0, [1.0; 4]);
        assert_eq!(font.cached_glyphs(), 2);
    }
}
