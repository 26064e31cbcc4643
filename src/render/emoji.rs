//! Emoji compositor: decides how a single character is painted.
//!
//! A character with a matching `emoji_uXXXX.png` in the emoji directory is
//! drawn from that image (or from the emoji font when requested). Everything
//! else is an ordinary glyph from the primary face.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;
use tracing::warn;

use super::canvas::Canvas;
use super::font::Face;
use crate::color::Rgba;

/// Characters that Unicode classifies as emoji but that render as text.
const TEXT_PRESENTATION: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '#', '*', '\u{a9}', '\u{ae}',
];

/// Emoji images are scaled to this fraction of the line's ascent + descent.
const EMOJI_SCALE: f32 = 0.9;

/// How a character will be painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphSource {
    /// Ordinary glyph from the primary face.
    Font,
    /// Glyph from the emoji face.
    EmojiFont,
    /// Raster image at the given path.
    EmojiImage(PathBuf),
}

/// `true` for code points that always render as plain text.
pub fn is_text_presentation(c: char) -> bool {
    TEXT_PRESENTATION.contains(&c)
}

/// Path of the emoji image for `c` inside `dir`, e.g. `emoji_u1f363.png`.
pub fn asset_path(dir: &Path, c: char) -> PathBuf {
    dir.join(format!("emoji_u{:04x}.png", u32::from(c)))
}

/// Paints characters, substituting emoji images or the emoji face.
pub struct EmojiCompositor<'a> {
    emoji_dir: Option<PathBuf>,
    emoji_face: Option<&'a dyn Face>,
    use_emoji_font: bool,
    // Per-character lookups, so the emoji directory is checked once per char.
    sources: RefCell<HashMap<char, GlyphSource>>,
    // Decoded and scaled images, `None` when decoding failed.
    cache: RefCell<HashMap<char, Option<RgbaImage>>>,
}

impl<'a> EmojiCompositor<'a> {
    pub fn new(
        emoji_dir: Option<PathBuf>,
        emoji_face: Option<&'a dyn Face>,
        use_emoji_font: bool,
    ) -> Self {
        Self {
            emoji_dir,
            emoji_face,
            use_emoji_font,
            sources: RefCell::new(HashMap::new()),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// A compositor that never substitutes anything.
    pub fn plain() -> Self {
        Self::new(None, None, false)
    }

    /// Decide how `c` should be painted. The answer is remembered for the
    /// lifetime of the compositor.
    pub fn classify(&self, c: char) -> GlyphSource {
        self.sources
            .borrow_mut()
            .entry(c)
            .or_insert_with(|| self.lookup(c))
            .clone()
    }

    fn lookup(&self, c: char) -> GlyphSource {
        if is_text_presentation(c) {
            return GlyphSource::Font;
        }
        let Some(dir) = self.emoji_dir.as_deref() else {
            return GlyphSource::Font;
        };
        let path = asset_path(dir, c);
        if !path.is_file() {
            return GlyphSource::Font;
        }
        if self.use_emoji_font {
            GlyphSource::EmojiFont
        } else {
            GlyphSource::EmojiImage(path)
        }
    }

    /// Paint `c` with its origin at `(x, baseline)`.
    ///
    /// Asset problems never fail the render: an undecodable image is logged
    /// and the character is drawn as a plain glyph instead.
    pub fn paint(
        &self,
        canvas: &mut Canvas,
        c: char,
        x: u32,
        baseline: u32,
        fg: Rgba,
        face: &dyn Face,
    ) {
        match self.classify(c) {
            GlyphSource::Font => paint_glyph(canvas, face, c, x, baseline, fg),
            GlyphSource::EmojiFont => {
                let emoji_face = self.emoji_face.unwrap_or(face);
                paint_glyph(canvas, emoji_face, c, x, baseline, fg);
            }
            GlyphSource::EmojiImage(path) => match self.scaled_image(c, &path, face) {
                Some(image) => {
                    // Bottom edge on the baseline.
                    let top = i64::from(baseline) - i64::from(image.height());
                    canvas.overlay(&image, i64::from(x), top);
                }
                None => paint_glyph(canvas, face, c, x, baseline, fg),
            },
        }
    }

    fn scaled_image(&self, c: char, path: &Path, face: &dyn Face) -> Option<RgbaImage> {
        self.cache
            .borrow_mut()
            .entry(c)
            .or_insert_with(|| load_scaled(path, emoji_size(face)))
            .clone()
    }
}

/// Side length of a scaled emoji for `face`.
pub fn emoji_size(face: &dyn Face) -> u32 {
    let size = (face.ascent().floor() + face.descent().floor()) * EMOJI_SCALE;
    size.max(1.0) as u32
}

fn load_scaled(path: &Path, size: u32) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => Some(imageops::resize(
            &img.to_rgba8(),
            size,
            size,
            FilterType::Triangle,
        )),
        Err(e) => {
            warn!("Failed to decode emoji image {}: {}", path.display(), e);
            None
        }
    }
}

fn paint_glyph(canvas: &mut Canvas, face: &dyn Face, c: char, x: u32, baseline: u32, fg: Rgba) {
    face.draw_glyph(c, x as f32, baseline as f32, &mut |px, py, coverage| {
        canvas.blend_pixel(px, py, fg, coverage);
    });
}
