//! Font faces used to rasterize glyphs.
//!
//! The renderer only talks to the [`Face`] trait. [`FontFace`] implements it
//! on top of `ab_glyph` for TrueType/OpenType files and collections.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Monospace face compiled into the binary, used when no font file loads.
const BUILTIN_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono.ttf");

const BUILTIN_FONT_NAME: &str = "<built-in DejaVu Sans Mono>";

/// Anything that can report vertical metrics and rasterize a glyph.
pub trait Face {
    /// Distance from the baseline to the top of the tallest glyph, in pixels.
    fn ascent(&self) -> f32;

    /// Distance from the baseline to the bottom of the lowest glyph, in
    /// pixels. Positive below the baseline.
    fn descent(&self) -> f32;

    /// Rasterize `c` with its origin at `(x, baseline)`.
    ///
    /// `plot` receives absolute pixel coordinates and a coverage value in
    /// `0.0..=1.0` for each touched pixel.
    fn draw_glyph(&self, c: char, x: f32, baseline: f32, plot: &mut dyn FnMut(i32, i32, f32));
}

/// An outline font loaded from disk.
pub struct FontFace {
    font: FontVec,
    scale: PxScale,
    path: PathBuf,
}

impl FontFace {
    /// Parse font data. `index` selects a face inside a collection.
    ///
    /// `size` is the em size in pixels, so glyph sizes match what a terminal
    /// with the same point size would show.
    pub fn from_bytes(data: Vec<u8>, index: u32, size: f32, path: &Path) -> Result<Self> {
        let font = FontVec::try_from_vec_and_index(data, index).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let scale = match font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                PxScale::from(size * font.height_unscaled() / units_per_em)
            }
            _ => PxScale::from(size),
        };

        Ok(Self {
            font,
            scale,
            path: path.to_path_buf(),
        })
    }

    /// Read and parse a font file.
    pub fn open(path: &Path, index: u32, size: f32) -> Result<Self> {
        let data = fs::read(path).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_bytes(data, index, size, path)
    }

    /// The face bundled with the binary.
    pub fn builtin(size: f32) -> Result<Self> {
        Self::from_bytes(BUILTIN_FONT.to_vec(), 0, size, Path::new(BUILTIN_FONT_NAME))
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("path", &self.path)
            .field("scale", &self.scale)
            .finish()
    }
}

impl Face for FontFace {
    fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    fn descent(&self) -> f32 {
        -self.font.as_scaled(self.scale).descent()
    }

    fn draw_glyph(&self, c: char, x: f32, baseline: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
        let glyph = self
            .font
            .glyph_id(c)
            .with_scale_and_position(self.scale, point(x, baseline));

        if let Some(outlined) = self.font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                plot(left + gx as i32, top + gy as i32, coverage);
            });
        }
    }
}

/// Fonts tried, in order, when no usable font file was given.
///
/// The platform's CJK-capable default comes first, then common monospace
/// fonts found on Linux distributions.
pub fn default_font_candidates() -> Vec<(PathBuf, u32)> {
    let mut candidates: Vec<(PathBuf, u32)> = Vec::new();

    if cfg!(target_os = "windows") {
        candidates.push((PathBuf::from(r"C:\Windows\Fonts\msgothic.ttc"), 0));
    } else if cfg!(target_os = "macos") {
        candidates.push((PathBuf::from("/System/Library/Fonts/AppleSDGothicNeo.ttc"), 0));
    } else if cfg!(target_os = "ios") {
        candidates.push((
            PathBuf::from("/System/Library/Fonts/Core/AppleSDGothicNeo.ttc"),
            0,
        ));
    } else if cfg!(target_os = "android") {
        candidates.push((PathBuf::from("/system/fonts/NotoSansCJK-Regular.ttc"), 5));
    } else {
        if Path::new("/proc/sys/fs/binfmt_misc/WSLInterop").exists() {
            candidates.push((PathBuf::from("/mnt/c/Windows/Fonts/msgothic.ttc"), 0));
        }
        candidates.push((
            PathBuf::from("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
            5,
        ));
        candidates.push((
            PathBuf::from("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
            5,
        ));
    }

    candidates.extend(
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
            "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
            "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
            "/usr/share/fonts/truetype/freefont/FreeMono.ttf",
        ]
        .into_iter()
        .map(|p| (PathBuf::from(p), 0)),
    );

    candidates
}

/// Load the primary face.
///
/// A requested font that does not exist is reported and replaced by the
/// first loadable [`default_font_candidates`] entry, or by the built-in face
/// when none loads. A requested font that exists but cannot be parsed is an
/// error.
pub fn load_face(requested: Option<&Path>, index: u32, size: f32) -> Result<FontFace> {
    load_face_from(requested, index, size, &default_font_candidates())
}

fn load_face_from(
    requested: Option<&Path>,
    index: u32,
    size: f32,
    candidates: &[(PathBuf, u32)],
) -> Result<FontFace> {
    if let Some(path) = requested {
        if path.exists() {
            let face = FontFace::open(path, index, size)?;
            debug!(path = %path.display(), index, "Loaded font");
            return Ok(face);
        }
        warn!(
            "Font file {} does not exist, falling back to a system font",
            path.display()
        );
    }

    for (path, index) in candidates {
        if !path.exists() {
            continue;
        }
        match FontFace::open(path, *index, size) {
            Ok(face) => {
                info!("Loaded font: {}", path.display());
                return Ok(face);
            }
            Err(e) => debug!("Skipping fallback font: {}", e),
        }
    }

    warn!("No system font found, using the built-in font");
    FontFace::builtin(size)
}

/// Load the optional emoji face. A missing file disables it with a warning.
pub fn load_emoji_face(requested: Option<&Path>, index: u32, size: f32) -> Result<Option<FontFace>> {
    let Some(path) = requested else {
        return Ok(None);
    };
    if !path.exists() {
        warn!(
            "Emoji font file {} does not exist, emoji font disabled",
            path.display()
        );
        return Ok(None);
    }
    let face = FontFace::open(path, index, size)?;
    debug!(path = %path.display(), index, "Loaded emoji font");
    Ok(Some(face))
}
