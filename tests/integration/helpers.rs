//! Shared fixtures for integration tests.

use assert_cmd::Command;
use image::RgbaImage;
use std::path::Path;

use textimg::render::{EmojiCompositor, Face};
use textimg::{prepare_lines, render_lines, Assembled, RenderConfig, Rgba};

/// Environment variables cleared before running the binary.
const TEXTIMG_ENV: &[&str] = &[
    "TEXTIMG_OUTPUT_DIR",
    "TEXTIMG_FONT_FILE",
    "TEXTIMG_EMOJI_DIR",
    "TEXTIMG_EMOJI_FONT_FILE",
    "RUST_LOG",
];

/// Deterministic face: every visible glyph is a 5x8 block above the baseline.
pub struct BlockFace;

impl Face for BlockFace {
    fn ascent(&self) -> f32 {
        16.0
    }

    fn descent(&self) -> f32 {
        4.0
    }

    fn draw_glyph(&self, c: char, x: f32, baseline: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
        if c.is_whitespace() {
            return;
        }
        for dy in 1..=8 {
            for dx in 0..5 {
                plot(x as i32 + dx, baseline as i32 - dy, 1.0);
            }
        }
    }
}

/// Prepare and render `lines` with [`BlockFace`] and no emoji.
pub fn render(lines: &[&str], config: &RenderConfig) -> Assembled {
    render_with_emoji(lines, config, &EmojiCompositor::plain())
}

pub fn render_with_emoji(
    lines: &[&str],
    config: &RenderConfig,
    emoji: &EmojiCompositor<'_>,
) -> Assembled {
    let lines: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
    let prepared = prepare_lines(&lines, None).unwrap();
    render_lines(&prepared, config, &BlockFace, emoji).unwrap()
}

pub fn pixel(image: &RgbaImage, x: u32, y: u32) -> Rgba {
    let [r, g, b, a] = image.get_pixel(x, y).0;
    Rgba::new(r, g, b, a)
}

/// The textimg binary with a clean environment and config directory.
pub fn textimg(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("textimg").unwrap();
    for name in TEXTIMG_ENV {
        cmd.env_remove(name);
    }
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}
