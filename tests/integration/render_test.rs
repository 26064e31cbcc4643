//! End-to-end rendering through the library API.

use std::fs;
use std::io::Cursor;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, RgbaImage};

use textimg::output::path::with_number_suffix;
use textimg::render::emoji::asset_path;
use textimg::render::{EmojiCompositor, ResizeTarget};
use textimg::{
    encode, prepare_lines, render_lines, AnimationSettings, Assembled, OutputFormat, OutputSink,
    RenderConfig, Rgba, SlideWindow,
};

use crate::helpers::{pixel, render, render_with_emoji, BlockFace};

fn animated(line_count: usize) -> RenderConfig {
    RenderConfig {
        animation: Some(AnimationSettings::new(line_count, 20)),
        ..RenderConfig::default()
    }
}

// ============================================================================
// Still images
// ============================================================================

#[test]
fn red_text_renders_on_black() {
    let image = render(&["\x1b[31mRed\x1b[0m"], &RenderConfig::default());
    let Assembled::Still(image) = image else {
        panic!("Expected a still image");
    };

    assert_eq!(image.dimensions(), (30, 22));
    assert_eq!(pixel(&image, 0, 0), Rgba::BLACK);
    assert_eq!(pixel(&image, 29, 21), Rgba::BLACK);
    for x in [1, 11, 21] {
        assert_eq!(pixel(&image, x, 14), Rgba::RED, "glyph at x={}", x);
    }
}

#[test]
fn tabs_and_zero_width_characters_are_normalized() {
    let image = render(&["a\tb\u{200b}"], &RenderConfig::default());
    // "a" + two spaces + "b"
    assert_eq!(image.first_image().dimensions(), (40, 22));
}

#[test]
fn custom_default_colors() {
    let config = RenderConfig {
        foreground: Rgba::YELLOW,
        background: Rgba::new(0, 0, 0, 0),
        ..RenderConfig::default()
    };
    let image = render(&["x\x1b[41m \x1b[0m"], &config);
    let image = image.first_image();

    assert_eq!(pixel(image, 0, 0), Rgba::new(0, 0, 0, 0));
    assert_eq!(pixel(image, 2, 14), Rgba::YELLOW);
    assert_eq!(pixel(image, 15, 5), Rgba::RED);
}

#[test]
fn png_file_output_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    let image = render(&["\x1b[32mok"], &RenderConfig::default());

    let mut sink = OutputSink::create(&path).unwrap();
    encode(&mut sink, OutputFormat::from_path(&path).unwrap(), &image).unwrap();
    sink.finish().unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (20, 22));
    assert_eq!(pixel(&decoded, 1, 14), Rgba::GREEN);
}

#[test]
fn jpeg_output_keeps_dimensions() {
    let image = render(&["hello", "world"], &RenderConfig::default());
    let mut bytes = Vec::new();
    encode(&mut bytes, OutputFormat::Jpeg, &image).unwrap();

    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (50, 44));
}

#[test]
fn icon_resize() {
    let config = RenderConfig {
        resize: Some(ResizeTarget::ICON),
        ..RenderConfig::default()
    };
    let image = render(&["resize me"], &config);
    assert_eq!(image.first_image().dimensions(), (128, 128));
}

// ============================================================================
// Animation
// ============================================================================

#[test]
fn one_frame_per_line() {
    let image = render(&["\x1b[31m1", "\x1b[32m2", "\x1b[34m3"], &animated(1));
    let Assembled::Animated(frames) = &image else {
        panic!("Expected an animation");
    };

    assert_eq!(frames.len(), 3);
    let colors: Vec<Rgba> = frames
        .frames()
        .iter()
        .map(|f| pixel(&f.image, 2, 14))
        .collect();
    assert_eq!(colors, vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE]);
}

#[test]
fn gif_contains_every_frame() {
    let image = render(&["1", "2", "3", "4"], &animated(2));
    let mut bytes = Vec::new();
    encode(&mut bytes, OutputFormat::Gif, &image).unwrap();

    let frames = GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].buffer().dimensions(), (10, 44));
}

#[test]
fn slide_animation_scrolls_through_lines() {
    let lines: Vec<String> = (1..=5).map(|i| i.to_string()).collect();
    let prepared = prepare_lines(&lines, Some(SlideWindow::new(2, 1, false))).unwrap();
    assert_eq!(prepared, vec!["1", "2", "2", "3", "3", "4", "4", "5"]);

    let image = render_lines(
        &prepared,
        &animated(2),
        &BlockFace,
        &EmojiCompositor::plain(),
    )
    .unwrap();
    assert_eq!(image.frame_count(), 4);
}

// ============================================================================
// Emoji
// ============================================================================

#[test]
fn emoji_image_replaces_glyph() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 255, 255]))
        .save(asset_path(dir.path(), '\u{1f363}'))
        .unwrap();
    let emoji = EmojiCompositor::new(Some(dir.path().to_path_buf()), None, false);

    let image = render_with_emoji(&["\u{1f363}"], &RenderConfig::default(), &emoji);
    let image = image.first_image();

    // Scaled to 18x18 with its bottom on the baseline (y = 18).
    let p = pixel(image, 5, 10);
    assert!(p.b > 200 && p.r == 0, "got {:?}", p);
    assert_eq!(pixel(image, 5, 19), Rgba::BLACK);
}

#[test]
fn digits_never_use_emoji_images() {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::from_pixel(32, 32, image::Rgba([0, 0, 255, 255]))
        .save(asset_path(dir.path(), '1'))
        .unwrap();
    let emoji = EmojiCompositor::new(Some(dir.path().to_path_buf()), None, false);

    let image = render_with_emoji(&["1"], &RenderConfig::default(), &emoji);
    assert_eq!(pixel(image.first_image(), 2, 14), Rgba::WHITE);
}

// ============================================================================
// Output paths
// ============================================================================

#[test]
fn numbered_output_does_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("t.png");
    fs::write(&path, b"existing").unwrap();

    let next = with_number_suffix(&path);
    assert_eq!(next, dir.path().join("t_2.png"));
    assert_eq!(fs::read(&path).unwrap(), b"existing");
}
