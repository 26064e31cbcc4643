//! Renderer: paints a token sequence onto one or more canvases.
//!
//! The token stream is folded into a [`RenderState`] that owns the current
//! canvas, the cursor and the active colors. With animation enabled, every
//! `line_count` lines the current canvas is snapshotted as a frame and a
//! fresh one is started.

pub mod canvas;
pub mod emoji;
pub mod font;
pub mod resize;

use image::RgbaImage;
use tracing::debug;

use crate::animation::AnimationSettings;
use crate::color::Rgba;
use crate::text::char_width;
use crate::token::{ColorType, Token, Tokens};

pub use canvas::Canvas;
pub use emoji::EmojiCompositor;
pub use font::{load_emoji_face, load_face, Face, FontFace};
pub use resize::ResizeTarget;

/// Everything the renderer needs besides fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub foreground: Rgba,
    pub background: Rgba,
    /// Font size in pixels.
    pub font_size: u32,
    pub animation: Option<AnimationSettings>,
    pub resize: Option<ResizeTarget>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            foreground: Rgba::WHITE,
            background: Rgba::BLACK,
            font_size: 20,
            animation: None,
            resize: None,
        }
    }
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub char_width: u32,
    pub char_height: u32,
}

impl CellMetrics {
    pub fn new(font_size: u32) -> Self {
        Self {
            char_width: font_size / 2,
            // 1.1 leaves room for descenders.
            char_height: (font_size as f32 * 1.1).round() as u32,
        }
    }

    /// Baseline of the line whose top edge is at `y`.
    pub fn baseline(&self, y: u32) -> u32 {
        y + self.char_height - self.char_height / 5
    }

    /// Canvas size for `tokens`.
    ///
    /// When animating, the full height is divided by the number of frames so
    /// each canvas only spans one group of lines.
    pub fn canvas_size(&self, tokens: &Tokens, animation: Option<AnimationSettings>) -> (u32, u32) {
        let line_count = tokens.lines().len();
        let width = tokens.max_line_width() as u32 * self.char_width;
        let mut height = line_count as u32 * self.char_height;
        if let Some(settings) = animation {
            let groups = (line_count / settings.line_count).max(1);
            height /= groups as u32;
        }
        (width, height)
    }
}

/// A finished canvas and how long it is shown.
#[derive(Debug, Clone)]
pub struct Frame {
    pub image: RgbaImage,
    /// Hundredths of a second; 0 for still images.
    pub delay: u16,
}

/// Rendered frames, in order. Never empty, so [`FrameSet::first`] always
/// has a frame to return.
#[derive(Debug, Clone)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    pub fn single(frame: Frame) -> Self {
        Self {
            frames: vec![frame],
        }
    }

    /// `None` for an empty list.
    pub fn from_frames(frames: Vec<Frame>) -> Option<Self> {
        (!frames.is_empty()).then_some(Self { frames })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn first(&self) -> &Frame {
        &self.frames[0]
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Keep only the first frame.
    pub fn into_first(mut self) -> Frame {
        self.frames.swap_remove(0)
    }

    /// Show every frame for `delay` hundredths of a second.
    pub fn with_delay(mut self, delay: u16) -> Self {
        for frame in &mut self.frames {
            frame.delay = delay;
        }
        self
    }
}

/// Mutable state threaded through the token walk.
struct RenderState {
    canvas: Canvas,
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    fg: Rgba,
    bg: Rgba,
    default_fg: Rgba,
    default_bg: Rgba,
    line_counter: usize,
    animation: Option<AnimationSettings>,
    frames: Vec<Frame>,
}

impl RenderState {
    fn new(config: &RenderConfig, width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height, config.background),
            width,
            height,
            x: 0,
            y: 0,
            fg: config.foreground,
            bg: config.background,
            default_fg: config.foreground,
            default_bg: config.background,
            line_counter: 0,
            animation: config.animation,
            frames: Vec::new(),
        }
    }

    fn apply_color(&mut self, color: ColorType) {
        match color {
            ColorType::Reset => {
                self.fg = self.default_fg;
                self.bg = self.default_bg;
            }
            ColorType::Reverse => std::mem::swap(&mut self.fg, &mut self.bg),
            ColorType::Foreground(c) => self.fg = c,
            ColorType::Background(c) => self.bg = c,
            _ => {}
        }
    }

    fn newline(&mut self, metrics: CellMetrics) {
        self.x = 0;
        self.y += metrics.char_height;
        self.line_counter += 1;

        if let Some(settings) = self.animation {
            if self.line_counter % settings.line_count == 0 {
                let fresh = Canvas::new(self.width, self.height, self.default_bg);
                let done = std::mem::replace(&mut self.canvas, fresh);
                self.frames.push(Frame {
                    image: done.into_image(),
                    delay: settings.delay,
                });
                self.x = 0;
                self.y = 0;
            }
        }
    }

    /// Close the last line and collect the frames.
    fn finish(mut self) -> FrameSet {
        let Some(settings) = self.animation else {
            return FrameSet::single(Frame {
                image: self.canvas.into_image(),
                delay: 0,
            });
        };

        // The end of input closes the final line group like a newline would.
        self.line_counter += 1;
        if self.line_counter % settings.line_count == 0 || self.frames.is_empty() {
            self.frames.push(Frame {
                image: self.canvas.into_image(),
                delay: settings.delay,
            });
        }

        FrameSet { frames: self.frames }
    }
}

/// Paints tokens with a primary face and an emoji compositor.
pub struct Renderer<'a> {
    config: &'a RenderConfig,
    face: &'a dyn Face,
    emoji: &'a EmojiCompositor<'a>,
    metrics: CellMetrics,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a RenderConfig, face: &'a dyn Face, emoji: &'a EmojiCompositor<'a>) -> Self {
        Self {
            config,
            face,
            emoji,
            metrics: CellMetrics::new(config.font_size),
        }
    }

    /// Render `tokens` into one frame, or one frame per line group when
    /// animating, then apply the configured resize.
    pub fn render(&self, tokens: &Tokens) -> FrameSet {
        let (width, height) = self.metrics.canvas_size(tokens, self.config.animation);
        debug!(width, height, tokens = tokens.len(), "Rendering");

        let state = tokens
            .iter()
            .fold(RenderState::new(self.config, width, height), |mut state, token| {
                self.apply(&mut state, token);
                state
            });
        let frames = state.finish();

        match self.config.resize {
            Some(target) => FrameSet {
                frames: resize::resize_frames(frames.frames, target),
            },
            None => frames,
        }
    }

    fn apply(&self, state: &mut RenderState, token: &Token) {
        match token {
            Token::Color(color) => state.apply_color(*color),
            Token::Text(text) => {
                for c in text.chars() {
                    if c == '\n' {
                        state.newline(self.metrics);
                    } else {
                        self.paint_char(state, c);
                    }
                }
            }
        }
    }

    fn paint_char(&self, state: &mut RenderState, c: char) {
        let advance = char_width(c) as u32 * self.metrics.char_width;
        state
            .canvas
            .fill_rect(state.x, state.y, advance, self.metrics.char_height, state.bg);
        let baseline = self.metrics.baseline(state.y);
        self.emoji
            .paint(&mut state.canvas, c, state.x, baseline, state.fg, self.face);
        state.x += advance;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    /// Fills the left half of the cell above the baseline.
    struct HalfBlockFace;

    impl Face for HalfBlockFace {
        fn ascent(&self) -> f32 {
            16.0
        }

        fn descent(&self) -> f32 {
            4.0
        }

        fn draw_glyph(&self, c: char, x: f32, baseline: f32, plot: &mut dyn FnMut(i32, i32, f32)) {
            if c == ' ' {
                return;
            }
            for dy in 1..=8 {
                for dx in 0..5 {
                    plot(x as i32 + dx, baseline as i32 - dy, 1.0);
                }
            }
        }
    }

    fn render(input: &str, config: &RenderConfig) -> FrameSet {
        let tokens = tokenize(input).unwrap();
        let emoji = EmojiCompositor::plain();
        Renderer::new(config, &HalfBlockFace, &emoji).render(&tokens)
    }

    fn pixel(image: &RgbaImage, x: u32, y: u32) -> Rgba {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        Rgba::new(r, g, b, a)
    }

    #[test]
    fn metrics_for_default_font_size() {
        let metrics = CellMetrics::new(20);
        assert_eq!(metrics.char_width, 10);
        assert_eq!(metrics.char_height, 22);
        assert_eq!(metrics.baseline(0), 18);
        assert_eq!(metrics.baseline(22), 40);
    }

    #[test]
    fn canvas_size_uses_widest_line() {
        let tokens = tokenize("ab\nあいう\n").unwrap();
        let size = CellMetrics::new(20).canvas_size(&tokens, None);
        assert_eq!(size, (60, 66));
    }

    #[test]
    fn canvas_height_is_divided_between_frames() {
        let tokens = tokenize("1\n2\n3\n4").unwrap();
        let metrics = CellMetrics::new(20);
        assert_eq!(
            metrics.canvas_size(&tokens, Some(AnimationSettings::new(2, 10))),
            (10, 44)
        );
        assert_eq!(
            metrics.canvas_size(&tokens, Some(AnimationSettings::new(8, 10))),
            (10, 88)
        );
    }

    #[test]
    fn red_text_on_default_background() {
        let frames = render("\x1b[31mRed\x1b[0m", &RenderConfig::default());
        assert_eq!(frames.len(), 1);

        let image = &frames.frames()[0].image;
        assert_eq!(image.dimensions(), (30, 22));
        assert_eq!(pixel(image, 0, 0), Rgba::BLACK);
        assert_eq!(pixel(image, 2, 15), Rgba::RED);
        assert_eq!(pixel(image, 22, 15), Rgba::RED);
        assert_eq!(pixel(image, 7, 15), Rgba::BLACK);
    }

    #[test]
    fn background_color_fills_the_cell() {
        let frames = render("\x1b[44m \x1b[0m ", &RenderConfig::default());
        let image = &frames.frames()[0].image;
        assert_eq!(pixel(image, 0, 0), Rgba::BLUE);
        assert_eq!(pixel(image, 9, 21), Rgba::BLUE);
        assert_eq!(pixel(image, 10, 0), Rgba::BLACK);
    }

    #[test]
    fn reverse_swaps_colors_and_reset_restores_them() {
        let frames = render("\x1b[7mA\x1b[0mB", &RenderConfig::default());
        let image = &frames.frames()[0].image;
        // Reversed: white cell, black glyph.
        assert_eq!(pixel(image, 8, 2), Rgba::WHITE);
        assert_eq!(pixel(image, 2, 15), Rgba::BLACK);
        // Reset: black cell, white glyph.
        assert_eq!(pixel(image, 18, 2), Rgba::BLACK);
        assert_eq!(pixel(image, 12, 15), Rgba::WHITE);
    }

    #[test]
    fn second_line_starts_below_the_first() {
        let frames = render("A\n\x1b[32mB", &RenderConfig::default());
        let image = &frames.frames()[0].image;
        assert_eq!(image.dimensions(), (10, 44));
        assert_eq!(pixel(image, 2, 15), Rgba::WHITE);
        assert_eq!(pixel(image, 2, 37), Rgba::GREEN);
    }

    #[test]
    fn wide_characters_advance_two_cells() {
        let frames = render("あb", &RenderConfig::default());
        let image = &frames.frames()[0].image;
        assert_eq!(image.dimensions(), (30, 22));
        assert_eq!(pixel(image, 22, 15), Rgba::WHITE);
        assert_eq!(pixel(image, 12, 15), Rgba::BLACK);
    }

    #[test]
    fn animation_snapshots_each_line_group() {
        let config = RenderConfig {
            animation: Some(AnimationSettings::new(1, 15)),
            ..RenderConfig::default()
        };
        let frames = render("\x1b[31mA\n\x1b[32mB\n\x1b[34mC", &config);

        assert_eq!(frames.len(), 3);
        let expected = [Rgba::RED, Rgba::GREEN, Rgba::BLUE];
        for (frame, color) in frames.frames().iter().zip(expected) {
            assert_eq!(frame.image.dimensions(), (10, 22));
            assert_eq!(frame.delay, 15);
            assert_eq!(pixel(&frame.image, 2, 15), color);
        }
    }

    #[test]
    fn animation_groups_several_lines_per_frame() {
        let config = RenderConfig {
            animation: Some(AnimationSettings::new(2, 20)),
            ..RenderConfig::default()
        };
        let frames = render("A\nB\nC\nD", &config);
        assert_eq!(frames.len(), 2);
        assert!(frames
            .frames()
            .iter()
            .all(|f| f.image.dimensions() == (10, 44)));
    }

    #[test]
    fn incomplete_group_still_yields_a_frame() {
        let config = RenderConfig {
            animation: Some(AnimationSettings::new(3, 20)),
            ..RenderConfig::default()
        };
        let frames = render("A\nB", &config);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn colors_carry_across_frames() {
        let config = RenderConfig {
            animation: Some(AnimationSettings::new(1, 10)),
            ..RenderConfig::default()
        };
        let frames = render("\x1b[33mA\nB", &config);
        assert_eq!(pixel(&frames.frames()[1].image, 2, 15), Rgba::YELLOW);
    }

    #[test]
    fn new_frame_starts_with_the_default_background() {
        let config = RenderConfig {
            animation: Some(AnimationSettings::new(1, 10)),
            ..RenderConfig::default()
        };
        let frames = render("\x1b[44mAA\nB", &config);
        assert_eq!(frames.len(), 2);

        let second = &frames.frames()[1].image;
        assert_eq!(second.dimensions(), (20, 22));
        // The painted cell keeps the active background.
        assert_eq!(pixel(second, 8, 2), Rgba::BLUE);
        // The cell past the end of the shorter line was never painted.
        assert_eq!(pixel(second, 15, 2), Rgba::BLACK);
        assert_eq!(pixel(second, 19, 21), Rgba::BLACK);
    }

    #[test]
    fn frame_delay_is_replaced() {
        let frames = FrameSet::single(Frame {
            image: RgbaImage::new(1, 1),
            delay: 0,
        })
        .with_delay(40);
        assert_eq!(frames.first().delay, 40);
        assert_eq!(frames.into_first().delay, 40);
    }

    #[test]
    fn resize_applies_to_the_result() {
        let config = RenderConfig {
            resize: Some(ResizeTarget::ICON),
            ..RenderConfig::default()
        };
        let frames = render("Red", &config);
        assert_eq!(frames.frames()[0].image.dimensions(), (128, 128));
    }

    #[test]
    fn frame_set_rejects_empty_lists() {
        assert!(FrameSet::from_frames(Vec::new()).is_none());
    }
}
