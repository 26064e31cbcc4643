//! The text-to-image pipeline: option resolution, input preparation and
//! rendering.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::animation::{assemble, AnimationSettings, Assembled};
use crate::cli::Cli;
use crate::color::{parse_color_option, Rgba};
use crate::config::{Config, EnvVars, SHELLGEI_EMOJI_FONT};
use crate::error::{Error, Result};
use crate::output::path::{shellgei_image_path, with_number_suffix, with_timestamp};
use crate::output::OutputFormat;
use crate::render::{EmojiCompositor, Face, RenderConfig, Renderer, ResizeTarget};
use crate::slide::SlideWindow;
use crate::text::{is_blank_input, normalize_lines};
use crate::token::{tokenize, Tokens};

/// Fully resolved options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub foreground: Rgba,
    pub background: Rgba,
    pub font_file: Option<PathBuf>,
    pub font_index: u32,
    pub emoji_font_file: Option<PathBuf>,
    pub emoji_font_index: u32,
    pub emoji_dir: Option<PathBuf>,
    pub use_emoji_font: bool,
    pub font_size: u32,
    /// `None` writes to standard output.
    pub output: Option<PathBuf>,
    pub animation: Option<AnimationSettings>,
    pub slide: Option<SlideWindow>,
    pub resize: Option<ResizeTarget>,
}

impl Options {
    /// Merge the command line, environment and config file.
    ///
    /// `now` is used for `--timestamp`.
    pub fn resolve(cli: &Cli, env: &EnvVars, config: &Config, now: &DateTime<Local>) -> Result<Self> {
        let animating = cli.animation || cli.slide;

        let mut output = if cli.shellgei_imagedir {
            Some(shellgei_image_path(env.output_dir.as_deref(), animating)?)
        } else {
            cli.out.clone()
        };
        if cli.timestamp {
            output = output.map(|path| with_timestamp(&path, now));
        }
        if cli.numbering {
            output = output.map(|path| with_number_suffix(&path));
        }

        let (emoji_font_file, use_emoji_font) = if cli.shellgei_emoji_fontfile {
            (Some(PathBuf::from(SHELLGEI_EMOJI_FONT)), true)
        } else {
            (
                cli.emoji_font_file
                    .clone()
                    .or_else(|| env.emoji_font_file.clone())
                    .or_else(|| config.emoji_font_file.clone()),
                cli.use_emoji_font,
            )
        };

        let foreground = parse_color_option(cli.foreground.as_deref().unwrap_or(config.foreground()))?;
        let background = parse_color_option(cli.background.as_deref().unwrap_or(config.background()))?;

        let line_count = cli.line_count.unwrap_or(config.line_count());
        let delay = cli.delay.unwrap_or(config.delay());
        let animation = animating.then(|| AnimationSettings::new(line_count, delay));
        let slide = cli
            .slide
            .then(|| SlideWindow::new(line_count.max(1), cli.slide_width, cli.forever));

        let resize = if cli.icon {
            Some(ResizeTarget::ICON)
        } else {
            ResizeTarget::new(cli.resize_width, cli.resize_height)
        };

        Ok(Self {
            foreground,
            background,
            font_file: cli
                .font_file
                .clone()
                .or_else(|| env.font_file.clone())
                .or_else(|| config.font_file.clone()),
            font_index: cli.font_index.unwrap_or(config.font_index()),
            emoji_font_file,
            emoji_font_index: cli.emoji_font_index.unwrap_or(config.emoji_font_index()),
            emoji_dir: cli
                .emoji_dir
                .clone()
                .or_else(|| env.emoji_dir.clone())
                .or_else(|| config.emoji_dir.clone()),
            use_emoji_font,
            font_size: cli.font_size.unwrap_or(config.font_size()),
            output,
            animation,
            slide,
            resize,
        })
    }

    /// Encoding format, from the output extension or the stdout default.
    pub fn output_format(&self) -> Result<OutputFormat> {
        match &self.output {
            Some(path) => OutputFormat::from_path(path),
            None => Ok(OutputFormat::for_stdout(self.animation.is_some())),
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            foreground: self.foreground,
            background: self.background,
            font_size: self.font_size,
            animation: self.animation,
            resize: self.resize,
        }
    }
}

/// Validate, slide and normalize input lines.
///
/// Fails with [`Error::EmptyInput`] when every line is empty, or when the
/// slide window is larger than the input so no window could be built.
pub fn prepare_lines(lines: &[String], slide: Option<SlideWindow>) -> Result<Vec<String>> {
    if is_blank_input(lines) {
        return Err(Error::EmptyInput);
    }
    let lines = match slide {
        Some(window) => {
            let slid = window.apply(lines);
            debug!(before = lines.len(), after = slid.len(), "Applied slide window");
            slid
        }
        None => lines.to_vec(),
    };
    if is_blank_input(&lines) {
        return Err(Error::EmptyInput);
    }
    Ok(normalize_lines(&lines))
}

/// Tokenize prepared lines as one newline-joined text.
pub fn tokenize_lines(lines: &[String]) -> Result<Tokens> {
    let tokens = tokenize(&lines.join("\n"))?;
    debug!(lines = lines.len(), tokens = tokens.len(), "Tokenized input");
    Ok(tokens)
}

/// Render tokens and assemble the result.
pub fn render_tokens(
    tokens: &Tokens,
    config: &RenderConfig,
    face: &dyn Face,
    emoji: &EmojiCompositor<'_>,
) -> Assembled {
    let frames = Renderer::new(config, face, emoji).render(tokens);
    assemble(frames, config.animation)
}

/// Tokenize, render and assemble prepared lines.
pub fn render_lines(
    lines: &[String],
    config: &RenderConfig,
    face: &dyn Face,
    emoji: &EmojiCompositor<'_>,
) -> Result<Assembled> {
    let tokens = tokenize_lines(lines)?;
    Ok(render_tokens(&tokens, config, face, emoji))
}
