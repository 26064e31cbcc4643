//! Render handler: reads text and writes the image.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use chrono::Local;
use tracing::debug;

use textimg::cli::Cli;
use textimg::output::{encode, OutputSink};
use textimg::render::{load_emoji_face, load_face, EmojiCompositor, Face};
use textimg::text::split_lines;
use textimg::{prepare_lines, render_tokens, tokenize_lines, Config, EnvVars, Options};

/// Run the full pipeline for `cli`.
pub fn handle(cli: Cli) -> Result<()> {
    let env = EnvVars::from_env();
    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    let options = Options::resolve(&cli, &env, &config, &Local::now())?;
    debug!(?options, "Resolved options");

    let input = if cli.texts.is_empty() {
        read_stdin().context("Failed to read standard input")?
    } else {
        split_lines(&cli.texts)
    };
    let lines = prepare_lines(&input, options.slide)?;

    // Everything that can reject the input runs before the output is created.
    let format = options.output_format()?;
    let tokens = tokenize_lines(&lines)?;

    let face = load_face(options.font_file.as_deref(), options.font_index, options.font_size as f32)?;
    let emoji_face = load_emoji_face(
        options.emoji_font_file.as_deref(),
        options.emoji_font_index,
        options.font_size as f32,
    )?;
    let compositor = EmojiCompositor::new(
        options.emoji_dir.clone(),
        emoji_face.as_ref().map(|f| f as &dyn Face),
        options.use_emoji_font,
    );

    let mut sink = OutputSink::open(options.output.as_deref()).with_context(|| match &options.output {
        Some(path) => format!("Failed to open output {}", path.display()),
        None => "Failed to open standard output".to_string(),
    })?;
    let image = render_tokens(&tokens, &options.render_config(), &face, &compositor);
    encode(&mut sink, format, &image)?;
    sink.finish().context("Failed to write image")?;

    if let Some(path) = &options.output {
        debug!(path = %path.display(), "Wrote image");
    }
    Ok(())
}

/// Read every line of standard input, without line terminators.
fn read_stdin() -> io::Result<Vec<String>> {
    io::stdin().lock().lines().collect()
}
