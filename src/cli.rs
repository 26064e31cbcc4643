//! Command-line definition.
//!
//! Lives in the library so the man page generator can reuse it.

use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

#[cfg(not(feature = "release"))]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("TEXTIMG_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TEXTIMG_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "\
Examples:
  textimg $'\\x1b[31mRED\\x1b[0m' -o out.png
  echo -e '\\x1b[42mGREEN\\x1b[0m' | textimg -o out.jpg
  seq 10 | textimg -a -l 2 -o count.gif
  seq 20 | textimg -S -l 5 -W 2 -o scroll.gif
  textimg 'hello' -s -t";

/// Convert text with ANSI color escape sequences into an image.
#[derive(Debug, Parser)]
#[command(name = "textimg", version = VERSION, after_help = EXAMPLES)]
pub struct Cli {
    /// Text to render. Each argument may contain newlines. Reads standard
    /// input when omitted.
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Default foreground color: a name (black, red, ...) or R,G,B,A
    #[arg(short = 'g', long, value_name = "COLOR")]
    pub foreground: Option<String>,

    /// Default background color: a name (black, red, ...) or R,G,B,A
    #[arg(short = 'b', long, value_name = "COLOR")]
    pub background: Option<String>,

    /// Font file (TrueType, OpenType or a collection)
    #[arg(short = 'f', long = "fontfile", env = "TEXTIMG_FONT_FILE", value_name = "PATH")]
    pub font_file: Option<PathBuf>,

    /// Face index inside a font collection
    #[arg(short = 'x', long = "fontindex", value_name = "INDEX")]
    pub font_index: Option<u32>,

    /// Emoji font file
    #[arg(
        short = 'e',
        long = "emoji-fontfile",
        env = "TEXTIMG_EMOJI_FONT_FILE",
        value_name = "PATH"
    )]
    pub emoji_font_file: Option<PathBuf>,

    /// Face index inside the emoji font collection
    #[arg(short = 'X', long = "emoji-fontindex", value_name = "INDEX")]
    pub emoji_font_index: Option<u32>,

    /// Directory holding emoji_uXXXX.png images
    #[arg(long = "emoji-dir", env = "TEXTIMG_EMOJI_DIR", value_name = "DIR")]
    pub emoji_dir: Option<PathBuf>,

    /// Draw emoji with the emoji font instead of emoji images
    #[arg(short = 'i', long = "use-emoji-font")]
    pub use_emoji_font: bool,

    /// Use the Symbola font as the emoji font (implies --use-emoji-font)
    #[arg(short = 'z', long = "shellgei-emoji-fontfile")]
    pub shellgei_emoji_fontfile: bool,

    /// Font size in pixels
    #[arg(short = 'F', long = "fontsize", value_name = "SIZE")]
    pub font_size: Option<u32>,

    /// Output image path (.png, .jpg, .jpeg or .gif)
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Add a timestamp to the output file name
    #[arg(short = 't', long)]
    pub timestamp: bool,

    /// Add a number suffix when the output file already exists
    #[arg(short = 'n', long)]
    pub numbering: bool,

    /// Write to $TEXTIMG_OUTPUT_DIR (or ~/Pictures) as t.png / t.gif
    #[arg(short = 's', long = "shellgei-imagedir")]
    pub shellgei_imagedir: bool,

    /// Produce an animated GIF, one frame per --line-count lines
    #[arg(short = 'a', long)]
    pub animation: bool,

    /// Delay between animation frames in hundredths of a second
    #[arg(short = 'd', long, value_name = "DELAY")]
    pub delay: Option<u16>,

    /// Lines per animation frame
    #[arg(short = 'l', long = "line-count", value_name = "COUNT")]
    pub line_count: Option<usize>,

    /// Scroll the text upward (implies --animation)
    #[arg(short = 'S', long)]
    pub slide: bool,

    /// Lines advanced between slide frames
    #[arg(short = 'W', long = "slide-width", default_value_t = 1, value_name = "COUNT")]
    pub slide_width: usize,

    /// Wrap the slide around to the beginning
    #[arg(short = 'E', long)]
    pub forever: bool,

    /// Resize to a 128x128 icon
    #[arg(long)]
    pub icon: bool,

    /// Resize to this width (height follows the aspect ratio when unset)
    #[arg(long = "resize-width", default_value_t = 0, value_name = "PIXELS")]
    pub resize_width: u32,

    /// Resize to this height (width follows the aspect ratio when unset)
    #[arg(long = "resize-height", default_value_t = 0, value_name = "PIXELS")]
    pub resize_height: u32,

    /// Print the environment variables textimg reads and exit
    #[arg(long)]
    pub environments: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,

    /// Config file (default: <config dir>/textimg/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}
