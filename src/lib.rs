//! textimg - render text with ANSI color escape sequences as an image.
//!
//! The pipeline is: [`token::tokenize`] the input, paint the tokens with a
//! [`render::Renderer`], [`animation::assemble`] the frames and
//! [`output::encode`] them as PNG, JPEG or GIF.

pub mod animation;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod slide;
pub mod text;
pub mod token;

pub use animation::{assemble, AnimationSettings, Assembled};
pub use color::Rgba;
pub use config::{Config, EnvVars};
pub use error::{Error, Result};
pub use output::{encode, OutputFormat, OutputSink};
pub use pipeline::{prepare_lines, render_lines, render_tokens, tokenize_lines, Options};
pub use render::{Face, FontFace, RenderConfig, Renderer};
pub use slide::{slide, SlideWindow};
pub use token::{tokenize, ColorType, Token, Tokens};
