//! Error types for the text-to-image pipeline.

use std::path::PathBuf;

/// Errors that abort a render.
///
/// Missing font or emoji assets are not represented here: they are logged
/// and replaced with a substitute instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Illegal extended color sequence: {sequence}")]
    Parse { sequence: String },

    #[error("Illegal color format: {0} (use a color name or R,G,B,A)")]
    ColorFormat(String),

    #[error("'{0}' is not a supported output format (use .png, .jpg, .jpeg or .gif)")]
    UnsupportedOutputFormat(String),

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Image data not written to a terminal. Use -o, -s, a pipe or a redirect.")]
    NoOutputTarget,

    #[error("Failed to load font {path}: {message}")]
    FontLoad { path: PathBuf, message: String },

    #[error("Invalid config file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
