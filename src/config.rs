//! Persistent defaults (TOML) and environment variables.
//!
//! Values resolve as: command line, then environment, then the config file,
//! then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_FOREGROUND: &str = "white";
pub const DEFAULT_BACKGROUND: &str = "black";
pub const DEFAULT_FONT_SIZE: u32 = 20;
pub const DEFAULT_DELAY: u16 = 20;
pub const DEFAULT_LINE_COUNT: usize = 1;

/// Emoji font used by `--shellgei-emoji-fontfile`.
pub const SHELLGEI_EMOJI_FONT: &str = "/usr/share/fonts/truetype/ancient-scripts/Symbola_hint.ttf";

pub const ENV_OUTPUT_DIR: &str = "TEXTIMG_OUTPUT_DIR";
pub const ENV_FONT_FILE: &str = "TEXTIMG_FONT_FILE";
pub const ENV_EMOJI_DIR: &str = "TEXTIMG_EMOJI_DIR";
pub const ENV_EMOJI_FONT_FILE: &str = "TEXTIMG_EMOJI_FONT_FILE";

/// Defaults read from `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub font_file: Option<PathBuf>,
    pub font_index: Option<u32>,
    pub emoji_font_file: Option<PathBuf>,
    pub emoji_font_index: Option<u32>,
    pub emoji_dir: Option<PathBuf>,
    pub font_size: Option<u32>,
    pub delay: Option<u16>,
    pub line_count: Option<usize>,
}

impl Config {
    /// `<config_dir>/textimg/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;
        Ok(dir.join("textimg").join("config.toml"))
    }

    /// Load the config from `explicit`, or from [`Config::config_path`].
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Ok(path) => path,
                Err(_) => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    /// Load the config at `path`, defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    pub fn foreground(&self) -> &str {
        self.foreground.as_deref().unwrap_or(DEFAULT_FOREGROUND)
    }

    pub fn background(&self) -> &str {
        self.background.as_deref().unwrap_or(DEFAULT_BACKGROUND)
    }

    pub fn font_index(&self) -> u32 {
        self.font_index.unwrap_or(0)
    }

    pub fn emoji_font_index(&self) -> u32 {
        self.emoji_font_index.unwrap_or(0)
    }

    pub fn font_size(&self) -> u32 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn delay(&self) -> u16 {
        self.delay.unwrap_or(DEFAULT_DELAY)
    }

    pub fn line_count(&self) -> usize {
        self.line_count.unwrap_or(DEFAULT_LINE_COUNT)
    }
}

/// The environment variables this tool reads, captured once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    pub output_dir: Option<PathBuf>,
    pub font_file: Option<PathBuf>,
    pub emoji_dir: Option<PathBuf>,
    pub emoji_font_file: Option<PathBuf>,
}

impl EnvVars {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self {
            output_dir: get(ENV_OUTPUT_DIR),
            font_file: get(ENV_FONT_FILE),
            emoji_dir: get(ENV_EMOJI_DIR),
            emoji_font_file: get(ENV_EMOJI_FONT_FILE),
        }
    }

    /// `NAME=value` lines, one per variable, in a fixed order.
    pub fn lines(&self) -> Vec<String> {
        let show = |v: &Option<PathBuf>| {
            v.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        };
        vec![
            format!("{}={}", ENV_OUTPUT_DIR, show(&self.output_dir)),
            format!("{}={}", ENV_FONT_FILE, show(&self.font_file)),
            format!("{}={}", ENV_EMOJI_DIR, show(&self.emoji_dir)),
            format!("{}={}", ENV_EMOJI_FONT_FILE, show(&self.emoji_font_file)),
        ]
    }
}
