//! Output path construction: shellgei image directory, timestamps and
//! numbered suffixes.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::error::{Error, Result};

/// Timestamp inserted by [`with_timestamp`], e.g. `2026-10-18-093005`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// First suffix tried by [`with_number_suffix`].
const FIRST_NUMBER: u32 = 2;

/// Default image path inside the shellgei image directory.
///
/// `output_dir` falls back to `~/Pictures`. The file is `t.gif` for
/// animations and `t.png` otherwise.
pub fn shellgei_image_path(output_dir: Option<&Path>, animating: bool) -> Result<PathBuf> {
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => dirs::home_dir()
            .ok_or_else(|| {
                Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Could not determine home directory",
                ))
            })?
            .join("Pictures"),
    };
    let file = if animating { "t.gif" } else { "t.png" };
    Ok(dir.join(file))
}

/// Split `path` into the part before the extension and the extension
/// including its dot (empty when there is none).
fn split_extension(path: &Path) -> (String, String) {
    let s = path.to_string_lossy();
    match path.extension() {
        Some(ext) => {
            let ext = format!(".{}", ext.to_string_lossy());
            let stem = s[..s.len() - ext.len()].to_string();
            (stem, ext)
        }
        None => (s.into_owned(), String::new()),
    }
}

/// Insert `_<timestamp>` before the extension.
///
/// `out.png` at 2026-10-18 09:30:05 becomes `out_2026-10-18-093005.png`.
pub fn with_timestamp<Tz: TimeZone>(path: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let (stem, ext) = split_extension(path);
    PathBuf::from(format!("{}_{}{}", stem, now.format(TIMESTAMP_FORMAT), ext))
}

/// Append `_2`, `_3`, ... before the extension until the path is unused.
///
/// A path that does not exist yet is returned unchanged.
pub fn with_number_suffix(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let (stem, ext) = split_extension(path);
    (FIRST_NUMBER..)
        .map(|n| PathBuf::from(format!("{}_{}{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}
