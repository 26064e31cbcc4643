//! Image encoding and output destinations.

pub mod path;
pub mod sink;

use std::io::Write;
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{Delay, DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use tracing::{debug, warn};

use crate::animation::Assembled;
use crate::error::{Error, Result};

pub use sink::OutputSink;

/// JPEG quality used for `.jpg` output.
const JPEG_QUALITY: u8 = 75;

/// NeuQuant sampling speed for GIF palettes (1 is slowest, 30 fastest).
const GIF_SPEED: i32 = 10;

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
}

impl OutputFormat {
    /// Format for a file extension such as `".png"` (case-insensitive,
    /// leading dot optional).
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = ext.trim_start_matches('.').to_ascii_lowercase();
        match normalized.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "gif" => Ok(Self::Gif),
            _ => Err(Error::UnsupportedOutputFormat(ext.to_string())),
        }
    }

    /// Format for an output path, chosen by its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        Self::from_extension(&ext)
    }

    /// Format used when writing to standard output.
    pub fn for_stdout(animating: bool) -> Self {
        if animating {
            Self::Gif
        } else {
            Self::Png
        }
    }

    pub fn supports_animation(self) -> bool {
        self == Self::Gif
    }
}

/// Encode `image` as `format` into `writer`.
///
/// PNG and JPEG hold a single image, so an animation written to them keeps
/// only its first frame. GIF animations loop forever.
pub fn encode<W: Write>(writer: &mut W, format: OutputFormat, image: &Assembled) -> Result<()> {
    if image.is_animated() && !format.supports_animation() {
        warn!(
            "{:?} output cannot hold an animation, writing the first frame only",
            format
        );
    }
    debug!(?format, frames = image.frame_count(), "Encoding");

    match format {
        OutputFormat::Png => encode_png(writer, image.first_image()),
        OutputFormat::Jpeg => encode_jpeg(writer, image.first_image()),
        OutputFormat::Gif => encode_gif(writer, image),
    }
}

fn encode_png<W: Write>(writer: &mut W, image: &RgbaImage) -> Result<()> {
    PngEncoder::new(writer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(())
}

fn encode_jpeg<W: Write>(writer: &mut W, image: &RgbaImage) -> Result<()> {
    let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
    JpegEncoder::new_with_quality(writer, JPEG_QUALITY).write_image(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

fn encode_gif<W: Write>(writer: &mut W, image: &Assembled) -> Result<()> {
    let mut encoder = GifEncoder::new_with_speed(writer, GIF_SPEED);
    match image {
        Assembled::Still(still) => {
            encoder.encode_frame(image::Frame::new(still.clone()))?;
        }
        Assembled::Animated(frames) => {
            encoder.set_repeat(Repeat::Infinite)?;
            encoder.encode_frames(frames.frames().iter().map(|frame| {
                let delay = Delay::from_numer_denom_ms(u32::from(frame.delay) * 10, 1);
                image::Frame::from_parts(frame.image.clone(), 0, 0, delay)
            }))?;
        }
    }
    Ok(())
}
