//! Animation assembly: turns rendered frames into an encodable image.

use image::RgbaImage;
use tracing::debug;

use crate::render::FrameSet;

/// Frame grouping for animated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSettings {
    /// Text lines per frame. Never zero.
    pub line_count: usize,
    /// Delay between frames in hundredths of a second.
    pub delay: u16,
}

impl AnimationSettings {
    /// A `line_count` of 0 is treated as 1.
    pub fn new(line_count: usize, delay: u16) -> Self {
        Self {
            line_count: line_count.max(1),
            delay,
        }
    }
}

/// The final image handed to the encoder.
#[derive(Debug, Clone)]
pub enum Assembled {
    Still(RgbaImage),
    Animated(FrameSet),
}

impl Assembled {
    /// The image shown first (the only one for still output).
    pub fn first_image(&self) -> &RgbaImage {
        match self {
            Self::Still(image) => image,
            Self::Animated(frames) => &frames.first().image,
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            Self::Still(_) => 1,
            Self::Animated(frames) => frames.len(),
        }
    }

    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }
}

/// Pass a still frame through, or pair every frame with the configured delay.
pub fn assemble(frames: FrameSet, animation: Option<AnimationSettings>) -> Assembled {
    match animation {
        None => Assembled::Still(frames.into_first().image),
        Some(settings) => {
            debug!(frames = frames.len(), delay = settings.delay, "Assembled animation");
            Assembled::Animated(frames.with_delay(settings.delay))
        }
    }
}
