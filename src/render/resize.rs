//! Post-render rescaling of finished frames.

use image::imageops::{self, FilterType};
use rayon::prelude::*;

use super::Frame;

/// Requested output size. A zero dimension is derived from the other one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTarget {
    pub width: u32,
    pub height: u32,
}

impl ResizeTarget {
    /// Fixed size used for icons.
    pub const ICON: Self = Self {
        width: 128,
        height: 128,
    };

    /// `None` when neither dimension was requested.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width != 0 || height != 0).then_some(Self { width, height })
    }

    /// Concrete size for a `src_width` x `src_height` image.
    ///
    /// A zero width or height is computed from the other dimension so the
    /// aspect ratio is kept (truncating toward zero).
    pub fn resolve(&self, src_width: u32, src_height: u32) -> (u32, u32) {
        match (self.width, self.height) {
            (0, h) if src_height > 0 => {
                let ratio = f64::from(h) / f64::from(src_height);
                ((f64::from(src_width) * ratio) as u32, h)
            }
            (w, 0) if src_width > 0 => {
                let ratio = f64::from(w) / f64::from(src_width);
                (w, (f64::from(src_height) * ratio) as u32)
            }
            (w, h) => (w, h),
        }
    }
}

/// Rescale every frame to `target` with Catmull-Rom resampling.
///
/// Frames are independent, so they are resized in parallel. Empty frames and
/// targets that resolve to an empty size are left untouched.
pub fn resize_frames(frames: Vec<Frame>, target: ResizeTarget) -> Vec<Frame> {
    frames
        .into_par_iter()
        .map(|frame| {
            let (width, height) = target.resolve(frame.image.width(), frame.image.height());
            if width == 0 || height == 0 || frame.image.width() == 0 || frame.image.height() == 0
            {
                return frame;
            }
            Frame {
                image: imageops::resize(&frame.image, width, height, FilterType::CatmullRom),
                delay: frame.delay,
            }
        })
        .collect()
}
