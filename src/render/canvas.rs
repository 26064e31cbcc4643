//! RGBA pixel canvas with the few drawing primitives the renderer needs.

use image::{imageops, RgbaImage};

use crate::color::Rgba;

/// A width x height RGBA pixel buffer, origin top-left.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, background.into()),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get_pixel_checked(x, y).map(|p| {
            let [r, g, b, a] = p.0;
            Rgba::new(r, g, b, a)
        })
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: Rgba) {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        let pixel = image::Rgba::from(color);
        for py in y..y_end {
            for px in x..x_end {
                self.image.put_pixel(px, py, pixel);
            }
        }
    }

    /// Composite `color` over the pixel at `(x, y)` with the given coverage.
    ///
    /// Coverage comes from glyph rasterization and is in `0.0..=1.0`.
    /// Coordinates outside the canvas are ignored.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let Some(dst) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };

        let src_alpha = coverage.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
        if src_alpha <= 0.0 {
            return;
        }
        let dst_alpha = f32::from(dst.0[3]) / 255.0;
        let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);

        let mix = |src: u8, dst: u8| -> u8 {
            if out_alpha <= 0.0 {
                return 0;
            }
            let value = (f32::from(src) * src_alpha
                + f32::from(dst) * dst_alpha * (1.0 - src_alpha))
                / out_alpha;
            value.round().clamp(0.0, 255.0) as u8
        };

        dst.0 = [
            mix(color.r, dst.0[0]),
            mix(color.g, dst.0[1]),
            mix(color.b, dst.0[2]),
            (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
        ];
    }

    /// Alpha-composite `top` with its top-left corner at `(x, y)`.
    pub fn overlay(&mut self, top: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.image, top, x, y);
    }

    /// Finish painting and hand over the pixel buffer.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
