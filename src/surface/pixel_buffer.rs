use crate::composite::BlendMode;
use crate::foundation::error::{PulpError, PulpResult};
use crate::foundation::math::{self, OPAQUE_BLACK};
use crate::render::graphics::Graphics;
use crate::surface::clip::IntRect;

/// Rectangular premultiplied-ARGB pixel array.
///
/// Row-major, origin top-left, `stride == width`. When `opaque` is set every alpha byte is
/// `0xff`; compositors rely on that to skip destination alpha math.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
    opaque: bool,
}

impl PixelBuffer {
    /// Blank canvas: opaque black when `opaque`, fully transparent otherwise.
    pub fn new(width: u32, height: u32, opaque: bool) -> Self {
        let len = (width as usize).saturating_mul(height as usize);
        let fill = if opaque { OPAQUE_BLACK } else { 0 };
        Self {
            width,
            height,
            pixels: vec![fill; len],
            opaque,
        }
    }

    /// Canvas filled with a straight-alpha ARGB color.
    pub fn filled(width: u32, height: u32, argb: u32) -> Self {
        let opaque = math::alpha(argb) == 0xff;
        let mut out = Self::new(width, height, opaque);
        out.pixels.fill(math::premultiply(argb));
        out
    }

    /// Wrap premultiplied pixels; opacity is detected from the data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u32>) -> PulpResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| PulpError::validation("pixel buffer size overflow"))?;
        if pixels.len() != expected {
            return Err(PulpError::validation(format!(
                "expected {expected} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        let mut out = Self {
            width,
            height,
            pixels,
            opaque: false,
        };
        out.recompute_opaque();
        Ok(out)
    }

    /// A small, clearly visible stand-in for images that failed to decode.
    pub fn broken() -> Self {
        const SIZE: u32 = 16;
        let mut out = Self::new(SIZE, SIZE, true);
        for y in 0..SIZE {
            for x in 0..SIZE {
                let edge = x == 0 || y == 0 || x == SIZE - 1 || y == SIZE - 1;
                let cross = x == y || x + y == SIZE - 1;
                let c = if edge || cross { 0xffff_0000 } else { 0xffff_ffff };
                out.pixels[(y * SIZE + x) as usize] = c;
            }
        }
        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> IntRect {
        IntRect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Direct pixel access. Writing non-opaque pixels into an opaque buffer must be followed by
    /// [`PixelBuffer::recompute_opaque`].
    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn into_pixels(self) -> Vec<u32> {
        self.pixels
    }

    /// Rescan the pixels and update the opacity flag.
    pub fn recompute_opaque(&mut self) -> bool {
        self.opaque = self.pixels.iter().all(|&p| math::alpha(p) == 0xff);
        self.opaque
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Straight-alpha ARGB at `(x, y)`.
    pub fn argb(&self, x: u32, y: u32) -> Option<u32> {
        self.pixel(x, y).map(math::unpremultiply)
    }

    /// Store a premultiplied pixel. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, premul: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        if math::alpha(premul) != 0xff {
            self.opaque = false;
        }
        self.pixels[(y * self.width + x) as usize] = premul;
    }

    /// Overwrite every pixel with a straight-alpha ARGB color.
    pub fn fill(&mut self, argb: u32) {
        let p = math::premultiply(argb);
        self.pixels.fill(p);
        self.opaque = math::alpha(p) == 0xff;
    }

    /// Copy a sub-rectangle into a new buffer.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> PulpResult<PixelBuffer> {
        let fits_x = x.checked_add(width).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(height).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(PulpError::validation(format!(
                "crop ({x}, {y}, {width}, {height}) outside {}x{} image",
                self.width, self.height
            )));
        }
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
        for row in y..y + height {
            let start = (row * self.width + x) as usize;
            pixels.extend_from_slice(&self.pixels[start..start + width as usize]);
        }
        let mut out = PixelBuffer {
            width,
            height,
            pixels,
            opaque: self.opaque,
        };
        // A translucent image can still have fully opaque regions.
        if !out.opaque {
            out.recompute_opaque();
        }
        Ok(out)
    }

    /// Resample into a new buffer of the given size using bilinear filtering.
    pub fn scaled(&self, width: u32, height: u32) -> PixelBuffer {
        let mut out = PixelBuffer::new(width, height, self.opaque);
        if width == 0 || height == 0 || self.width == 0 || self.height == 0 {
            return out;
        }
        {
            let mut g = Graphics::new(&mut out);
            g.set_blend_mode(BlendMode::src());
            g.set_bilinear(true);
            g.set_edge_clamp(crate::composite::EdgeClamp::ALL);
            g.draw_scaled_image(self, 0.0, 0.0, f64::from(width), f64::from(height));
        }
        out
    }

    /// Drawing surface over this buffer.
    pub fn graphics(&mut self) -> Graphics<'_> {
        Graphics::new(self)
    }

    /// Straight-alpha RGBA copy for interop with the `image` ecosystem.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut raw = Vec::with_capacity(self.pixels.len() * 4);
        for &p in &self.pixels {
            let s = math::unpremultiply(p);
            raw.extend_from_slice(&[
                math::red(s) as u8,
                math::green(s) as u8,
                math::blue(s) as u8,
                math::alpha(s) as u8,
            ]);
        }
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    pub fn from_rgba_image(img: &image::RgbaImage) -> PixelBuffer {
        let (width, height) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| math::premultiply_rgba(p[0], p[1], p[2], p[3]))
            .collect::<Vec<_>>();
        let mut out = PixelBuffer {
            width,
            height,
            pixels,
            opaque: false,
        };
        out.recompute_opaque();
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/pixel_buffer.rs"]
mod tests;
