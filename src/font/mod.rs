//! Bitmap fonts: every glyph lives side by side in one image strip.
//!
//! Glyph placement comes from [`FontMetrics`], usually read from the `foNt` chunk of the font's
//! PNG. Advances are the glyph width plus kerning, where kerning is the font's tracking plus the
//! right bearing of the left glyph and the left bearing of the right glyph.

use crate::assets::png;
use crate::foundation::error::{PulpError, PulpResult};
use crate::surface::clip::IntRect;
use crate::surface::pixel_buffer::PixelBuffer;

/// Glyph table for a contiguous character range.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FontMetrics {
    pub first_char: u16,
    pub last_char: u16,
    /// Extra spacing between every pair of glyphs, in pixels.
    pub tracking: i16,
    /// Glyph x positions in the image: glyph `i` spans `positions[i]..positions[i + 1]`.
    pub positions: Vec<u16>,
    /// Optional `(left, right)` bearing per glyph.
    pub bearings: Option<Vec<(i16, i16)>>,
}

impl FontMetrics {
    pub fn glyph_count(&self) -> usize {
        usize::from(self.last_char.saturating_sub(self.first_char)) + 1
    }

    /// Check the table against a font image of the given width.
    pub fn validate(&self, image_width: u32) -> PulpResult<()> {
        if self.last_char < self.first_char {
            return Err(PulpError::validation(format!(
                "font range {}..={} is empty",
                self.first_char, self.last_char
            )));
        }
        let n = self.glyph_count();
        if self.positions.len() != n + 1 {
            return Err(PulpError::validation(format!(
                "font has {n} glyphs but {} positions",
                self.positions.len()
            )));
        }
        if self.positions.windows(2).any(|w| w[1] < w[0]) {
            return Err(PulpError::validation("font glyph positions decrease"));
        }
        if self.positions.last().is_some_and(|&p| u32::from(p) > image_width) {
            return Err(PulpError::validation(format!(
                "font glyphs extend past image width {image_width}"
            )));
        }
        if let Some(b) = &self.bearings
            && b.len() != n
        {
            return Err(PulpError::validation(format!(
                "font has {n} glyphs but {} bearings",
                b.len()
            )));
        }
        Ok(())
    }
}

/// One placed glyph: its index in the font and its x offset from the string origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacedGlyph {
    pub index: usize,
    pub x: i32,
}

/// Bitmap font backed by a premultiplied glyph strip.
#[derive(Clone, Debug)]
pub struct CoreFont {
    image: PixelBuffer,
    metrics: FontMetrics,
}

impl CoreFont {
    pub fn new(image: PixelBuffer, metrics: FontMetrics) -> PulpResult<Self> {
        metrics.validate(image.width())?;
        Ok(Self { image, metrics })
    }

    /// Decode a font PNG carrying a `foNt` chunk.
    pub fn from_png(bytes: &[u8]) -> PulpResult<Self> {
        let decoded = png::decode(bytes)?;
        let metrics = decoded
            .metadata
            .font
            .ok_or_else(|| PulpError::decode("font PNG has no foNt chunk"))?;
        Self::new(decoded.image, metrics)
    }

    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn height(&self) -> i32 {
        self.image.height() as i32
    }

    fn index_of(&self, c: char) -> Option<usize> {
        let code = u32::from(c);
        let first = u32::from(self.metrics.first_char);
        let last = u32::from(self.metrics.last_char);
        (first..=last)
            .contains(&code)
            .then(|| (code - first) as usize)
    }

    /// `true` when `c` has its own glyph (no fallback).
    pub fn has_glyph(&self, c: char) -> bool {
        self.index_of(c).is_some()
    }

    /// Glyph used to render `c`. Missing letters fall back to the other case, anything else to
    /// the space glyph; `None` means the character is skipped.
    pub fn glyph_index(&self, c: char) -> Option<usize> {
        if let Some(i) = self.index_of(c) {
            return Some(i);
        }
        let swapped = if c.is_ascii_lowercase() {
            Some(c.to_ascii_uppercase())
        } else if c.is_ascii_uppercase() {
            Some(c.to_ascii_lowercase())
        } else {
            None
        };
        swapped
            .and_then(|s| self.index_of(s))
            .or_else(|| if c == ' ' { None } else { self.index_of(' ') })
    }

    /// Source rectangle of a glyph in the font image.
    pub fn glyph_bounds(&self, index: usize) -> IntRect {
        let x0 = i32::from(self.metrics.positions[index]);
        let x1 = i32::from(self.metrics.positions[index + 1]);
        IntRect::new(x0, 0, x1 - x0, self.height())
    }

    pub fn glyph_width(&self, index: usize) -> i32 {
        self.glyph_bounds(index).width
    }

    /// Spacing inserted between glyph `left` and glyph `right`.
    pub fn kerning(&self, left: usize, right: usize) -> i32 {
        let tracking = i32::from(self.metrics.tracking);
        match &self.metrics.bearings {
            Some(b) => tracking + i32::from(b[left].1) + i32::from(b[right].0),
            None => tracking,
        }
    }

    pub fn char_width(&self, c: char) -> i32 {
        self.glyph_index(c).map_or(0, |i| self.glyph_width(i))
    }

    /// Place every renderable character of `text`; also returns the total advance.
    pub fn layout(&self, text: &str) -> (Vec<PlacedGlyph>, i32) {
        let mut glyphs = Vec::with_capacity(text.len());
        let mut x = 0;
        let mut prev = None;
        for c in text.chars() {
            let Some(index) = self.glyph_index(c) else {
                continue;
            };
            if let Some(p) = prev {
                x += self.kerning(p, index);
            }
            glyphs.push(PlacedGlyph { index, x });
            x += self.glyph_width(index);
            prev = Some(index);
        }
        (glyphs, x)
    }

    pub fn string_width(&self, text: &str) -> i32 {
        self.layout(text).1
    }
}

#[cfg(test)]
#[path = "../../tests/unit/font/mod.rs"]
mod tests;
