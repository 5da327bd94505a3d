//! Reader and writer for the PNG profile used by game assets.
//!
//! Supported input: 8-bit gray, gray+alpha, RGB and RGBA, plus 4- and 8-bit palette images with
//! optional `tRNS`. Interlaced images, other bit depths and split `IDAT` streams are rejected.
//! Output is always 8-bit RGB or RGBA. The private `hoTS`, `foNt` and `anIm` chunks carry a
//! hotspot, bitmap font metrics and animation sequencing; they are surfaced as [`PngMetadata`].

mod chunks;
mod decode;
mod encode;

use std::path::Path;

use anyhow::Context;

use crate::assets::animated::AnimationInfo;
use crate::font::FontMetrics;
use crate::foundation::error::PulpResult;
use crate::surface::pixel_buffer::PixelBuffer;

pub use chunks::Hotspot;
pub use decode::{MAX_DIMENSION, decode};
pub use encode::encode;

/// Engine metadata carried in private chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PngMetadata {
    pub hotspot: Option<Hotspot>,
    pub font: Option<FontMetrics>,
    pub animation: Option<AnimationInfo>,
}

impl PngMetadata {
    pub fn is_empty(&self) -> bool {
        self.hotspot.is_none() && self.font.is_none() && self.animation.is_none()
    }
}

/// A decoded image and whatever metadata accompanied it.
#[derive(Clone, Debug)]
pub struct DecodedPng {
    pub image: PixelBuffer,
    pub metadata: PngMetadata,
}

/// Read and decode a PNG file.
pub fn read_file(path: impl AsRef<Path>) -> PulpResult<DecodedPng> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).with_context(|| format!("read png '{}'", path.display()))?;
    decode(&bytes)
}

/// Encode and write a PNG file.
pub fn write_file(
    path: impl AsRef<Path>,
    image: &PixelBuffer,
    metadata: &PngMetadata,
) -> PulpResult<()> {
    let path = path.as_ref();
    let bytes = encode(image, metadata)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
