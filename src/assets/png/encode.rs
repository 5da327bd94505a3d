use crate::assets::png::PngMetadata;
use crate::assets::png::chunks::{self, ANIM, FONT, HOTS, IDAT, IEND, IHDR, SIGNATURE};
use crate::foundation::error::{PulpError, PulpResult};
use crate::foundation::math::{alpha, blue, green, red, unpremultiply};
use crate::surface::pixel_buffer::PixelBuffer;

/// zlib level used for `IDAT`.
const COMPRESSION_LEVEL: u8 = 6;

/// Encode `image` as 8-bit RGB (opaque buffers) or RGBA, with optional private chunks.
#[tracing::instrument(level = "debug", skip_all, fields(width = image.width(), height = image.height()))]
pub fn encode(image: &PixelBuffer, metadata: &PngMetadata) -> PulpResult<Vec<u8>> {
    if image.width() == 0 || image.height() == 0 {
        return Err(PulpError::encode(format!(
            "cannot encode an empty {}x{} image",
            image.width(),
            image.height()
        )));
    }
    if let Some(font) = &metadata.font {
        font.validate(image.width())
            .map_err(|e| PulpError::encode(format!("font metrics: {e}")))?;
    }
    if let Some(anim) = &metadata.animation {
        anim.validate(image.width(), image.height())
            .map_err(|e| PulpError::encode(format!("animation: {e}")))?;
    }

    let opaque = image.is_opaque();
    let channels = if opaque { 3 } else { 4 };
    let width = image.width() as usize;
    let mut raw = Vec::with_capacity((width * channels + 1) * image.height() as usize);
    for row in image.pixels().chunks_exact(width) {
        raw.push(0);
        for &px in row {
            let px = if opaque { px } else { unpremultiply(px) };
            raw.extend_from_slice(&[red(px) as u8, green(px) as u8, blue(px) as u8]);
            if !opaque {
                raw.push(alpha(px) as u8);
            }
        }
    }
    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, COMPRESSION_LEVEL);

    let mut out = Vec::with_capacity(compressed.len() + 128);
    out.extend_from_slice(&SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&image.width().to_be_bytes());
    ihdr.extend_from_slice(&image.height().to_be_bytes());
    ihdr.extend_from_slice(&[8, if opaque { 2 } else { 6 }, 0, 0, 0]);
    chunks::write_chunk(&mut out, &IHDR, &ihdr)?;

    if let Some(h) = &metadata.hotspot {
        chunks::write_chunk(&mut out, &HOTS, &chunks::write_hotspot(h))?;
    }
    if let Some(font) = &metadata.font {
        chunks::write_chunk(&mut out, &FONT, &chunks::write_font(font))?;
    }
    if let Some(anim) = &metadata.animation {
        chunks::write_chunk(&mut out, &ANIM, &chunks::write_animation(anim)?)?;
    }

    chunks::write_chunk(&mut out, &IDAT, &compressed)?;
    chunks::write_chunk(&mut out, &IEND, &[])?;
    tracing::debug!(bytes = out.len(), opaque, "encoded png");
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/unit/assets/png/encode.rs"]
mod tests;
