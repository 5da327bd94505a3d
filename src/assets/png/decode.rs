use crate::assets::png::chunks::{
    self, ANIM, Chunk, ChunkIter, FONT, HOTS, IDAT, IEND, IHDR, PLTE, SIGNATURE, TRNS,
};
use crate::assets::png::{DecodedPng, PngMetadata};
use crate::foundation::error::{PulpError, PulpResult};
use crate::foundation::math::premultiply_rgba;
use crate::surface::pixel_buffer::PixelBuffer;

/// Largest accepted image dimension.
pub const MAX_DIMENSION: u32 = 32767;

const GRAY: u8 = 0;
const RGB: u8 = 2;
const PALETTE: u8 = 3;
const GRAY_ALPHA: u8 = 4;
const RGBA: u8 = 6;

#[derive(Clone, Copy, Debug)]
struct Header {
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
}

impl Header {
    fn channels(&self) -> usize {
        match self.color_type {
            GRAY | PALETTE => 1,
            GRAY_ALPHA => 2,
            RGB => 3,
            _ => 4,
        }
    }

    /// Bytes per complete pixel, at least one; the distance used by the filters.
    fn filter_stride(&self) -> usize {
        (self.channels() * usize::from(self.bit_depth)).div_ceil(8)
    }

    /// Bytes per scanline, excluding the filter byte.
    fn row_bytes(&self) -> usize {
        (self.width as usize * self.channels() * usize::from(self.bit_depth)).div_ceil(8)
    }
}

fn parse_header(chunk: &Chunk<'_>) -> PulpResult<Header> {
    let d = chunk.data;
    if d.len() != 13 {
        return Err(PulpError::decode(format!("IHDR has length {}", d.len())));
    }
    let width = u32::from_be_bytes([d[0], d[1], d[2], d[3]]);
    let height = u32::from_be_bytes([d[4], d[5], d[6], d[7]]);
    let (bit_depth, color_type) = (d[8], d[9]);
    let (compression, filter, interlace) = (d[10], d[11], d[12]);

    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(PulpError::decode(format!(
            "unsupported image size {width}x{height}"
        )));
    }
    let depth_ok = match color_type {
        GRAY | RGB | GRAY_ALPHA | RGBA => bit_depth == 8,
        PALETTE => bit_depth == 4 || bit_depth == 8,
        _ => {
            return Err(PulpError::decode(format!(
                "unsupported color type {color_type}"
            )));
        }
    };
    if !depth_ok {
        return Err(PulpError::decode(format!(
            "unsupported bit depth {bit_depth} for color type {color_type}"
        )));
    }
    if compression != 0 {
        return Err(PulpError::decode(format!(
            "unsupported compression method {compression}"
        )));
    }
    if filter != 0 {
        return Err(PulpError::decode(format!("unsupported filter method {filter}")));
    }
    if interlace != 0 {
        return Err(PulpError::decode("interlaced images are not supported"));
    }
    Ok(Header {
        width,
        height,
        bit_depth,
        color_type,
    })
}

/// Transparency from a `tRNS` chunk, interpreted per color type.
#[derive(Clone, Debug, Default)]
enum Transparency {
    #[default]
    None,
    Palette(Vec<u8>),
    GrayKey(u8),
    RgbKey([u8; 3]),
}

fn parse_transparency(
    header: &Header,
    palette: Option<&[[u8; 3]]>,
    data: &[u8],
) -> PulpResult<Transparency> {
    // Keys are 16-bit samples; at depth 8 only the low byte is meaningful.
    match header.color_type {
        PALETTE => {
            let entries = palette
                .ok_or_else(|| PulpError::decode("tRNS before PLTE"))?
                .len();
            if data.len() > entries {
                return Err(PulpError::decode(format!(
                    "tRNS has {} entries for a {entries}-entry palette",
                    data.len()
                )));
            }
            Ok(Transparency::Palette(data.to_vec()))
        }
        GRAY if data.len() == 2 => Ok(Transparency::GrayKey(data[1])),
        RGB if data.len() == 6 => Ok(Transparency::RgbKey([data[1], data[3], data[5]])),
        GRAY | RGB => Err(PulpError::decode(format!(
            "invalid tRNS length {}",
            data.len()
        ))),
        _ => Err(PulpError::decode(
            "tRNS is not allowed for images with an alpha channel",
        )),
    }
}

fn parse_palette(data: &[u8]) -> PulpResult<Vec<[u8; 3]>> {
    if data.is_empty() || data.len() % 3 != 0 || data.len() > 256 * 3 {
        return Err(PulpError::decode(format!(
            "invalid PLTE length {}",
            data.len()
        )));
    }
    Ok(data.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
}

/// Decode a PNG held in memory.
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()))]
pub fn decode(bytes: &[u8]) -> PulpResult<DecodedPng> {
    if bytes.len() < SIGNATURE.len() || bytes[..SIGNATURE.len()] != SIGNATURE {
        return Err(PulpError::decode("not a PNG file"));
    }

    let mut header = None;
    let mut palette: Option<Vec<[u8; 3]>> = None;
    let mut transparency = Transparency::None;
    let mut idat: Option<&[u8]> = None;
    let mut metadata = PngMetadata::default();
    let mut ended = false;

    for chunk in ChunkIter::new(bytes) {
        let chunk = chunk?;
        if header.is_none() {
            if chunk.kind != IHDR {
                return Err(PulpError::decode(format!(
                    "first chunk is {}, expected IHDR",
                    chunk.name()
                )));
            }
            header = Some(parse_header(&chunk)?);
            continue;
        }
        let Some(h) = header.as_ref() else {
            continue;
        };
        match chunk.kind {
            IHDR => return Err(PulpError::decode("duplicate IHDR")),
            PLTE => {
                if idat.is_some() {
                    return Err(PulpError::decode("PLTE after IDAT"));
                }
                palette = Some(parse_palette(chunk.data)?);
            }
            TRNS => transparency = parse_transparency(h, palette.as_deref(), chunk.data)?,
            IDAT => {
                if idat.is_some() {
                    return Err(PulpError::decode("multiple IDAT chunks are not supported"));
                }
                idat = Some(chunk.data);
            }
            IEND => {
                ended = true;
                break;
            }
            HOTS => metadata.hotspot = Some(chunks::parse_hotspot(chunk.data)?),
            FONT => metadata.font = Some(chunks::parse_font(chunk.data)?),
            ANIM => metadata.animation = Some(chunks::parse_animation(chunk.data)?),
            _ => tracing::trace!(chunk = %chunk.name(), len = chunk.data.len(), "skipping chunk"),
        }
    }

    let header = header.ok_or_else(|| PulpError::decode("missing IHDR"))?;
    let idat = idat.ok_or_else(|| PulpError::decode("missing IDAT"))?;
    if !ended {
        return Err(PulpError::decode("missing IEND"));
    }
    if header.color_type == PALETTE && palette.is_none() {
        return Err(PulpError::decode("palette image without PLTE"));
    }

    let row_bytes = header.row_bytes();
    let expected = (row_bytes + 1) * header.height as usize;
    // One spare byte so an overlong stream is reported as such rather than cut to size.
    let raw = miniz_oxide::inflate::decompress_to_vec_zlib_with_limit(idat, expected + 1)
        .map_err(|e| PulpError::decode(format!("corrupt zlib stream: {:?}", e.status)))?;
    if raw.len() != expected {
        return Err(PulpError::decode(format!(
            "image data is {} bytes, expected {expected}",
            raw.len()
        )));
    }

    let samples = unfilter(&raw, row_bytes, header.height as usize, header.filter_stride())?;
    let pixels = to_argb(&header, &samples, palette.as_deref(), &transparency)?;
    let image = PixelBuffer::from_pixels(header.width, header.height, pixels)?;
    tracing::debug!(
        width = header.width,
        height = header.height,
        color_type = header.color_type,
        opaque = image.is_opaque(),
        "decoded png"
    );
    Ok(DecodedPng { image, metadata })
}

fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = i16::from(a) + i16::from(b) - i16::from(c);
    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Reverse per-row filtering. `raw` holds `height` rows of one filter byte plus `stride` bytes.
fn unfilter(raw: &[u8], stride: usize, height: usize, bpp: usize) -> PulpResult<Vec<u8>> {
    let mut out = vec![0u8; stride * height];
    for y in 0..height {
        let filter = raw[y * (stride + 1)];
        let src = &raw[y * (stride + 1) + 1..(y + 1) * (stride + 1)];
        let (done, rest) = out.split_at_mut(y * stride);
        let prev = if y > 0 { Some(&done[(y - 1) * stride..]) } else { None };
        let row = &mut rest[..stride];

        for x in 0..stride {
            let a = if x >= bpp { row[x - bpp] } else { 0 };
            let b = prev.map_or(0, |p| p[x]);
            let c = match prev {
                Some(p) if x >= bpp => p[x - bpp],
                _ => 0,
            };
            row[x] = match filter {
                0 => src[x],
                1 => src[x].wrapping_add(a),
                2 => src[x].wrapping_add(b),
                3 => src[x].wrapping_add(((u16::from(a) + u16::from(b)) / 2) as u8),
                4 => src[x].wrapping_add(paeth(a, b, c)),
                other => {
                    return Err(PulpError::decode(format!(
                        "illegal filter type {other} on row {y}"
                    )));
                }
            };
        }
    }
    Ok(out)
}

fn to_argb(
    header: &Header,
    samples: &[u8],
    palette: Option<&[[u8; 3]]>,
    transparency: &Transparency,
) -> PulpResult<Vec<u32>> {
    let width = header.width as usize;
    let row_bytes = header.row_bytes();
    let mut out = Vec::with_capacity(width * header.height as usize);

    for row in samples.chunks_exact(row_bytes) {
        match header.color_type {
            GRAY => out.extend(row.iter().map(|&g| {
                let a = match transparency {
                    Transparency::GrayKey(k) if *k == g => 0,
                    _ => 0xff,
                };
                premultiply_rgba(g, g, g, a)
            })),
            GRAY_ALPHA => out.extend(
                row.chunks_exact(2)
                    .map(|p| premultiply_rgba(p[0], p[0], p[0], p[1])),
            ),
            RGB => out.extend(row.chunks_exact(3).map(|p| {
                let a = match transparency {
                    Transparency::RgbKey(k) if k[..] == p[..] => 0,
                    _ => 0xff,
                };
                premultiply_rgba(p[0], p[1], p[2], a)
            })),
            RGBA => out.extend(
                row.chunks_exact(4)
                    .map(|p| premultiply_rgba(p[0], p[1], p[2], p[3])),
            ),
            _ => {
                let palette = palette.unwrap_or_default();
                let alphas = match transparency {
                    Transparency::Palette(a) => a.as_slice(),
                    _ => &[],
                };
                for x in 0..width {
                    let index = if header.bit_depth == 4 {
                        // High nibble first.
                        let byte = row[x / 2];
                        usize::from(if x % 2 == 0 { byte >> 4 } else { byte & 0x0f })
                    } else {
                        usize::from(row[x])
                    };
                    let [r, g, b] = *palette.get(index).ok_or_else(|| {
                        PulpError::decode(format!(
                            "palette index {index} out of range ({} entries)",
                            palette.len()
                        ))
                    })?;
                    let a = alphas.get(index).copied().unwrap_or(0xff);
                    out.push(premultiply_rgba(r, g, b, a));
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/unit/assets/png/decode.rs"]
mod tests;
