//! Chunk framing plus the engine-private metadata chunks.
//!
//! Private chunk payloads are big endian:
//!
//! - `hoTS`: `x: i32, y: i32`
//! - `foNt`: `first: u16, last: u16, tracking: i16, has_bearing: u8`, then `last - first + 2`
//!   glyph positions (`u16`), then one `(left: i16, right: i16)` pair per glyph if `has_bearing`
//! - `anIm`: `across: u16, down: u16, looping: u8, count: u16`, then `count` frame indices
//!   (`u16`) and `count` durations in milliseconds (`u16`)

use crate::assets::animated::AnimationInfo;
use crate::font::FontMetrics;
use crate::foundation::error::{PulpError, PulpResult};

pub(crate) const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

pub(crate) const IHDR: [u8; 4] = *b"IHDR";
pub(crate) const PLTE: [u8; 4] = *b"PLTE";
pub(crate) const TRNS: [u8; 4] = *b"tRNS";
pub(crate) const IDAT: [u8; 4] = *b"IDAT";
pub(crate) const IEND: [u8; 4] = *b"IEND";
pub(crate) const HOTS: [u8; 4] = *b"hoTS";
pub(crate) const FONT: [u8; 4] = *b"foNt";
pub(crate) const ANIM: [u8; 4] = *b"anIm";

/// Image anchor point, relative to the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hotspot {
    pub x: i32,
    pub y: i32,
}

pub(crate) struct Chunk<'a> {
    pub(crate) kind: [u8; 4],
    pub(crate) data: &'a [u8],
}

impl Chunk<'_> {
    pub(crate) fn name(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }
}

/// Iterates chunks after the signature, verifying each CRC.
pub(crate) struct ChunkIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ChunkIter<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: SIGNATURE.len(),
        }
    }
}

fn crc(kind: &[u8; 4], data: &[u8]) -> u32 {
    let mut h = crc32fast::Hasher::new();
    h.update(kind);
    h.update(data);
    h.finalize()
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = PulpResult<Chunk<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.data.get(self.pos..)?;
        if rest.is_empty() {
            return None;
        }
        if rest.len() < 12 {
            self.pos = self.data.len();
            return Some(Err(PulpError::decode("truncated chunk header")));
        }
        let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        let kind = [rest[4], rest[5], rest[6], rest[7]];
        let Some(end) = len.checked_add(12).filter(|&e| e <= rest.len()) else {
            self.pos = self.data.len();
            return Some(Err(PulpError::decode(format!(
                "chunk {} overruns the file",
                String::from_utf8_lossy(&kind)
            ))));
        };
        let data = &rest[8..8 + len];
        let stored = u32::from_be_bytes([rest[8 + len], rest[9 + len], rest[10 + len], rest[11 + len]]);
        self.pos += end;
        if stored != crc(&kind, data) {
            self.pos = self.data.len();
            return Some(Err(PulpError::decode(format!(
                "CRC mismatch in chunk {}",
                String::from_utf8_lossy(&kind)
            ))));
        }
        Some(Ok(Chunk { kind, data }))
    }
}

/// Append a framed chunk (length, type, data, CRC).
pub(crate) fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> PulpResult<()> {
    let len = u32::try_from(data.len())
        .map_err(|_| PulpError::encode(format!("chunk {} too large", String::from_utf8_lossy(kind))))?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&crc(kind, data).to_be_bytes());
    Ok(())
}

/// Big-endian cursor over a chunk payload.
struct Reader<'a> {
    chunk: &'static str,
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(chunk: &'static str, data: &'a [u8]) -> Self {
        Self {
            chunk,
            data,
            pos: 0,
        }
    }

    fn take<const N: usize>(&mut self) -> PulpResult<[u8; N]> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or_else(|| PulpError::decode(format!("truncated {} chunk", self.chunk)))?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn u8(&mut self) -> PulpResult<u8> {
        Ok(self.take::<1>()?[0])
    }

    fn u16(&mut self) -> PulpResult<u16> {
        Ok(u16::from_be_bytes(self.take()?))
    }

    fn i16(&mut self) -> PulpResult<i16> {
        Ok(i16::from_be_bytes(self.take()?))
    }

    fn i32(&mut self) -> PulpResult<i32> {
        Ok(i32::from_be_bytes(self.take()?))
    }
}

pub(crate) fn parse_hotspot(data: &[u8]) -> PulpResult<Hotspot> {
    let mut r = Reader::new("hoTS", data);
    Ok(Hotspot {
        x: r.i32()?,
        y: r.i32()?,
    })
}

pub(crate) fn write_hotspot(h: &Hotspot) -> Vec<u8> {
    let mut out = Vec::with_capacity(8);
    out.extend_from_slice(&h.x.to_be_bytes());
    out.extend_from_slice(&h.y.to_be_bytes());
    out
}

pub(crate) fn parse_font(data: &[u8]) -> PulpResult<FontMetrics> {
    let mut r = Reader::new("foNt", data);
    let first_char = r.u16()?;
    let last_char = r.u16()?;
    let tracking = r.i16()?;
    let has_bearing = r.u8()? != 0;
    if last_char < first_char {
        return Err(PulpError::decode(format!(
            "foNt range {first_char}..={last_char} is empty"
        )));
    }
    let n = usize::from(last_char - first_char) + 1;
    let positions = (0..=n).map(|_| r.u16()).collect::<PulpResult<Vec<_>>>()?;
    let bearings = if has_bearing {
        Some(
            (0..n)
                .map(|_| Ok((r.i16()?, r.i16()?)))
                .collect::<PulpResult<Vec<_>>>()?,
        )
    } else {
        None
    };
    Ok(FontMetrics {
        first_char,
        last_char,
        tracking,
        positions,
        bearings,
    })
}

pub(crate) fn write_font(m: &FontMetrics) -> Vec<u8> {
    let mut out = Vec::with_capacity(7 + m.positions.len() * 2);
    out.extend_from_slice(&m.first_char.to_be_bytes());
    out.extend_from_slice(&m.last_char.to_be_bytes());
    out.extend_from_slice(&m.tracking.to_be_bytes());
    out.push(u8::from(m.bearings.is_some()));
    for p in &m.positions {
        out.extend_from_slice(&p.to_be_bytes());
    }
    for (left, right) in m.bearings.iter().flatten() {
        out.extend_from_slice(&left.to_be_bytes());
        out.extend_from_slice(&right.to_be_bytes());
    }
    out
}

pub(crate) fn parse_animation(data: &[u8]) -> PulpResult<AnimationInfo> {
    let mut r = Reader::new("anIm", data);
    let frames_across = r.u16()?;
    let frames_down = r.u16()?;
    let looping = r.u8()? != 0;
    let count = usize::from(r.u16()?);
    let frames = (0..count).map(|_| r.u16()).collect::<PulpResult<Vec<_>>>()?;
    let durations_ms = (0..count).map(|_| r.u16()).collect::<PulpResult<Vec<_>>>()?;
    Ok(AnimationInfo {
        frames_across,
        frames_down,
        looping,
        frames,
        durations_ms,
    })
}

pub(crate) fn write_animation(a: &AnimationInfo) -> PulpResult<Vec<u8>> {
    if a.frames.len() != a.durations_ms.len() {
        return Err(PulpError::encode(format!(
            "anIm has {} frames but {} durations",
            a.frames.len(),
            a.durations_ms.len()
        )));
    }
    let count = u16::try_from(a.frames.len())
        .map_err(|_| PulpError::encode("anIm supports at most 65535 frames"))?;
    let mut out = Vec::with_capacity(7 + a.frames.len() * 4);
    out.extend_from_slice(&a.frames_across.to_be_bytes());
    out.extend_from_slice(&a.frames_down.to_be_bytes());
    out.push(u8::from(a.looping));
    out.extend_from_slice(&count.to_be_bytes());
    for f in &a.frames {
        out.extend_from_slice(&f.to_be_bytes());
    }
    for d in &a.durations_ms {
        out.extend_from_slice(&d.to_be_bytes());
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../../tests/unit/assets/png/chunks.rs"]
mod tests;
