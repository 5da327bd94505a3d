//! Source-image sampling: nearest neighbour and bilinear with per-edge clamping.
//!
//! Coordinates are 16.16 fixed point relative to the sampled rectangle's origin. Bilinear
//! sampling expects coordinates already shifted so that integer values land on pixel centers.

use crate::composite::{EdgeClamp, ImageSource};
use crate::foundation::math::{alpha, blue, green, pack, red};

/// Nearest-neighbour sample; coordinates outside the rectangle are clamped. An empty rectangle
/// samples as transparent.
pub fn nearest(source: &ImageSource<'_>, u: i32, v: i32) -> u32 {
    if source.rect.is_empty() {
        return 0;
    }
    NearestRow::new(source, v).sample(source, u)
}

/// Bilinear sample honoring the source's edge clamp policy.
pub fn bilinear(source: &ImageSource<'_>, u: i32, v: i32) -> u32 {
    if source.rect.is_empty() {
        return 0;
    }
    BilinearRows::new(source, v).sample(source, u)
}

/// Row offset resolved once per destination row for nearest sampling.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NearestRow {
    base: usize,
}

impl NearestRow {
    #[inline(always)]
    pub(crate) fn new(source: &ImageSource<'_>, v: i32) -> Self {
        let y = (v >> 16).clamp(0, source.rect.height - 1);
        Self {
            base: (source.rect.y + y) as usize * source.scan_width + source.rect.x as usize,
        }
    }

    #[inline(always)]
    pub(crate) fn sample(&self, source: &ImageSource<'_>, u: i32) -> u32 {
        let x = (u >> 16).clamp(0, source.rect.width - 1);
        source.pixels[self.base + x as usize]
    }
}

/// The two source rows (and vertical weight) under one `v` coordinate.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BilinearRows {
    top: Option<usize>,
    bottom: Option<usize>,
    fy: u32,
}

#[inline(always)]
fn resolve(i: i32, len: i32, clamp_low: bool, clamp_high: bool) -> Option<i32> {
    if i < 0 {
        clamp_low.then_some(0)
    } else if i >= len {
        clamp_high.then_some(len - 1)
    } else {
        Some(i)
    }
}

impl BilinearRows {
    #[inline(always)]
    pub(crate) fn new(source: &ImageSource<'_>, v: i32) -> Self {
        let clamp = source.edge_clamp;
        let top_clamp = clamp.contains(EdgeClamp::TOP);
        let bottom_clamp = clamp.contains(EdgeClamp::BOTTOM);
        let h = source.rect.height;
        let y0 = v >> 16;
        let fy = ((v >> 8) & 0xff) as u32;

        let row_base = |y: i32| {
            (source.rect.y + y) as usize * source.scan_width + source.rect.x as usize
        };
        let top = resolve(y0, h, top_clamp, bottom_clamp).map(row_base);
        let bottom = if fy == 0 {
            top
        } else {
            resolve(y0 + 1, h, top_clamp, bottom_clamp).map(row_base)
        };
        Self { top, bottom, fy }
    }

    #[inline(always)]
    pub(crate) fn sample(&self, source: &ImageSource<'_>, u: i32) -> u32 {
        let clamp = source.edge_clamp;
        let left_clamp = clamp.contains(EdgeClamp::LEFT);
        let right_clamp = clamp.contains(EdgeClamp::RIGHT);
        let w = source.rect.width;
        let x0 = u >> 16;
        let fx = ((u >> 8) & 0xff) as u32;

        let left = resolve(x0, w, left_clamp, right_clamp);
        let right = if fx == 0 {
            left
        } else {
            resolve(x0 + 1, w, left_clamp, right_clamp)
        };

        let fetch = |row: Option<usize>, col: Option<i32>| match (row, col) {
            (Some(r), Some(c)) => source.pixels[r + c as usize],
            _ => 0,
        };
        let tl = fetch(self.top, left);
        let tr = fetch(self.top, right);
        let bl = fetch(self.bottom, left);
        let br = fetch(self.bottom, right);

        // Solid regions are common; skip the weighting entirely.
        if tl == tr && tl == bl && tl == br {
            return tl;
        }

        let in_bounds =
            self.top.is_some() && self.bottom.is_some() && left.is_some() && right.is_some();
        if source.opaque && in_bounds {
            bilinear_opaque(tl, tr, bl, br, fx, self.fy)
        } else {
            bilinear_translucent(tl, tr, bl, br, fx, self.fy)
        }
    }
}

#[inline(always)]
fn weights(fx: u32, fy: u32) -> [u32; 4] {
    let fxy = fx * fy / 255;
    [255 + fxy - fx - fy, fx - fxy, fy - fxy, fxy]
}

#[inline(always)]
fn weigh(w: &[u32; 4], c: [u32; 4]) -> u32 {
    (w[0] * c[0] + w[1] * c[1] + w[2] * c[2] + w[3] * c[3] + 127) / 255
}

/// Four opaque samples: only the color channels are weighted.
#[inline(always)]
pub(crate) fn bilinear_opaque(tl: u32, tr: u32, bl: u32, br: u32, fx: u32, fy: u32) -> u32 {
    let w = weights(fx, fy);
    pack(
        0xff,
        weigh(&w, [red(tl), red(tr), red(bl), red(br)]),
        weigh(&w, [green(tl), green(tr), green(bl), green(br)]),
        weigh(&w, [blue(tl), blue(tr), blue(bl), blue(br)]),
    )
}

#[inline(always)]
pub(crate) fn bilinear_translucent(tl: u32, tr: u32, bl: u32, br: u32, fx: u32, fy: u32) -> u32 {
    let w = weights(fx, fy);
    pack(
        weigh(&w, [alpha(tl), alpha(tr), alpha(bl), alpha(br)]),
        weigh(&w, [red(tl), red(tr), red(bl), red(br)]),
        weigh(&w, [green(tl), green(tr), green(bl), green(br)]),
        weigh(&w, [blue(tl), blue(tr), blue(bl), blue(br)]),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/composite/sample.rs"]
mod tests;
