//! Scan conversion support: maps destination pixel centers back into local space and solves for
//! the runs of pixels that land inside a local rectangle.

use std::ops::Range;

use crate::foundation::fixed::{self, ONE, ONE_HALF};
use crate::surface::clip::IntRect;
use crate::transform::affine::Transform;

/// Inverse of a non-singular transform, with per-pixel deltas in local space.
#[derive(Clone, Copy, Debug)]
pub(super) struct InverseMap {
    t: Transform,
    /// Determinant with 32 fractional bits.
    det: i64,
    /// Local `u` step per destination pixel to the right.
    pub(super) du_x: i32,
    pub(super) dv_x: i32,
    /// Local `v` step per destination row; `u` does not change across rows without rotation.
    pub(super) dv_y: i32,
}

/// A run of destination pixels on one row plus the local coordinates of its first pixel center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Scanline {
    pub(super) y: i32,
    pub(super) x: i32,
    pub(super) count: i32,
    pub(super) u: i32,
    pub(super) v: i32,
}

impl InverseMap {
    /// `None` when the transform collapses the plane.
    pub(super) fn new(t: &Transform) -> Option<Self> {
        let det = t.determinant();
        if det == 0 {
            return None;
        }
        // Axis-aligned maps are separable: each axis inverts on its own.
        let (du_x, dv_x, dv_y) = if t.has_rotation() {
            let one = i64::from(ONE);
            (
                fixed::cross_div(t.scale_y().into(), one, 0, 0, det),
                fixed::cross_div(0, 0, t.shear_y().into(), one, det),
                fixed::cross_div(t.scale_x().into(), one, 0, 0, det),
            )
        } else {
            (fixed::recip(t.scale_x()), 0, fixed::recip(t.scale_y()))
        };
        Some(Self {
            t: *t,
            det,
            du_x,
            dv_x,
            dv_y,
        })
    }

    pub(super) fn determinant(&self) -> i64 {
        self.det
    }

    /// Local coordinates of the center of destination pixel `(x, y)`.
    pub(super) fn center(&self, x: i32, y: i32) -> (i32, i32) {
        let half = i64::from(ONE_HALF);
        let dx = (i64::from(x) << fixed::FRACTION_BITS) + half - i64::from(self.t.translate_x());
        let dy = (i64::from(y) << fixed::FRACTION_BITS) + half - i64::from(self.t.translate_y());
        let t = &self.t;
        let u = fixed::cross_div(dx, t.scale_y().into(), dy, t.shear_x().into(), self.det);
        let v = fixed::cross_div(dy, t.scale_x().into(), dx, t.shear_y().into(), self.det);
        (u, v)
    }

    /// Walk `region` top to bottom and report, per row, the pixels whose centers map into
    /// `u_range x v_range` (half-open, local fixed point).
    pub(super) fn scanlines(
        &self,
        region: IntRect,
        u_range: (i32, i32),
        v_range: (i32, i32),
        mut f: impl FnMut(Scanline),
    ) {
        for y in region.y..region.bottom() {
            let (u0, v0) = self.center(region.x, y);
            let us = solve_range(u0, self.du_x, u_range, region.width);
            let vs = solve_range(v0, self.dv_x, v_range, region.width);
            let start = us.start.max(vs.start);
            let end = us.end.min(vs.end);
            if start >= end {
                continue;
            }
            let (u, v) = self.center(region.x + start, y);
            f(Scanline {
                y,
                x: region.x + start,
                count: end - start,
                u,
                v,
            });
        }
    }
}

fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

fn ceil_div(a: i64, b: i64) -> i64 {
    -floor_div(-a, b)
}

/// Indices `i` in `0..len` with `lo <= start + step * i < hi`.
pub(super) fn solve_range(start: i32, step: i32, (lo, hi): (i32, i32), len: i32) -> Range<i32> {
    let len = i64::from(len.max(0));
    let (a, b) = (i64::from(lo) - i64::from(start), i64::from(hi) - i64::from(start));
    let (first, end) = match i64::from(step) {
        0 if a <= 0 && 0 < b => (0, len),
        0 => (0, 0),
        s if s > 0 => (ceil_div(a, s), ceil_div(b, s)),
        s => (floor_div(b, s) + 1, floor_div(a, s) + 1),
    };
    let first = first.clamp(0, len);
    let end = end.clamp(first, len);
    first as i32..end as i32
}

#[cfg(test)]
#[path = "../../tests/unit/render/scan.rs"]
mod tests;
