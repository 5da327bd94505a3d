//! Solid rectangle fills.

use crate::foundation::fixed::{self, ONE, ONE_HALF};
use crate::foundation::math::{mul_div255, scale_pixel};
use crate::render::graphics::Graphics;
use crate::render::scan::InverseMap;
use crate::surface::clip::IntRect;
use crate::transform::affine::Transform;

/// Coverage (0-255) of pixel cell `cell` by the fixed-point span `[lo, hi)`.
fn coverage(lo: i32, hi: i32, cell: i32) -> u32 {
    let c0 = i64::from(cell) << fixed::FRACTION_BITS;
    let a = i64::from(lo).max(c0);
    let b = i64::from(hi).min(c0 + i64::from(ONE));
    if b <= a {
        0
    } else {
        ((((b - a) * 255) + i64::from(ONE_HALF)) >> fixed::FRACTION_BITS) as u32
    }
}

/// Fixed-point length of the vector `(a, b)`, widened so large scales do not wrap.
fn length(a: i32, b: i32) -> i64 {
    let sq = |v: i32| u64::from(v.unsigned_abs()).pow(2);
    fixed::sqrt_wide(sq(a) + sq(b))
}

impl Graphics<'_> {
    /// Fill the whole clip with the current color, ignoring the transform.
    pub fn fill(&mut self) {
        if let Some(src) = self.solid_source() {
            self.fill_device_rect(self.clip, src);
        }
    }

    /// Reset the clip area to transparent `0x00000000`. On an opaque surface the result is opaque
    /// black `0xff000000` instead, so the surface stays opaque; the `Clear` blend mode behaves the
    /// same way.
    pub fn clear(&mut self) {
        let comp = crate::composite::BlendMode::Clear.composite(self.surface.is_opaque());
        let clip = self.clip;
        let width = self.surface.width() as usize;
        let pixels = self.surface.pixels_mut();
        for y in clip.y..clip.bottom() {
            comp.blend_row(pixels, y as usize * width + clip.x as usize, 0, clip.width as usize);
        }
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.fill_rect_fixed(
            fixed::to_fixed_f64(x),
            fixed::to_fixed_f64(y),
            fixed::to_fixed_f64(w),
            fixed::to_fixed_f64(h),
        );
    }

    /// Fill a rectangle given in local fixed-point coordinates.
    pub fn fill_rect_fixed(&mut self, fx: i32, fy: i32, fw: i32, fh: i32) {
        if fw <= 0 || fh <= 0 {
            return;
        }
        let Some(src) = self.solid_source() else {
            return;
        };
        let t = self.transform;
        if t.has_rotation() {
            self.fill_rotated(&t, fx, fy, fw, fh, src);
            return;
        }

        let xa = t.transform_x(fx, fy);
        let ya = t.transform_y(fx, fy);
        let xb = t.transform_x(fx + fw, fy + fh);
        let yb = t.transform_y(fx + fw, fy + fh);
        let (x0, x1) = (xa.min(xb), xa.max(xb));
        let (y0, y1) = (ya.min(yb), ya.max(yb));

        if [x0, x1, y0, y1].iter().all(|&v| fixed::frac_part(v) == 0) {
            let x = fixed::to_int(x0);
            let y = fixed::to_int(y0);
            let rect = IntRect::new(x, y, fixed::to_int(x1) - x, fixed::to_int(y1) - y);
            self.fill_device_rect(rect, src);
        } else {
            self.fill_device_rect_aa(x0, y0, x1, y1, src);
        }
    }

    /// Outline a rectangle with one-pixel (local) strokes drawn inside its bounds.
    pub fn draw_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        if w <= 2.0 || h <= 2.0 {
            self.fill_rect(x, y, w, h);
            return;
        }
        self.fill_rect(x, y, w, 1.0);
        self.fill_rect(x, y + h - 1.0, w, 1.0);
        self.fill_rect(x, y + 1.0, 1.0, h - 2.0);
        self.fill_rect(x + w - 1.0, y + 1.0, 1.0, h - 2.0);
    }

    /// Solid fill of an integer device-space rectangle, one `blend_row` per scanline.
    pub(super) fn fill_device_rect(&mut self, rect: IntRect, src: u32) {
        let r = rect.intersection(&self.clip);
        if r.is_empty() {
            return;
        }
        let comp = self.composite();
        let width = self.surface.width() as usize;
        let pixels = self.surface.pixels_mut();
        for y in r.y..r.bottom() {
            comp.blend_row(pixels, y as usize * width + r.x as usize, src, r.width as usize);
        }
    }

    /// Axis-aligned fill with fractional edges. Edge pixels get partial coverage; runs of equal
    /// coverage are merged into single `blend_row` calls.
    fn fill_device_rect_aa(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, src: u32) {
        let clip = self.clip;
        let px0 = fixed::to_int_floor(x0).max(clip.x);
        let px1 = fixed::to_int_ceil(x1).min(clip.right());
        let py0 = fixed::to_int_floor(y0).max(clip.y);
        let py1 = fixed::to_int_ceil(y1).min(clip.bottom());
        if px0 >= px1 || py0 >= py1 {
            return;
        }

        let columns: Vec<u32> = (px0..px1).map(|px| coverage(x0, x1, px)).collect();
        let comp = self.composite();
        let width = self.surface.width() as usize;
        let pixels = self.surface.pixels_mut();

        for py in py0..py1 {
            let cy = coverage(y0, y1, py);
            if cy == 0 {
                continue;
            }
            let row = py as usize * width;
            let mut i = 0;
            while i < columns.len() {
                let cx = columns[i];
                let run = columns[i..].iter().take_while(|&&c| c == cx).count();
                let cov = mul_div255(cx, cy);
                if cov != 0 {
                    let s = if cov == 0xff { src } else { scale_pixel(src, cov) };
                    comp.blend_row(pixels, row + px0 as usize + i, s, run);
                }
                i += run;
            }
        }
    }

    /// Rotated or sheared fill: scan conversion with analytic edge coverage.
    fn fill_rotated(&mut self, t: &Transform, fx: i32, fy: i32, fw: i32, fh: i32, src: u32) {
        let mut local = *t;
        local.translate(fx, fy);
        let Some(map) = InverseMap::new(&local) else {
            tracing::trace!("fill_rect skipped: singular transform");
            return;
        };

        // Destination pixels per local unit, measured across each pair of edges.
        let det = map.determinant().saturating_abs();
        let len_u = length(local.scale_x(), local.shear_y());
        let len_v = length(local.shear_x(), local.scale_y());
        if len_u == 0 || len_v == 0 {
            return;
        }
        let half = i64::from(ONE_HALF);
        let margin_u = fixed::cross_div(half, len_v, 0, 0, det).saturating_add(1);
        let margin_v = fixed::cross_div(half, len_u, 0, 0, det).saturating_add(1);

        let region = local.bounds(fw, fh).expanded(1).intersection(&self.clip);
        if region.is_empty() {
            return;
        }

        let comp = self.composite();
        let width = self.surface.width() as usize;
        let pixels = self.surface.pixels_mut();

        // Distance to an edge in local units, converted to destination pixels.
        let edge_cov = |dist: i32, len: i64| -> u32 {
            let px = fixed::saturate(
                i128::from(dist) * i128::from(det) / (i128::from(len) << fixed::FRACTION_BITS),
            );
            let c = px.saturating_add(ONE_HALF).clamp(0, ONE);
            ((c * 255 + ONE_HALF) >> fixed::FRACTION_BITS) as u32
        };

        map.scanlines(
            region,
            (-margin_u, fw.saturating_add(margin_u)),
            (-margin_v, fh.saturating_add(margin_v)),
            |s| {
                let mut u = s.u;
                let mut v = s.v;
                let row = s.y as usize * width + s.x as usize;
                for i in 0..s.count as usize {
                    let cu = edge_cov(u.min(fw - u), len_v);
                    let cv = edge_cov(v.min(fh - v), len_u);
                    let cov = mul_div255(cu, cv);
                    if cov != 0 {
                        comp.blend_alpha(pixels, row + i, src, cov);
                    }
                    u = u.wrapping_add(map.du_x);
                    v = v.wrapping_add(map.dv_x);
                }
            },
        );
    }
}
