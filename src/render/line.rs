//! Anti-aliased lines (Wu) with Cohen-Sutherland clipping.
//!
//! Line endpoints address pixel indices: the line from `(0, 0)` to `(5, 0)` touches the six
//! pixels `x = 0..=5` on row 0.

use crate::composite::Composite;
use crate::foundation::fixed::{self, FRACTION_BITS, FRACTION_MASK};
use crate::render::graphics::Graphics;
use crate::surface::clip::IntRect;

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const TOP: u8 = 4;
const BOTTOM: u8 = 8;

/// A device-space segment after clipping. `clipped_*` marks endpoints moved by the clipper.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Segment {
    pub(super) x1: i32,
    pub(super) y1: i32,
    pub(super) x2: i32,
    pub(super) y2: i32,
    pub(super) clipped1: bool,
    pub(super) clipped2: bool,
}

/// Inclusive fixed-point clip window.
#[derive(Clone, Copy, Debug)]
pub(super) struct Window {
    pub(super) x_min: i32,
    pub(super) y_min: i32,
    pub(super) x_max: i32,
    pub(super) y_max: i32,
}

impl Window {
    /// The clip grown by one pixel so lines leaving it still anti-alias up to the border.
    pub(super) fn around(clip: IntRect) -> Self {
        Self {
            x_min: fixed::to_fixed(clip.x - 1),
            y_min: fixed::to_fixed(clip.y - 1),
            x_max: fixed::to_fixed(clip.right()),
            y_max: fixed::to_fixed(clip.bottom()),
        }
    }

    fn outcode(&self, x: i64, y: i64) -> u8 {
        let mut code = INSIDE;
        if x < i64::from(self.x_min) {
            code |= LEFT;
        } else if x > i64::from(self.x_max) {
            code |= RIGHT;
        }
        if y < i64::from(self.y_min) {
            code |= TOP;
        } else if y > i64::from(self.y_max) {
            code |= BOTTOM;
        }
        code
    }
}

/// Cohen-Sutherland clipping. `None` when the segment misses the window.
pub(super) fn clip_segment(x1: i32, y1: i32, x2: i32, y2: i32, w: &Window) -> Option<Segment> {
    let (mut x1, mut y1, mut x2, mut y2) = (
        i64::from(x1),
        i64::from(y1),
        i64::from(x2),
        i64::from(y2),
    );
    let mut clipped1 = false;
    let mut clipped2 = false;

    // Each pass moves one endpoint onto a window edge; four edges per endpoint bound the loop.
    for _ in 0..8 {
        let c1 = w.outcode(x1, y1);
        let c2 = w.outcode(x2, y2);
        if c1 | c2 == INSIDE {
            return Some(Segment {
                x1: x1 as i32,
                y1: y1 as i32,
                x2: x2 as i32,
                y2: y2 as i32,
                clipped1,
                clipped2,
            });
        }
        if c1 & c2 != INSIDE {
            return None;
        }
        let out = if c1 != INSIDE { c1 } else { c2 };
        let (dx, dy) = (x2 - x1, y2 - y1);
        let (x, y) = if out & TOP != 0 {
            let y = i64::from(w.y_min);
            (x1 + dx * (y - y1) / dy, y)
        } else if out & BOTTOM != 0 {
            let y = i64::from(w.y_max);
            (x1 + dx * (y - y1) / dy, y)
        } else if out & LEFT != 0 {
            let x = i64::from(w.x_min);
            (x, y1 + dy * (x - x1) / dx)
        } else {
            let x = i64::from(w.x_max);
            (x, y1 + dy * (x - x1) / dx)
        };
        if out == c1 {
            (x1, y1, clipped1) = (x, y, true);
        } else {
            (x2, y2, clipped2) = (x, y, true);
        }
    }
    None
}

struct Plotter<'p> {
    comp: &'static dyn Composite,
    clip: IntRect,
    width: usize,
    src: u32,
    pixels: &'p mut [u32],
}

impl Plotter<'_> {
    fn plot(&mut self, x: i32, y: i32, cov: u32) {
        if cov == 0 || !self.clip.contains(x, y) {
            return;
        }
        let offset = y as usize * self.width + x as usize;
        self.comp.blend_alpha(self.pixels, offset, self.src, cov);
    }
}

impl Graphics<'_> {
    pub fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.draw_line_fixed(
            fixed::to_fixed_f64(x1),
            fixed::to_fixed_f64(y1),
            fixed::to_fixed_f64(x2),
            fixed::to_fixed_f64(y2),
        );
    }

    /// Draw a one-pixel anti-aliased line between two local fixed-point points.
    pub fn draw_line_fixed(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let Some(src) = self.solid_source() else {
            return;
        };
        if self.clip.is_empty() {
            return;
        }
        let t = self.transform;
        let ax = t.transform_x(x1, y1);
        let ay = t.transform_y(x1, y1);
        let bx = t.transform_x(x2, y2);
        let by = t.transform_y(x2, y2);

        let integral = [ax, ay, bx, by]
            .iter()
            .all(|&v| fixed::frac_part(v) == 0);
        if !t.has_rotation() && integral && (ax == bx || ay == by) {
            let x = fixed::to_int(ax.min(bx));
            let y = fixed::to_int(ay.min(by));
            let w = fixed::to_int((ax - bx).abs()) + 1;
            let h = fixed::to_int((ay - by).abs()) + 1;
            self.fill_device_rect(IntRect::new(x, y, w, h), src);
            return;
        }

        let Some(seg) = clip_segment(ax, ay, bx, by, &Window::around(self.clip)) else {
            return;
        };
        self.wu_line(seg, src);
    }

    fn wu_line(&mut self, seg: Segment, src: u32) {
        let mut p = Plotter {
            comp: self.composite(),
            clip: self.clip,
            width: self.surface.width() as usize,
            src,
            pixels: self.surface.pixels_mut(),
        };

        let dx = i64::from(seg.x2) - i64::from(seg.x1);
        let dy = i64::from(seg.y2) - i64::from(seg.y1);
        if dx == 0 && dy == 0 {
            p.plot(
                fixed::to_int_round(seg.x1),
                fixed::to_int_round(seg.y1),
                0xff,
            );
            return;
        }

        let x_major = dx.abs() >= dy.abs();
        // Walk along the major axis; `a` is major, `b` is minor.
        let (a1, b1, a2, b2, solid1, solid2) = if x_major {
            (seg.x1, seg.y1, seg.x2, seg.y2, !seg.clipped1, !seg.clipped2)
        } else {
            (seg.y1, seg.x1, seg.y2, seg.x2, !seg.clipped1, !seg.clipped2)
        };
        let (a1, b1, a2, b2, solid1, solid2) = if a1 > a2 {
            (a2, b2, a1, b1, solid2, solid1)
        } else {
            (a1, b1, a2, b2, solid1, solid2)
        };

        let gradient = ((i64::from(b2) - i64::from(b1)) << FRACTION_BITS)
            / (i64::from(a2) - i64::from(a1));
        let start = fixed::to_int_round(a1);
        let end = fixed::to_int_round(a2);

        for i in start..=end {
            let along = i64::from(fixed::to_fixed(i)) - i64::from(a1);
            let b = i64::from(b1) + ((gradient * along) >> FRACTION_BITS);
            let mut put = |major: i32, minor: i32, cov: u32| {
                if x_major {
                    p.plot(major, minor, cov);
                } else {
                    p.plot(minor, major, cov);
                }
            };
            if (i == start && solid1) || (i == end && solid2) {
                put(i, fixed::to_int_round(b as i32), 0xff);
                continue;
            }
            let bi = (b >> FRACTION_BITS) as i32;
            let frac = ((b & i64::from(FRACTION_MASK)) >> 8) as u32;
            put(i, bi, 0xff - frac);
            put(i, bi + 1, frac);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/line.rs"]
mod tests;
