//! The image blit driver shared by every compositor.
//!
//! `blend_image` is generic over the rule and the destination kind and is instantiated once per
//! static compositor, so the per-pixel math inlines into these loops.

use crate::composite::compositor::{Destination, blend_px};
use crate::composite::rules::Rule;
use crate::composite::sample::{BilinearRows, NearestRow};
use crate::composite::{DestTarget, ImageSource, SampleSpan};
use crate::foundation::math::scale_pixel;

pub(crate) fn blend_image<R: Rule, D: Destination>(
    source: &ImageSource<'_>,
    span: &SampleSpan,
    render_alpha: u32,
    dest: &mut DestTarget<'_>,
) {
    if source.rect.is_empty() {
        return;
    }
    match (span.bilinear, render_alpha == 0xff) {
        (true, true) => run::<R, D, true, true>(source, span, render_alpha, dest),
        (true, false) => run::<R, D, true, false>(source, span, render_alpha, dest),
        (false, true) => run::<R, D, false, true>(source, span, render_alpha, dest),
        (false, false) => run::<R, D, false, false>(source, span, render_alpha, dest),
    }
}

#[inline(always)]
fn put<R: Rule, D: Destination, const FULL_ALPHA: bool>(d: &mut u32, s: u32, render_alpha: u32) {
    let s = if FULL_ALPHA {
        s
    } else {
        scale_pixel(s, render_alpha)
    };
    *d = blend_px::<R, D>(*d, s);
}

fn run<R: Rule, D: Destination, const BILINEAR: bool, const FULL_ALPHA: bool>(
    source: &ImageSource<'_>,
    span: &SampleSpan,
    render_alpha: u32,
    dest: &mut DestTarget<'_>,
) {
    let mut row_u = span.u;
    let mut row_v = span.v;

    for row in 0..dest.row_count {
        let start = dest.offset + row * dest.scan_width;
        let out = &mut dest.pixels[start..start + dest.pixel_count];
        let mut u = row_u;
        let mut v = row_v;

        if span.rotated {
            for d in out.iter_mut() {
                let s = if BILINEAR {
                    BilinearRows::new(source, v).sample(source, u)
                } else {
                    NearestRow::new(source, v).sample(source, u)
                };
                put::<R, D, FULL_ALPHA>(d, s, render_alpha);
                u = u.wrapping_add(span.du);
                v = v.wrapping_add(span.dv);
            }
        } else if BILINEAR {
            let rows = BilinearRows::new(source, v);
            for d in out.iter_mut() {
                put::<R, D, FULL_ALPHA>(d, rows.sample(source, u), render_alpha);
                u = u.wrapping_add(span.du);
            }
        } else {
            let rows = NearestRow::new(source, v);
            for d in out.iter_mut() {
                put::<R, D, FULL_ALPHA>(d, rows.sample(source, u), render_alpha);
                u = u.wrapping_add(span.du);
            }
        }

        row_u = row_u.wrapping_add(span.du_row);
        row_v = row_v.wrapping_add(span.dv_row);
    }
}
