//! Image drawing: integer-translate copies, scaled blits and rotated scan conversion.

use crate::composite::{BlendMode, DestTarget, EdgeClamp, ImageSource, SampleSpan};
use crate::foundation::fixed::{self, ONE, ONE_HALF};
use crate::render::graphics::Graphics;
use crate::render::scan::{InverseMap, solve_range};
use crate::surface::clip::IntRect;
use crate::surface::pixel_buffer::PixelBuffer;
use crate::transform::affine::Transform;

impl Graphics<'_> {
    /// Draw `image` at the local origin.
    pub fn draw_image(&mut self, image: &PixelBuffer) {
        self.draw_image_region_fixed(image, image.bounds(), 0, 0);
    }

    pub fn draw_image_at(&mut self, image: &PixelBuffer, x: f64, y: f64) {
        self.draw_image_region_fixed(
            image,
            image.bounds(),
            fixed::to_fixed_f64(x),
            fixed::to_fixed_f64(y),
        );
    }

    /// Draw the `src` sub-rectangle of `image` with its top-left corner at `(x, y)`.
    pub fn draw_image_region(&mut self, image: &PixelBuffer, src: IntRect, x: f64, y: f64) {
        self.draw_image_region_fixed(image, src, fixed::to_fixed_f64(x), fixed::to_fixed_f64(y));
    }

    pub fn draw_image_region_fixed(&mut self, image: &PixelBuffer, src: IntRect, fx: i32, fy: i32) {
        let mut t = self.transform;
        t.translate(fx, fy);
        self.blit(image, src, &t);
    }

    /// Draw `image` stretched to `w x h` local units.
    pub fn draw_scaled_image(&mut self, image: &PixelBuffer, x: f64, y: f64, w: f64, h: f64) {
        self.draw_scaled_image_fixed(
            image,
            fixed::to_fixed_f64(x),
            fixed::to_fixed_f64(y),
            fixed::to_fixed_f64(w),
            fixed::to_fixed_f64(h),
        );
    }

    pub fn draw_scaled_image_fixed(&mut self, image: &PixelBuffer, fx: i32, fy: i32, fw: i32, fh: i32) {
        if fw <= 0 || fh <= 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let mut t = self.transform;
        t.translate(fx, fy);
        t.scale(
            fixed::div(fw, fixed::to_fixed(image.width() as i32)),
            fixed::div(fh, fixed::to_fixed(image.height() as i32)),
        );
        self.blit(image, image.bounds(), &t);
    }

    /// Validate the source rectangle against the image. Out-of-bounds rectangles are reported
    /// and skipped with checked draws, clamped otherwise.
    fn source_region(&self, image: &PixelBuffer, region: IntRect) -> Option<IntRect> {
        if region.is_empty() {
            return None;
        }
        let clamped = region.intersection(&image.bounds());
        if clamped != region && self.opts.checked_draws {
            tracing::error!(
                ?region,
                image_width = image.width(),
                image_height = image.height(),
                "image source rectangle outside image bounds"
            );
            return None;
        }
        (!clamped.is_empty()).then_some(clamped)
    }

    fn blit(&mut self, image: &PixelBuffer, region: IntRect, t: &Transform) {
        let Some(rect) = self.source_region(image, region) else {
            return;
        };
        if self.alpha == 0 || self.blend_mode == BlendMode::Dst || self.clip.is_empty() {
            return;
        }
        let source = ImageSource {
            pixels: image.pixels(),
            scan_width: image.width() as usize,
            opaque: image.is_opaque(),
            edge_clamp: self.edge_clamp,
            rect,
        };

        let kind = t.kind();
        let stretched = kind & (Transform::TYPE_SCALE | Transform::TYPE_ROTATE) != 0;
        if !stretched
            && fixed::frac_part(t.translate_x()) == 0
            && fixed::frac_part(t.translate_y()) == 0
        {
            self.blit_translated(
                &source,
                fixed::to_int(t.translate_x()),
                fixed::to_int(t.translate_y()),
            );
        } else if kind & Transform::TYPE_ROTATE == 0 {
            self.blit_scaled(&source, t);
        } else {
            self.blit_rotated(&source, t);
        }
    }

    /// Local sampling window in fixed point. Under bilinear filtering an unclamped edge extends
    /// half a source pixel so it can fade out.
    fn sample_window(&self, source: &ImageSource<'_>) -> ((i32, i32), (i32, i32)) {
        let soft = |edge: EdgeClamp| {
            if self.bilinear && !source.edge_clamp.contains(edge) {
                ONE_HALF
            } else {
                0
            }
        };
        let w = fixed::to_fixed(source.rect.width);
        let h = fixed::to_fixed(source.rect.height);
        (
            (-soft(EdgeClamp::LEFT), w + soft(EdgeClamp::RIGHT)),
            (-soft(EdgeClamp::TOP), h + soft(EdgeClamp::BOTTOM)),
        )
    }

    /// Region of the surface worth visiting for a transformed source rectangle.
    fn blit_region(&self, source: &ImageSource<'_>, t: &Transform) -> IntRect {
        t.bounds(
            fixed::to_fixed(source.rect.width),
            fixed::to_fixed(source.rect.height),
        )
        .expanded(1)
        .intersection(&self.clip)
    }

    fn blit_translated(&mut self, source: &ImageSource<'_>, tx: i32, ty: i32) {
        let dest = IntRect::new(tx, ty, source.rect.width, source.rect.height).intersection(&self.clip);
        if dest.is_empty() {
            return;
        }
        let width = self.surface.width() as usize;
        let offset = dest.y as usize * width + dest.x as usize;

        if self.blend_mode == BlendMode::SrcOver && source.opaque && self.alpha == 0xff {
            let sx = (source.rect.x + dest.x - tx) as usize;
            let sy = (source.rect.y + dest.y - ty) as usize;
            let w = dest.width as usize;
            let pixels = self.surface.pixels_mut();
            for row in 0..dest.height as usize {
                let s = (sy + row) * source.scan_width + sx;
                let d = offset + row * width;
                pixels[d..d + w].copy_from_slice(&source.pixels[s..s + w]);
            }
            return;
        }

        let span = SampleSpan {
            u: fixed::to_fixed(dest.x - tx),
            v: fixed::to_fixed(dest.y - ty),
            du: ONE,
            dv_row: ONE,
            ..SampleSpan::default()
        };
        let comp = self.composite();
        let alpha = self.alpha;
        let mut target = DestTarget {
            pixels: self.surface.pixels_mut(),
            scan_width: width,
            offset,
            pixel_count: dest.width as usize,
            row_count: dest.height as usize,
        };
        comp.blend_image(source, &span, alpha, &mut target);
    }

    /// Scale and fractional translation: the same column range for every row, so the whole
    /// destination rectangle goes through a single `blend_image` call.
    fn blit_scaled(&mut self, source: &ImageSource<'_>, t: &Transform) {
        let Some(map) = InverseMap::new(t) else {
            tracing::trace!("image draw skipped: singular transform");
            return;
        };
        let region = self.blit_region(source, t);
        if region.is_empty() {
            return;
        }
        let (u_range, v_range) = self.sample_window(source);
        let (u0, v0) = map.center(region.x, region.y);
        let cols = solve_range(u0, map.du_x, u_range, region.width);
        let rows = solve_range(v0, map.dv_y, v_range, region.height);
        if cols.is_empty() || rows.is_empty() {
            return;
        }

        let x = region.x + cols.start;
        let y = region.y + rows.start;
        let (u, v) = map.center(x, y);
        let half = if self.bilinear { ONE_HALF } else { 0 };
        let span = SampleSpan {
            u: u - half,
            v: v - half,
            du: map.du_x,
            dv: 0,
            du_row: 0,
            dv_row: map.dv_y,
            rotated: false,
            bilinear: self.bilinear,
        };
        let comp = self.composite();
        let alpha = self.alpha;
        let width = self.surface.width() as usize;
        let mut target = DestTarget {
            pixels: self.surface.pixels_mut(),
            scan_width: width,
            offset: y as usize * width + x as usize,
            pixel_count: cols.len(),
            row_count: rows.len(),
        };
        comp.blend_image(source, &span, alpha, &mut target);
    }

    /// Rotation or shear: per-scanline intersection with the four source edges.
    fn blit_rotated(&mut self, source: &ImageSource<'_>, t: &Transform) {
        let Some(map) = InverseMap::new(t) else {
            tracing::trace!("image draw skipped: singular transform");
            return;
        };
        let region = self.blit_region(source, t);
        if region.is_empty() {
            return;
        }
        let (u_range, v_range) = self.sample_window(source);
        let half = if self.bilinear { ONE_HALF } else { 0 };
        let bilinear = self.bilinear;
        let comp = self.composite();
        let alpha = self.alpha;
        let width = self.surface.width() as usize;
        let pixels = self.surface.pixels_mut();

        map.scanlines(region, u_range, v_range, |s| {
            let span = SampleSpan {
                u: s.u - half,
                v: s.v - half,
                du: map.du_x,
                dv: map.dv_x,
                du_row: 0,
                dv_row: 0,
                rotated: true,
                bilinear,
            };
            let mut target = DestTarget {
                pixels: &mut *pixels,
                scan_width: width,
                offset: s.y as usize * width + s.x as usize,
                pixel_count: s.count as usize,
                row_count: 1,
            };
            comp.blend_image(source, &span, alpha, &mut target);
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/image.rs"]
mod tests;
