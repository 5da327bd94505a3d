use std::marker::PhantomData;

use crate::composite::blit;
use crate::composite::rules::Rule;
use crate::composite::{BlendMode, Composite, DestTarget, ImageSource, SampleSpan};
use crate::foundation::math::{alpha, scale_pixel};

/// Destination flavour a compositor is specialized for.
pub(crate) trait Destination: 'static {
    const OPAQUE: bool;
}

pub(crate) struct OpaqueDest;

impl Destination for OpaqueDest {
    const OPAQUE: bool = true;
}

pub(crate) struct AlphaDest;

impl Destination for AlphaDest {
    const OPAQUE: bool = false;
}

/// A [`Rule`] bound to a destination kind. Instances are statics; see `BlendMode::composite`.
pub(crate) struct Compositor<R, D> {
    mode: BlendMode,
    dest_opaque: bool,
    _rule: PhantomData<fn() -> (R, D)>,
}

impl<R, D> Compositor<R, D> {
    pub(crate) const fn new(mode: BlendMode, dest_opaque: bool) -> Self {
        Self {
            mode,
            dest_opaque,
            _rule: PhantomData,
        }
    }
}

#[inline(always)]
pub(crate) fn blend_px<R: Rule, D: Destination>(dst: u32, src: u32) -> u32 {
    if D::OPAQUE {
        R::blend_onto_opaque(dst, src)
    } else {
        R::blend(dst, src)
    }
}

#[inline(always)]
fn blend_opaque_src_px<R: Rule, D: Destination>(dst: u32, src: u32) -> u32 {
    if D::OPAQUE {
        R::blend_onto_opaque(dst, src)
    } else {
        R::blend_opaque_src(dst, src)
    }
}

impl<R: Rule, D: Destination> Composite for Compositor<R, D> {
    fn mode(&self) -> BlendMode {
        self.mode
    }

    fn dest_opaque(&self) -> bool {
        self.dest_opaque
    }

    fn blend(&self, dest: &mut [u32], offset: usize, src: u32) {
        let d = &mut dest[offset];
        *d = blend_px::<R, D>(*d, src);
    }

    fn blend_alpha(&self, dest: &mut [u32], offset: usize, src: u32, extra_alpha: u32) {
        let src = if extra_alpha >= 0xff {
            src
        } else {
            scale_pixel(src, extra_alpha)
        };
        let d = &mut dest[offset];
        *d = blend_px::<R, D>(*d, src);
    }

    fn blend_row(&self, dest: &mut [u32], offset: usize, src: u32, count: usize) {
        let row = &mut dest[offset..offset + count];
        if alpha(src) == 0xff {
            for d in row {
                *d = blend_opaque_src_px::<R, D>(*d, src);
            }
        } else {
            for d in row {
                *d = blend_px::<R, D>(*d, src);
            }
        }
    }

    fn blend_image(
        &self,
        source: &ImageSource<'_>,
        span: &SampleSpan,
        render_alpha: u32,
        dest: &mut DestTarget<'_>,
    ) {
        if render_alpha == 0 || dest.pixel_count == 0 || dest.row_count == 0 {
            return;
        }
        blit::blend_image::<R, D>(source, span, render_alpha.min(0xff), dest);
    }
}
