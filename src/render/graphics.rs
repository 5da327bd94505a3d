use std::sync::Arc;

use crate::composite::{BlendMode, Composite, EdgeClamp};
use crate::font::CoreFont;
use crate::foundation::error::PulpResult;
use crate::foundation::fixed;
use crate::foundation::math::{alpha, mul_div255, premultiply};
use crate::render::opts::GraphicsOpts;
use crate::surface::clip::IntRect;
use crate::surface::pixel_buffer::PixelBuffer;
use crate::transform::affine::Transform;
use crate::transform::stack::TransformStack;

/// Default drawing color: opaque black.
pub const DEFAULT_COLOR: u32 = 0xff00_0000;

/// Drawing context over a [`PixelBuffer`].
///
/// Holds the draw state (color, alpha, blend mode, interpolation, edge clamp, font, transform
/// and clip) and rasterizes primitives into the borrowed surface. Colors are straight-alpha ARGB;
/// surface pixels are premultiplied.
pub struct Graphics<'a> {
    pub(super) surface: &'a mut PixelBuffer,
    pub(super) opts: GraphicsOpts,
    pub(super) color: u32,
    pub(super) alpha: u32,
    pub(super) blend_mode: BlendMode,
    pub(super) bilinear: bool,
    pub(super) edge_clamp: EdgeClamp,
    pub(super) font: Option<Arc<CoreFont>>,
    pub(super) transform: Transform,
    pub(super) stack: TransformStack,
    pub(super) clip: IntRect,
}

impl<'a> Graphics<'a> {
    pub fn new(surface: &'a mut PixelBuffer) -> Self {
        Self::with_opts(surface, GraphicsOpts::default())
    }

    pub fn with_opts(surface: &'a mut PixelBuffer, opts: GraphicsOpts) -> Self {
        let clip = surface.bounds();
        Self {
            surface,
            opts,
            color: DEFAULT_COLOR,
            alpha: 0xff,
            blend_mode: BlendMode::default(),
            bilinear: opts.bilinear,
            edge_clamp: opts.edge_clamp,
            font: None,
            transform: Transform::identity(),
            stack: TransformStack::new(),
            clip,
        }
    }
}

impl Graphics<'_> {
    pub fn surface(&self) -> &PixelBuffer {
        &*self.surface
    }

    pub fn surface_width(&self) -> u32 {
        self.surface.width()
    }

    pub fn surface_height(&self) -> u32 {
        self.surface.height()
    }

    pub fn opts(&self) -> &GraphicsOpts {
        &self.opts
    }

    /// Restore every piece of draw state to its default.
    pub fn reset(&mut self) {
        self.color = DEFAULT_COLOR;
        self.alpha = 0xff;
        self.blend_mode = BlendMode::default();
        self.bilinear = self.opts.bilinear;
        self.edge_clamp = self.opts.edge_clamp;
        self.font = None;
        self.transform.clear();
        self.stack.clear();
        self.remove_clip();
    }

    // State

    pub fn color(&self) -> u32 {
        self.color
    }

    /// Set the straight-alpha ARGB drawing color.
    pub fn set_color(&mut self, argb: u32) {
        self.color = argb;
    }

    pub fn alpha(&self) -> u32 {
        self.alpha
    }

    /// Global opacity applied to every draw, clamped to 0-255.
    pub fn set_alpha(&mut self, alpha: i32) {
        self.alpha = alpha.clamp(0, 0xff) as u32;
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }

    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode = mode;
    }

    pub fn bilinear(&self) -> bool {
        self.bilinear
    }

    pub fn set_bilinear(&mut self, bilinear: bool) {
        self.bilinear = bilinear;
    }

    pub fn edge_clamp(&self) -> EdgeClamp {
        self.edge_clamp
    }

    pub fn set_edge_clamp(&mut self, clamp: EdgeClamp) {
        self.edge_clamp = clamp;
    }

    pub fn font(&self) -> Option<&Arc<CoreFont>> {
        self.font.as_ref()
    }

    pub fn set_font(&mut self, font: Option<Arc<CoreFont>>) {
        self.font = font;
    }

    // Transform

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, t: &Transform) {
        self.transform.set(t);
    }

    /// Reset the current transform to identity. The stack is untouched.
    pub fn identity(&mut self) {
        self.transform.clear();
    }

    pub fn concatenate(&mut self, t: &Transform) {
        self.transform.concatenate(t);
    }

    pub fn translate(&mut self, x: f64, y: f64) {
        self.translate_fixed(fixed::to_fixed_f64(x), fixed::to_fixed_f64(y));
    }

    pub fn translate_fixed(&mut self, fx: i32, fy: i32) {
        self.transform.translate(fx, fy);
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.scale_fixed(fixed::to_fixed_f64(sx), fixed::to_fixed_f64(sy));
    }

    pub fn scale_fixed(&mut self, fx: i32, fy: i32) {
        self.transform.scale(fx, fy);
    }

    /// Rotate by `radians`.
    pub fn rotate(&mut self, radians: f64) {
        self.rotate_fixed(fixed::to_fixed_f64(radians));
    }

    pub fn rotate_fixed(&mut self, angle: i32) {
        self.transform.rotate_angle(angle);
    }

    pub fn shear(&mut self, shx: f64, shy: f64) {
        self.shear_fixed(fixed::to_fixed_f64(shx), fixed::to_fixed_f64(shy));
    }

    pub fn shear_fixed(&mut self, shx: i32, shy: i32) {
        self.transform.shear(shx, shy);
    }

    /// Save the current transform.
    pub fn push_transform(&mut self) {
        self.stack.push(&self.transform);
    }

    /// Restore the most recently pushed transform.
    pub fn pop_transform(&mut self) -> PulpResult<()> {
        self.transform = self.stack.pop()?;
        Ok(())
    }

    pub fn transform_depth(&self) -> usize {
        self.stack.len()
    }

    // Clip

    pub fn clip(&self) -> IntRect {
        self.clip
    }

    /// Replace the clip. The result never extends past the surface.
    pub fn set_clip(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.clip = IntRect::new(x, y, width, height).intersection(&self.surface.bounds());
    }

    /// Intersect the clip with a rectangle; the clip can only shrink.
    pub fn clip_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.clip = self.clip.intersection(&IntRect::new(x, y, width, height));
    }

    pub fn remove_clip(&mut self) {
        self.clip = self.surface.bounds();
    }

    // Helpers shared by the primitive paths.

    pub(super) fn composite(&self) -> &'static dyn Composite {
        self.blend_mode.composite(self.surface.is_opaque())
    }

    /// The premultiplied solid source for color draws, or `None` when drawing cannot change any
    /// destination pixel.
    pub(super) fn solid_source(&self) -> Option<u32> {
        if self.blend_mode == BlendMode::Dst {
            return None;
        }
        let a = mul_div255(alpha(self.color), self.alpha);
        if a == 0 && self.blend_mode.ignores_transparent_source() {
            return None;
        }
        Some(premultiply((self.color & 0x00ff_ffff) | (a << 24)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/graphics.rs"]
mod tests;
