//! Fixed-point 2D software rasterizer.
//!
//! Draws into premultiplied-ARGB [`PixelBuffer`]s through a [`Graphics`] context: rectangles,
//! anti-aliased lines, affine-transformed images with nearest or bilinear sampling, and bitmap
//! text, all composited with one of the [`BlendMode`]s. Image assets come from a restricted
//! PNG codec that also carries engine metadata (hotspot, font metrics, animation sequencing).

#![forbid(unsafe_code)]

pub mod assets;
pub mod composite;
pub mod font;
pub mod foundation;
pub mod render;
pub mod surface;
pub mod transform;

pub use assets::animated::{AnimatedImage, AnimationInfo};
pub use assets::png::{DecodedPng, Hotspot, PngMetadata};
pub use assets::store::{ImageStore, ImageStoreOpts};
pub use composite::{BlendMode, Composite, EdgeClamp};
pub use font::{CoreFont, FontMetrics};
pub use foundation::error::{PulpError, PulpResult};
pub use render::{Graphics, GraphicsOpts};
pub use surface::clip::IntRect;
pub use surface::pixel_buffer::PixelBuffer;
pub use transform::affine::Transform;
pub use transform::stack::TransformStack;
