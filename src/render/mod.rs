//! The rasterizer: [`Graphics`] draws rectangles, lines, images and bitmap text into a
//! [`PixelBuffer`](crate::surface::pixel_buffer::PixelBuffer).
//!
//! Each primitive lives in its own module as an `impl Graphics` block. All of them reduce to the
//! [`Composite`](crate::composite::Composite) selected by the blend mode and the opacity of the
//! target surface.

mod fill;
pub mod graphics;
mod image;
mod line;
pub mod opts;
mod scan;
mod text;

pub use graphics::Graphics;
pub use opts::GraphicsOpts;
