//! Pixel storage and integer rectangles.

pub mod clip;
pub mod pixel_buffer;
