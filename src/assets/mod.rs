//! Image assets: the PNG codec, sprite-sheet animations and the image cache.

pub mod animated;
pub mod png;
pub mod store;
