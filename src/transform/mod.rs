//! Fixed-point affine transforms and the save/restore stack.

pub mod affine;
pub mod stack;
