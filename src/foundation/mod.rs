pub mod error;
pub mod fixed;
pub mod math;
