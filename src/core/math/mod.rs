//! Scaled coordinate constants and basic vector math shared across the kernel.

mod base_math;
mod point;
mod vector2;

pub use base_math::*;
pub use point::*;
pub use vector2::*;
