//! Basic geometry primitives for grid computations.

pub mod extent;
pub mod matrix;
pub mod point;

pub use extent::Extent;
pub use matrix::Matrix2;
pub use point::{distance, Point, Vector};
