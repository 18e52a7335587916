//! 2D geometry shared by the board model and the cloner.

mod bbox;
mod point;

pub use bbox::BoundingBox;
pub use point::{normalize_angle, Point};
