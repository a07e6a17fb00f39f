// Re-export glam for convenience
pub use glam::*;

// kdtrace math types
mod aabb;
mod axis;
mod bounds;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use axis::Axis;
pub use bounds::{bounding_box, BoundingSphere, BoundsError, BoundsResult};
pub use interval::Interval;
pub use ray::Ray;
