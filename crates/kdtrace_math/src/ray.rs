use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Rays are plain values: they are copied freely and never aliased.
/// The direction is not required to be unit length, although camera rays
/// are normalized when they are generated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Per-component reciprocal of the direction.
    ///
    /// Zero components become correctly signed infinities, which is what the
    /// slab test relies on for rays parallel to an axis.
    #[inline]
    pub fn inverse_direction(&self) -> Vec3 {
        self.direction.recip()
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}
