//! Hit record and the Geometry trait for ray-object intersection.

use crate::{Color, Material, Ray};
use kdtrace_math::Vec3;

/// Record of a ray-surface intersection.
///
/// A miss is represented by [`Hit::NONE`], whose `t` is `+inf`, so the
/// closest of several candidates is simply the one with the smallest `t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub point: Vec3,
    /// Surface normal at the intersection (not flipped toward the ray)
    pub normal: Vec3,
}

impl Hit {
    /// The "no hit" sentinel.
    pub const NONE: Hit = Hit {
        t: f32::INFINITY,
        point: Vec3::ZERO,
        normal: Vec3::ZERO,
    };

    pub fn new(t: f32, point: Vec3, normal: Vec3) -> Self {
        Self { t, point, normal }
    }

    /// True unless this is the sentinel.
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.t < f32::INFINITY
    }

    /// The nearer of two hits. Ties keep `self`.
    #[inline]
    pub fn closer(self, other: Hit) -> Hit {
        if other.t < self.t {
            other
        } else {
            self
        }
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self::NONE
    }
}

/// Anything a ray can be tested against.
///
/// Implementors are built once and shared read-only across render workers.
pub trait Geometry: Send + Sync {
    /// Nearest intersection of `ray` with this object, or [`Hit::NONE`].
    fn intersect(&self, ray: &Ray) -> Hit;

    /// Surface properties used for shading.
    fn material(&self) -> &Material;

    /// Base color of the surface.
    fn color(&self) -> Color {
        self.material().color
    }
}
