//! Infinite one-sided plane.

use crate::{hit::Geometry, Hit, Material, Ray, EPSILON};
use kdtrace_math::Vec3;

/// An infinite plane through `point`.
///
/// Only rays travelling along the normal (`dot(normal, dir) > EPSILON`)
/// can hit it; back-facing and parallel rays miss.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: Material,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self {
            point,
            normal: normal.normalize(),
            material,
        }
    }
}

impl Geometry for Plane {
    fn intersect(&self, ray: &Ray) -> Hit {
        let denom = self.normal.dot(ray.direction);
        if denom <= EPSILON {
            return Hit::NONE;
        }

        let t = (self.point - ray.origin).dot(self.normal) / denom;
        // Plane behind the origin
        if t < EPSILON {
            return Hit::NONE;
        }

        Hit::new(t, ray.at(t), self.normal)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}
