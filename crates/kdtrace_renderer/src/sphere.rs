//! Sphere primitive for ray tracing.

use crate::{hit::Geometry, Hit, Material, Ray};
use kdtrace_math::Vec3;

/// An analytic sphere. Tested exhaustively per ray, never indexed.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Geometry for Sphere {
    /// Geometric quadratic solve; expects a unit-length ray direction.
    ///
    /// When the origin is inside the sphere the near root is negative and
    /// is clamped to 0, so the hit is reported at the origin itself.
    fn intersect(&self, ray: &Ray) -> Hit {
        let oc = ray.origin - self.center;
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        // Origin outside the sphere and pointing away from it
        if c > 0.0 && b > 0.0 {
            return Hit::NONE;
        }

        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return Hit::NONE;
        }

        let t = (-b - discriminant.sqrt()).max(0.0);
        let point = ray.at(t);
        Hit::new(t, point, (point - self.center).normalize())
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::ZERO, 1.0, Material::new(Color::splat(0.5)))
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let hit = unit_sphere().intersect(&ray);

        assert_eq!(hit.t, 4.0);
        assert_eq!(hit.point, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        // Pointing away
        assert!(!sphere.intersect(&Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z)).is_hit());
        // Passing beside
        assert!(!sphere.intersect(&Ray::new(Vec3::new(2.0, 0.0, -5.0), Vec3::Z)).is_hit());
    }

    #[test]
    fn test_sphere_origin_inside_clamps_to_zero() {
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::Y);
        let hit = unit_sphere().intersect(&ray);

        assert!(hit.is_hit());
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.point, Vec3::new(0.0, 0.5, 0.0));
        assert!((hit.normal - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_sphere_grazing() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, -5.0), Vec3::Z);
        let hit = unit_sphere().intersect(&ray);

        assert_eq!(hit.t, 5.0);
        assert_eq!(hit.normal, Vec3::X);
    }
}
