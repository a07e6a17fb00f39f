//! Scene description and direct-lighting shading.

use crate::{hit::Geometry, Color, Hit, Ray, ALBEDO, EPSILON};
use kdtrace_math::Vec3;
use std::f32::consts::PI;

/// Color returned for rays that hit nothing.
pub const DEFAULT_BACKGROUND: Color = Color::new(0.1, 0.1, 0.1);

/// A directional light infinitely far away.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    /// Direction the light travels in (from the light toward the scene)
    pub direction: Vec3,
    pub intensity: f32,
}

impl Light {
    /// Create a light; `direction` is normalized here.
    pub fn new(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction: direction.normalize(),
            intensity,
        }
    }
}

/// Closest intersection together with the geometry that produced it.
#[derive(Clone, Copy)]
pub struct SceneHit<'a> {
    pub hit: Hit,
    pub geometry: &'a dyn Geometry,
}

/// One light plus every object in the world.
///
/// Read-only once rendering starts; workers share it by reference.
pub struct Scene {
    pub light: Light,
    pub background: Color,
    objects: Vec<Box<dyn Geometry>>,
}

impl Scene {
    pub fn new(light: Light) -> Self {
        Self {
            light,
            background: DEFAULT_BACKGROUND,
            objects: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add an object. Objects are tested in insertion order.
    pub fn add(&mut self, object: impl Geometry + 'static) {
        self.objects.push(Box::new(object));
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest hit over all objects. On equal `t` the earlier object wins.
    pub fn closest_hit(&self, ray: &Ray) -> Option<SceneHit<'_>> {
        let mut closest: Option<SceneHit<'_>> = None;
        for object in &self.objects {
            let hit = object.intersect(ray);
            if hit.is_hit() && closest.map_or(true, |c| hit.t < c.hit.t) {
                closest = Some(SceneHit {
                    hit,
                    geometry: object.as_ref(),
                });
            }
        }
        closest
    }

    /// True if anything blocks the path from `point` toward the light.
    pub fn occluded(&self, point: Vec3, normal: Vec3) -> bool {
        let shadow_ray = Ray::new(point + normal * EPSILON, -self.light.direction);
        self.objects
            .iter()
            .any(|object| object.intersect(&shadow_ray).is_hit())
    }

    /// Radiance arriving along `ray`.
    ///
    /// Lambertian direct light with a hard shadow test; there are no
    /// secondary bounces.
    pub fn trace(&self, ray: &Ray) -> Color {
        let Some(SceneHit { hit, geometry }) = self.closest_hit(ray) else {
            return self.background;
        };

        if self.occluded(hit.point, hit.normal) {
            return Color::ZERO;
        }

        let cos_theta = hit.normal.dot(-self.light.direction).max(0.0);
        geometry.color() * (ALBEDO / PI * self.light.intensity * cos_theta)
    }
}
