//! Bounding volumes computed from point sets.

use thiserror::Error;

use crate::{Aabb, Ray, Vec3};

/// Errors from bounding-volume computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("insufficient input: need at least {required} points, got {count}")]
    InsufficientInput { required: usize, count: usize },
}

/// Result type for bounding-volume computation.
pub type BoundsResult<T> = Result<T, BoundsError>;

/// Tight axis-aligned box around a point set.
///
/// Needs at least two points.
pub fn bounding_box(points: &[Vec3]) -> BoundsResult<Aabb> {
    if points.len() < 2 {
        return Err(BoundsError::InsufficientInput {
            required: 2,
            count: points.len(),
        });
    }

    let mut aabb = Aabb::new(points[0], points[0]);
    for p in &points[1..] {
        aabb.include_point(*p);
    }
    Ok(aabb)
}

/// A sphere enclosing a point set, centered on the points' mean.
///
/// Not minimal: the radius is the distance to the farthest point from the
/// centroid.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Centroid-based bounding sphere. Needs at least one point.
    pub fn from_points(points: &[Vec3]) -> BoundsResult<Self> {
        if points.is_empty() {
            return Err(BoundsError::InsufficientInput {
                required: 1,
                count: 0,
            });
        }

        let inv_n = 1.0 / points.len() as f32;
        let center = points.iter().fold(Vec3::ZERO, |acc, p| acc + *p * inv_n);
        let max_sq = points
            .iter()
            .map(|p| (*p - center).length_squared())
            .fold(0.0f32, f32::max);

        Ok(Self {
            center,
            radius: max_sq.sqrt(),
        })
    }

    /// True if `p` is inside or on the sphere.
    pub fn contains(&self, p: Vec3) -> bool {
        (p - self.center).length_squared() <= self.radius * self.radius
    }

    /// True if the ray reaches the sphere at or after its origin.
    pub fn hit(&self, r: &Ray) -> bool {
        let oc = r.origin - self.center;
        let a = r.direction.length_squared();
        let b = oc.dot(r.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        // Outside and pointing away
        if c > 0.0 && b > 0.0 {
            return false;
        }
        b * b - a * c >= 0.0
    }
}
