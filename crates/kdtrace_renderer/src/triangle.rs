//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection and
//! returns smooth (interpolated) vertex normals.

use crate::{hit::Geometry, Hit, Material, Ray, EPSILON};
use kdtrace_core::TriangleRecord;
use kdtrace_math::{Aabb, Vec3};

/// Below this |determinant| the ray is treated as parallel to the triangle.
const DET_EPSILON: f32 = 1e-8;

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// Vertices
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Vertex normals, never zero once constructed
    normals: [Vec3; 3],
    /// Texture coordinates, carried through from the mesh
    uvs: Option<[[f32; 2]; 3]>,
    material: Material,
}

impl Triangle {
    /// Create a triangle with per-vertex normals.
    ///
    /// Any zero normal is replaced by the flat face normal here, once, so
    /// intersection never has to check for it.
    pub fn new(positions: [Vec3; 3], normals: [Vec3; 3], material: Material) -> Self {
        let [v0, v1, v2] = positions;
        let face_normal = TriangleRecord::face_normal(&positions);
        let normals = normals.map(|n| if n == Vec3::ZERO { face_normal } else { n });

        Self {
            v0,
            v1,
            v2,
            normals,
            uvs: None,
            material,
        }
    }

    /// Create a flat-shaded triangle from three vertices.
    pub fn flat(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        Self::new([v0, v1, v2], [Vec3::ZERO; 3], material)
    }

    /// Create a triangle from a mesh record.
    pub fn from_record(record: &TriangleRecord, material: Material) -> Self {
        let mut triangle = Self::new(record.positions, record.normals, material);
        triangle.uvs = record.uvs;
        triangle
    }

    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    pub fn normals(&self) -> [Vec3; 3] {
        self.normals
    }

    pub fn uvs(&self) -> Option<[[f32; 2]; 3]> {
        self.uvs
    }

    /// Bounding box of the three vertices (not cached).
    pub fn bounding_box(&self) -> Aabb {
        Aabb::new(
            self.v0.min(self.v1).min(self.v2),
            self.v0.max(self.v1).max(self.v2),
        )
    }

    /// Mean of the three vertices.
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Normal at `p` interpolated from the vertex normals.
    ///
    /// Barycentric weights come from the area ratios of `p` projected onto
    /// the two edges leaving `v0`.
    pub fn interpolated_normal(&self, p: Vec3) -> Vec3 {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        let w = p - self.v0;

        let d00 = e1.dot(e1);
        let d01 = e1.dot(e2);
        let d11 = e2.dot(e2);
        let d20 = w.dot(e1);
        let d21 = w.dot(e2);
        let denom = d00 * d11 - d01 * d01;

        let b1 = (d11 * d20 - d01 * d21) / denom;
        let b2 = (d00 * d21 - d01 * d20) / denom;
        let b0 = 1.0 - b1 - b2;

        (self.normals[0] * b0 + self.normals[1] * b1 + self.normals[2] * b2).normalize()
    }
}

impl Geometry for Triangle {
    /// Möller-Trumbore ray-triangle intersection algorithm.
    ///
    /// Both faces are hittable. Hits at or behind the ray origin
    /// (`t <= EPSILON`) are rejected.
    fn intersect(&self, ray: &Ray) -> Hit {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let p = ray.direction.cross(edge2);
        let det = edge1.dot(p);

        // Ray is parallel to (or lies in) the triangle's plane
        if det.abs() < DET_EPSILON {
            return Hit::NONE;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - self.v0;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return Hit::NONE;
        }

        let q = s.cross(edge1);
        let v = ray.direction.dot(q) * inv_det;
        if !(0.0..=1.0).contains(&v) || u + v > 1.0 {
            return Hit::NONE;
        }

        let t = edge2.dot(q) * inv_det;
        if t <= EPSILON {
            return Hit::NONE;
        }

        let point = ray.at(t);
        Hit::new(t, point, self.interpolated_normal(point))
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn grey() -> Material {
        Material::new(Color::splat(0.5))
    }

    /// Triangle in the z=0 plane around the origin.
    fn unit_triangle() -> Triangle {
        Triangle::flat(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            grey(),
        )
    }

    #[test]
    fn test_triangle_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        let hit = unit_triangle().intersect(&ray);

        assert!(hit.is_hit());
        assert!((hit.t - 1.0).abs() < 1e-6);
        assert!(hit.point.length() < 1e-6);
    }

    #[test]
    fn test_triangle_hit_from_behind() {
        // No culling: the back face is hit too
        let ray = Ray::new(Vec3::new(0.0, 0.0, 2.0), -Vec3::Z);
        let hit = unit_triangle().intersect(&ray);

        assert!((hit.t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_miss() {
        let tri = unit_triangle();

        // Pointing away
        assert!(!tri.intersect(&Ray::new(Vec3::new(0.0, 0.0, -1.0), -Vec3::Z)).is_hit());
        // Passing beside the triangle
        assert!(!tri.intersect(&Ray::new(Vec3::new(2.0, 0.0, -1.0), Vec3::Z)).is_hit());
        // Outside across the u + v > 1 edge
        assert!(!tri.intersect(&Ray::new(Vec3::new(0.9, 0.9, -1.0), Vec3::Z)).is_hit());
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert!(!unit_triangle().intersect(&ray).is_hit());
    }

    #[test]
    fn test_triangle_rejects_hit_at_origin() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!unit_triangle().intersect(&ray).is_hit());
    }

    #[test]
    fn test_zero_normals_backfilled() {
        let tri = unit_triangle();
        for n in tri.normals() {
            assert_eq!(n, Vec3::Z);
        }
        let hit = tri.intersect(&Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::Z));
        assert!((hit.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_interpolated_normal() {
        let n0 = Vec3::new(-1.0, 0.0, 1.0).normalize();
        let n1 = Vec3::new(1.0, 0.0, 1.0).normalize();
        let tri = Triangle::new(
            [
                Vec3::new(-1.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            [n0, n1, Vec3::Z],
            grey(),
        );

        // At a vertex the normal is that vertex's normal
        assert!((tri.interpolated_normal(Vec3::new(-1.0, 0.0, 0.0)) - n0).length() < 1e-5);

        // Halfway along the v0-v1 edge the X components cancel
        let mid = tri.interpolated_normal(Vec3::ZERO);
        assert!(mid.x.abs() < 1e-6);
        assert!((mid - Vec3::Z).length() < 1e-5);
    }

    #[test]
    fn test_bounding_box_and_centroid() {
        let tri = unit_triangle();
        let bbox = tri.bounding_box();

        assert_eq!(bbox.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(bbox.max, Vec3::new(1.0, 1.0, 0.0));
        assert!((tri.centroid() - Vec3::new(0.0, -1.0 / 3.0, 0.0)).length() < 1e-6);
    }
}
