use crate::{Axis, Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for the kd-tree and bounding-volume meshes.
///
/// Stored as a min/max corner pair. Boxes produced by [`crate::bounding_box`]
/// satisfy `min[i] <= max[i]` on every axis; a box may be flat (zero width)
/// on an axis, which is the common case for axis-aligned triangles.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners as given.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Grow this box so it also contains `other`.
    pub fn expand(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Grow this box so it also contains `p`.
    pub fn include_point(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Slab test: the parametric interval over which `r` is inside the box.
    ///
    /// Axes are folded in X, Y, Z order. The lower bound is clamped to 0, so a
    /// box behind the ray comes back with `max < min` or `max < 0`. Rays
    /// parallel to an axis are not special-cased: the reciprocal direction is
    /// a signed infinity and the crossings degenerate on their own.
    pub fn intersect(&self, r: &Ray) -> Interval {
        let inv = r.inverse_direction();

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;
        for axis in Axis::ALL {
            let o = axis.of(r.origin);
            let d = axis.of(inv);
            let t1 = (axis.of(self.min) - o) * d;
            let t2 = (axis.of(self.max) - o) * d;
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }

        Interval::new(tmin.max(0.0), tmax)
    }

    /// True if the ray enters the box at or after its origin.
    pub fn hit(&self, r: &Ray) -> bool {
        let t = self.intersect(r);
        !t.is_empty() && t.max > 0.0
    }

    /// Which side(s) of `point` on `axis` this box reaches.
    ///
    /// Returns `(min <= point, max >= point)`. A box straddling the plane
    /// answers `true` for both.
    pub fn partition(&self, axis: Axis, point: f32) -> (bool, bool) {
        (axis.of(self.min) <= point, axis.of(self.max) >= point)
    }

    /// True if the two boxes share any point (touching counts).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
            && self.max.z >= other.min.z
            && self.min.z <= other.max.z
    }

    /// Extent of the box along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The axis with the longest extent. Ties fall through to Z.
    pub fn longest_axis(&self) -> Axis {
        let s = self.size().abs();
        if s.x > s.y && s.x > s.z {
            Axis::X
        } else if s.y > s.x && s.y > s.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Identity for `expand`: contains nothing.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_aabb_expand() {
        let mut a = Aabb::new(Vec3::ZERO, Vec3::splat(5.0));
        let b = Aabb::new(Vec3::splat(3.0), Vec3::new(10.0, 4.0, 10.0));
        a.expand(&b);

        assert_eq!(a.min, Vec3::ZERO);
        assert_eq!(a.max, Vec3::new(10.0, 5.0, 10.0));

        let mut empty = Aabb::EMPTY;
        empty.expand(&b);
        assert_eq!(empty, b);
    }

    #[test]
    fn test_slab_hit_through_center() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let t = unit_box().intersect(&ray);

        assert_eq!(t.min, 4.0);
        assert_eq!(t.max, 6.0);
        assert!(unit_box().hit(&ray));
    }

    #[test]
    fn test_slab_origin_inside_clamps_to_zero() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = unit_box().intersect(&ray);

        assert_eq!(t.min, 0.0);
        assert_eq!(t.max, 1.0);
    }

    #[test]
    fn test_slab_pointing_away() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), -Vec3::Z);
        let t = unit_box().intersect(&ray);

        assert!(t.max < t.min || t.max < 0.0);
        assert!(!unit_box().hit(&ray));
    }

    #[test]
    fn test_slab_parallel_ray_outside() {
        // Direction has zero X and Y: those slabs become +/- infinity
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        let t = unit_box().intersect(&ray);

        assert!(t.max < t.min);
        assert!(!unit_box().hit(&ray));
    }

    #[test]
    fn test_slab_parallel_ray_inside_slab() {
        let ray = Ray::new(Vec3::new(0.5, 0.5, -3.0), Vec3::Z);
        let t = unit_box().intersect(&ray);

        assert_eq!(t.min, 2.0);
        assert_eq!(t.max, 4.0);
    }

    #[test]
    fn test_slab_flat_box() {
        // Zero-width on Z, like a triangle lying in the z=0 plane
        let flat = Aabb::new(Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, 1.0, 0.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        let t = flat.intersect(&ray);

        assert_eq!(t.min, 2.0);
        assert_eq!(t.max, 2.0);
        assert!(flat.hit(&ray));
    }

    #[test]
    fn test_partition() {
        let aabb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));

        assert_eq!(aabb.partition(Axis::X, 1.0), (true, true));
        assert_eq!(aabb.partition(Axis::Y, -1.0), (false, true));
        assert_eq!(aabb.partition(Axis::Z, 3.0), (true, false));
        // Touching the plane counts for both sides
        assert_eq!(aabb.partition(Axis::X, 2.0), (true, true));
        assert_eq!(aabb.partition(Axis::X, 0.0), (true, true));
    }

    #[test]
    fn test_overlaps() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::splat(1.0), Vec3::splat(2.0));
        let c = Aabb::new(Vec3::splat(1.5), Vec3::splat(2.0));

        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_aabb_centroid() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));
    }

    #[test]
    fn test_aabb_longest_axis() {
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0)).longest_axis(), Axis::X);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0)).longest_axis(), Axis::Y);
        assert_eq!(Aabb::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0)).longest_axis(), Axis::Z);
    }
}
