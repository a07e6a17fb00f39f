//! Camera for ray generation.

use crate::Ray;
use kdtrace_math::Vec3;

/// Anything that can turn a pixel coordinate into a primary ray.
///
/// The renderer only depends on this trait, so alternative projections can
/// be dropped in without touching the scheduler.
pub trait RayGenerator: Sync {
    /// Primary ray through pixel `(x, y)`; rows run top to bottom.
    fn ray_for_pixel(&self, x: u32, y: u32) -> Ray;
}

/// Pinhole camera looking down +Z.
///
/// The image plane sits `depth` pixels in front of the eye, so the field
/// of view follows from the ratio of image size to depth.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub width: u32,
    pub height: u32,
    pub depth: f32,
}

impl Camera {
    /// Camera at the origin. Depth defaults to the image width
    /// (roughly a 53 degree horizontal field of view).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::ZERO,
            width,
            height,
            depth: width as f32,
        }
    }

    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    /// Set image resolution. Depth is left unchanged.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(256, 256)
    }
}

impl RayGenerator for Camera {
    fn ray_for_pixel(&self, x: u32, y: u32) -> Ray {
        // Image rows grow downward, world Y grows upward
        let direction = Vec3::new(
            x as f32 - self.width as f32 * 0.5,
            self.height as f32 * 0.5 - y as f32,
            self.depth,
        );
        Ray::new(self.eye, direction.normalize())
    }
}
