//! kdtrace renderer - direct-lighting CPU ray tracer
//!
//! Triangle meshes are indexed by a kd-tree; spheres and planes are tested
//! exhaustively. The image is split into buckets that are shaded in
//! parallel with rayon and assembled into a single buffer.

mod bucket;
mod camera;
mod error;
mod hit;
mod kdtree;
mod material;
mod mesh;
mod output;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, RayGenerator};
pub use error::{RenderError, RenderResult};
pub use hit::{Geometry, Hit};
pub use kdtree::{KdNode, KdTree, KdTreeStats};
pub use material::{Color, Material, ALBEDO, MAX_DEPTH};
pub use mesh::{BoundedMesh, BoundingVolume, MeshGeometry};
pub use output::{
    color_to_rgba, gamma_to_linear, linear_to_gamma, linear_to_srgb, save_png, srgb_to_linear,
};
pub use plane::Plane;
pub use renderer::{
    render, render_pixel, render_serial, ImageBuffer, NoProgress, ProgressSink, RenderConfig,
};
pub use scene::{Light, Scene, SceneHit, DEFAULT_BACKGROUND};
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export math types from kdtrace_math
pub use kdtrace_math::{Aabb, Interval, Ray, Vec3};

/// Tolerance for hit rejection near the ray origin, the one-sided plane
/// test and the shadow-ray offset.
pub const EPSILON: f32 = 1e-4;
