//! kdtrace core - mesh data and loading.
//!
//! This crate provides:
//!
//! - **Mesh data**: indexed `Mesh` with optional normals and UVs, procedural
//!   builders, and flattening into `TriangleRecord`s for the renderer
//! - **OBJ support**: loading Wavefront OBJ files via `tobj`
//!
//! # Example
//!
//! ```ignore
//! use kdtrace_core::load_obj;
//!
//! let mesh = load_obj("teapot.obj")?;
//! println!("Loaded {} triangles", mesh.triangle_count());
//! ```

pub mod mesh;
pub mod obj;

// Re-export commonly used types
pub use mesh::{Mesh, TriangleRecord};
pub use obj::{load_obj, LoadError, LoadResult};
