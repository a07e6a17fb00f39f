//! Mesh geometry representation.
//!
//! This module provides a format-agnostic indexed mesh that can be populated
//! from OBJ files or built procedurally, and flattened into per-triangle
//! records for the renderer.

use kdtrace_math::{Aabb, Vec3};

/// A mesh consisting of vertex positions, optional normals, and triangle indices.
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Vertex positions (one Vec3 per vertex)
    pub positions: Vec<Vec3>,

    /// Vertex normals (optional - will be computed if not provided)
    pub normals: Option<Vec<Vec3>>,

    /// UV coordinates (optional - one [u, v] per vertex)
    pub uvs: Option<Vec<[f32; 2]>>,

    /// Triangle indices (every 3 indices form a triangle)
    pub indices: Vec<u32>,

    /// Axis-aligned bounding box
    pub bounds: Aabb,
}

/// One triangle flattened out of a [`Mesh`].
///
/// Normals are always usable: any vertex without a normal (missing or zero)
/// carries the flat face normal instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleRecord {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
    pub uvs: Option<[[f32; 2]; 3]>,
}

impl TriangleRecord {
    /// Unit face normal from the winding `p0 -> p1 -> p2`.
    pub fn face_normal(positions: &[Vec3; 3]) -> Vec3 {
        let edge1 = positions[1] - positions[0];
        let edge2 = positions[2] - positions[0];
        edge1.cross(edge2).normalize_or_zero()
    }
}

impl Mesh {
    /// Create a new mesh from positions and indices, optionally with normals.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, normals: Option<Vec<Vec3>>) -> Self {
        let bounds = Self::compute_bounds(&positions);
        Self {
            positions,
            normals,
            uvs: None,
            indices,
            bounds,
        }
    }

    /// Create a new mesh with UV coordinates.
    pub fn new_with_uvs(
        positions: Vec<Vec3>,
        indices: Vec<u32>,
        normals: Option<Vec<Vec3>>,
        uvs: Option<Vec<[f32; 2]>>,
    ) -> Self {
        let bounds = Self::compute_bounds(&positions);
        Self {
            positions,
            normals,
            uvs,
            indices,
            bounds,
        }
    }

    /// Latitude/longitude sphere with smooth normals.
    ///
    /// `segments` slices around Y, `rings` stacks from pole to pole.
    pub fn uv_sphere(center: Vec3, radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut uvs = Vec::new();
        for ring in 0..=rings {
            let v = ring as f32 / rings as f32;
            let theta = v * std::f32::consts::PI;
            for seg in 0..=segments {
                let u = seg as f32 / segments as f32;
                let phi = u * std::f32::consts::TAU;
                let n = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                positions.push(center + n * radius);
                normals.push(n);
                uvs.push([u, v]);
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::new();
        for ring in 0..rings {
            for seg in 0..segments {
                let a = ring * stride + seg;
                let b = a + stride;
                // Skip the zero-area triangles that collapse at the poles
                if ring != 0 {
                    indices.extend_from_slice(&[a, a + 1, b]);
                }
                if ring != rings - 1 {
                    indices.extend_from_slice(&[a + 1, b + 1, b]);
                }
            }
        }

        Self::new_with_uvs(positions, indices, Some(normals), Some(uvs))
    }

    /// Compute axis-aligned bounding box from positions.
    fn compute_bounds(positions: &[Vec3]) -> Aabb {
        positions.iter().fold(Aabb::EMPTY, |mut acc, p| {
            acc.include_point(*p);
            acc
        })
    }

    /// Compute smooth vertex normals by averaging face normals.
    ///
    /// Each vertex normal is the normalized sum of the (area-weighted) face
    /// normals of the faces sharing that vertex. Vertices used by no face
    /// get a zero normal, which triangle extraction later backfills.
    pub fn compute_normals(&mut self) {
        let vertex_count = self.positions.len();
        let mut normals = vec![Vec3::ZERO; vertex_count];

        for face in self.indices.chunks_exact(3) {
            let i0 = face[0] as usize;
            let i1 = face[1] as usize;
            let i2 = face[2] as usize;

            if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
                continue;
            }

            let edge1 = self.positions[i1] - self.positions[i0];
            let edge2 = self.positions[i2] - self.positions[i0];
            let face_normal = edge1.cross(edge2);

            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = Some(normals);
    }

    /// Get the number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Get the number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Flatten the indexed mesh into triangle records.
    ///
    /// Faces referencing a vertex that does not exist are skipped with a
    /// warning. Vertex normals that are missing or zero are replaced by the
    /// face normal so that every record is ready for intersection.
    pub fn triangles(&self) -> Vec<TriangleRecord> {
        let mut triangles = Vec::with_capacity(self.triangle_count());
        let vertex_count = self.positions.len();

        for chunk in self.indices.chunks_exact(3) {
            let idx = [chunk[0] as usize, chunk[1] as usize, chunk[2] as usize];

            if idx.iter().any(|&i| i >= vertex_count) {
                log::warn!(
                    "Invalid triangle indices: {:?}, vertex count: {}",
                    idx,
                    vertex_count
                );
                continue;
            }

            let positions = idx.map(|i| self.positions[i]);
            let face_normal = TriangleRecord::face_normal(&positions);

            let normals = idx.map(|i| {
                let n = self
                    .normals
                    .as_ref()
                    .and_then(|normals| normals.get(i).copied())
                    .unwrap_or(Vec3::ZERO);
                if n == Vec3::ZERO {
                    face_normal
                } else {
                    n
                }
            });

            let uvs = self.uvs.as_ref().and_then(|uvs| {
                let get = |i: usize| uvs.get(i).copied();
                Some([get(idx[0])?, get(idx[1])?, get(idx[2])?])
            });

            triangles.push(TriangleRecord {
                positions,
                normals,
                uvs,
            });
        }

        triangles
    }
}
