//! Triangle meshes as scene geometry.
//!
//! [`MeshGeometry`] indexes its triangles with a [`KdTree`]. [`BoundedMesh`]
//! keeps the older strategy of a single bounding volume in front of an
//! exhaustive search; it is slower but trivially correct, which makes it a
//! useful reference.

use crate::{hit::Geometry, Hit, KdTree, Material, Ray, Triangle};
use kdtrace_core::Mesh;
use kdtrace_math::{bounding_box, Aabb, BoundingSphere, BoundsResult, Vec3};

/// A mesh indexed by a kd-tree.
#[derive(Debug)]
pub struct MeshGeometry {
    tree: KdTree,
    material: Material,
}

impl MeshGeometry {
    /// Build the kd-tree over `triangles`. Fails on an empty triangle list.
    pub fn new(triangles: Vec<Triangle>, material: Material) -> BoundsResult<Self> {
        Ok(Self {
            tree: KdTree::build(triangles)?,
            material,
        })
    }

    /// Triangulate a loaded mesh and index it.
    pub fn from_mesh(mesh: &Mesh, material: Material) -> BoundsResult<Self> {
        Self::new(triangles_from_mesh(mesh, material), material)
    }

    pub fn tree(&self) -> &KdTree {
        &self.tree
    }

    pub fn triangle_count(&self) -> usize {
        self.tree.triangles().len()
    }
}

impl Geometry for MeshGeometry {
    fn intersect(&self, ray: &Ray) -> Hit {
        self.tree.intersect(ray)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// Conservative volume used to reject rays before testing any triangle.
pub trait BoundingVolume: Send + Sync {
    /// True if the ray may reach something inside the volume.
    fn hit(&self, ray: &Ray) -> bool;
}

impl BoundingVolume for Aabb {
    fn hit(&self, ray: &Ray) -> bool {
        Aabb::hit(self, ray)
    }
}

impl BoundingVolume for BoundingSphere {
    fn hit(&self, ray: &Ray) -> bool {
        BoundingSphere::hit(self, ray)
    }
}

/// Triangles behind one bounding volume, searched exhaustively.
#[derive(Debug)]
pub struct BoundedMesh<V> {
    triangles: Vec<Triangle>,
    volume: V,
    material: Material,
}

impl BoundedMesh<Aabb> {
    /// Guard the triangles with their bounding box.
    pub fn with_box(triangles: Vec<Triangle>, material: Material) -> BoundsResult<Self> {
        let volume = bounding_box(&vertices(&triangles))?;
        Ok(Self::new(triangles, volume, material))
    }
}

impl BoundedMesh<BoundingSphere> {
    /// Guard the triangles with a centroid-based bounding sphere.
    pub fn with_sphere(triangles: Vec<Triangle>, material: Material) -> BoundsResult<Self> {
        let volume = BoundingSphere::from_points(&vertices(&triangles))?;
        Ok(Self::new(triangles, volume, material))
    }
}

impl<V: BoundingVolume> BoundedMesh<V> {
    pub fn new(triangles: Vec<Triangle>, volume: V, material: Material) -> Self {
        Self {
            triangles,
            volume,
            material,
        }
    }

    pub fn volume(&self) -> &V {
        &self.volume
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }
}

impl<V: BoundingVolume> Geometry for BoundedMesh<V> {
    fn intersect(&self, ray: &Ray) -> Hit {
        if !self.volume.hit(ray) {
            return Hit::NONE;
        }
        self.triangles
            .iter()
            .map(|t| t.intersect(ray))
            .fold(Hit::NONE, Hit::closer)
    }

    fn material(&self) -> &Material {
        &self.material
    }
}

/// Scene triangles for every valid face of `mesh`.
pub(crate) fn triangles_from_mesh(mesh: &Mesh, material: Material) -> Vec<Triangle> {
    mesh.triangles()
        .iter()
        .map(|record| Triangle::from_record(record, material))
        .collect()
}

fn vertices(triangles: &[Triangle]) -> Vec<Vec3> {
    triangles.iter().flat_map(Triangle::vertices).collect()
}
