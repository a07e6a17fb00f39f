//! The demo scene: one mesh among five colored spheres.

use anyhow::{Context, Result};
use kdtrace_core::{load_obj, Mesh};
use kdtrace_renderer::{Camera, Color, Light, Material, MeshGeometry, Scene, Sphere, Vec3};
use std::path::Path;

const EYE: Vec3 = Vec3::new(0.0, 0.0, -4.0);

/// Sphere centers and colors, arranged around the mesh.
const SPHERES: [(Vec3, Color); 5] = [
    (Vec3::new(0.0, 0.0, 5.0), Color::new(0.0, 0.7, 0.0)),
    (Vec3::new(-2.0, -1.5, 3.0), Color::new(0.1, 0.9, 0.7)),
    (Vec3::new(-2.0, 1.5, 5.0), Color::new(0.9, 0.9, 0.1)),
    (Vec3::new(2.0, 1.5, 5.0), Color::new(0.9, 0.1, 0.9)),
    (Vec3::new(2.0, -1.5, 5.0), Color::new(0.2, 0.4, 0.6)),
];

/// Load the mesh at `obj`, or tessellate a sphere when no path is given.
pub fn load_mesh(obj: Option<&Path>) -> Result<Mesh> {
    match obj {
        Some(path) => {
            log::info!("Loading {}", path.display());
            load_obj(path).with_context(|| format!("failed to load {}", path.display()))
        }
        None => {
            log::info!("No mesh given, using a tessellated sphere");
            Ok(Mesh::uv_sphere(Vec3::ZERO, 1.5, 64, 32))
        }
    }
}

/// Build the demo scene around `mesh`.
pub fn build_scene(mesh: &Mesh) -> Result<Scene> {
    let mut scene = Scene::new(Light::new(Vec3::new(-1.0, -2.0, 2.0), 20.0));

    let geometry =
        MeshGeometry::from_mesh(mesh, Material::default()).context("failed to index mesh")?;
    log::info!("Indexed {} triangles", geometry.triangle_count());
    scene.add(geometry);

    for (center, color) in SPHERES {
        scene.add(Sphere::new(center, 1.0, Material::new(color)));
    }

    Ok(scene)
}

/// Camera looking down +Z from behind the scene.
pub fn camera(width: u32, height: u32) -> Camera {
    Camera::new(width, height).with_eye(EYE)
}
