//! Wavefront OBJ loading.

use std::path::Path;

use kdtrace_math::Vec3;
use thiserror::Error;

use crate::mesh::Mesh;

/// Errors that can occur while loading geometry.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("OBJ error: {0}")]
    Obj(#[from] tobj::LoadError),

    #[error("No geometry found in {0}")]
    NoGeometry(String),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Load every model of an OBJ file into a single triangulated mesh.
///
/// Faces are triangulated on load. Models that carry no normals get smooth
/// normals computed from their own faces; other models keep theirs.
pub fn load_obj(path: impl AsRef<Path>) -> LoadResult<Mesh> {
    let path = path.as_ref();
    log::info!("Loading mesh from: {:?}", path);

    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        },
    )?;

    let mesh = merge_models(&models)
        .ok_or_else(|| LoadError::NoGeometry(path.display().to_string()))?;
    log::info!(
        "Loaded {} vertices, {} triangles, bounds min={:?} max={:?}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.bounds.min,
        mesh.bounds.max
    );
    Ok(mesh)
}

/// Concatenate tobj models, rebasing indices. `None` if nothing has faces.
fn merge_models(models: &[tobj::Model]) -> Option<Mesh> {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for model in models {
        let mesh = &model.mesh;
        let base = positions.len() as u32;
        let model_positions: Vec<Vec3> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();

        if mesh.normals.len() == mesh.positions.len() {
            normals.extend(
                mesh.normals
                    .chunks_exact(3)
                    .map(|n| Vec3::new(n[0], n[1], n[2])),
            );
        } else {
            log::info!("Computing smooth normals for model '{}'", model.name);
            let mut part = Mesh::new(model_positions.clone(), mesh.indices.clone(), None);
            part.compute_normals();
            normals.extend(part.normals.unwrap_or_default());
        }

        positions.extend(model_positions);
        indices.extend(mesh.indices.iter().map(|i| base + i));
    }

    if indices.len() < 3 {
        return None;
    }

    Some(Mesh::new(positions, indices, Some(normals)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir()
            .join(format!("kdtrace_{name}_{}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_quad_triangulates() {
        init_logger();
        let path = write_temp(
            "quad",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let mesh = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        // No normals in the file: computed, facing +Z
        for n in mesh.normals.as_ref().unwrap() {
            assert!((*n - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_load_with_normals() {
        let path = write_temp(
            "normals",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 -1\nf 1//1 2//1 3//1\n",
        );
        let mesh = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.triangle_count(), 1);
        let triangles = mesh.triangles();
        assert_eq!(triangles[0].normals, [-Vec3::Z; 3]);
    }

    #[test]
    fn test_normals_computed_only_for_models_without_them() {
        init_logger();
        // The first object declares a normal opposite to its winding, the
        // second declares none
        let path = write_temp(
            "mixed",
            "o given\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 -1\nf 1//1 2//1 3//1\n\
             o computed\nv 0 0 2\nv 1 0 2\nv 0 1 2\nf 4 5 6\n",
        );
        let mesh = load_obj(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(mesh.triangle_count(), 2);
        let triangles = mesh.triangles();
        assert_eq!(triangles[0].normals, [-Vec3::Z; 3]);
        for n in triangles[1].normals {
            assert!((n - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_load_without_faces_fails() {
        let path = write_temp("empty", "v 0 0 0\nv 1 0 0\n");
        let result = load_obj(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(LoadError::NoGeometry(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_obj("/nonexistent/kdtrace/missing.obj"),
            Err(LoadError::Obj(_))
        ));
    }
}
