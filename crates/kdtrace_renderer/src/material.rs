//! Surface properties carried by every geometry.

use kdtrace_math::Vec3;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Fraction of incident light a diffuse surface reflects.
pub const ALBEDO: f32 = 0.18;

/// Recursion limit for secondary rays. Shading is single-bounce today, so
/// nothing reads past depth 0.
pub const MAX_DEPTH: u32 = 2;

/// Base color plus the transparency and reflection scalars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub transparency: f32,
    pub reflection: f32,
}

impl Material {
    /// Opaque, non-reflective material of the given color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            transparency: 0.0,
            reflection: 0.0,
        }
    }

    pub fn with_transparency(mut self, transparency: f32) -> Self {
        self.transparency = transparency;
        self
    }

    pub fn with_reflection(mut self, reflection: f32) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.transparency > 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        // Matches the mesh tint used by the demo scene
        Self::new(Color::new(0.1, 0.7, 0.9))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_builders() {
        let m = Material::new(Color::ONE)
            .with_transparency(0.5)
            .with_reflection(0.25);

        assert!(m.is_transparent());
        assert_eq!(m.reflection, 0.25);
        assert!(!Material::new(Color::ONE).is_transparent());
    }
}
