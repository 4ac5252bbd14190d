use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::math::{Mat4, Vec3};

/// World placement of a primitive.
/// Object-to-world is a pure translation by `position`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    /// Create an identity transform (object sits at the world origin)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
        }
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }

    /// Object-to-world matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// World-to-object matrix
    pub fn inverse_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    /// Move by `delta` in world space
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}

/// GPU用モデルUniform (column-major object-to-world matrix)
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::from_transform(&Transform::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_to_matrix_translation() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let expected = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.to_matrix(), expected);
    }

    #[test]
    fn test_inverse_matrix_undoes_translation() {
        let t = Transform::from_position(Vec3::new(-0.5, 4.0, 2.0));
        let product = t.inverse_matrix() * t.to_matrix();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert!(t.inverse_matrix().abs_diff_eq(t.to_matrix().inverse(), 1e-6));
    }

    #[test]
    fn test_translate() {
        let mut t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        t.translate(Vec3::new(0.5, -1.0, 2.0));
        assert_eq!(t.position, Vec3::new(1.5, -1.0, 2.0));
    }

    #[test]
    fn test_model_uniform() {
        let t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        let uniform = ModelUniform::from_transform(&t);
        // column 3 carries the translation
        assert_eq!(uniform.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);
    }
}
