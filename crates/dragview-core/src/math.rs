//! Math types and geometric helpers.
//!
//! glam is re-exported so every crate in the workspace uses the same version.

pub use glam::{Mat3, Mat4, Quat, Vec3, Vec4};

use crate::error::CoreError;

/// Squared length below which a vector counts as zero.
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Orthonormal camera basis.
///
/// `u` points right, `v` points up and `w` points backwards, away from the
/// look direction. The basis is right-handed: `u × v = w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl Basis {
    /// Build the basis from a look vector and an up hint.
    ///
    /// `w = -normalize(look)`, `u = normalize(up × w)`, `v = w × u`.
    /// The up hint does not have to be orthogonal to `look`, but it must not
    /// be zero or parallel to it.
    pub fn from_look_up(look: Vec3, up: Vec3) -> Result<Self, CoreError> {
        if look.length_squared() <= DEGENERATE_EPSILON {
            return Err(CoreError::ZeroLookVector);
        }
        let w = -look.normalize();

        let side = up.cross(w);
        if side.length_squared() <= DEGENERATE_EPSILON {
            return Err(CoreError::DegenerateBasis);
        }
        let u = side.normalize();
        let v = w.cross(u);

        Ok(Self { u, v, w })
    }

    /// Gram-Schmidt pass that keeps `w` and rebuilds `u` and `v` around it.
    pub fn orthonormalized(self) -> Self {
        let w = self.w.normalize();
        let u = (self.u - w * self.u.dot(w)).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Unit length, pairwise orthogonal and right-handed within `tolerance`.
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let unit = [self.u, self.v, self.w]
            .iter()
            .all(|axis| (axis.length() - 1.0).abs() <= tolerance);
        let orthogonal = self.u.dot(self.v).abs() <= tolerance
            && self.v.dot(self.w).abs() <= tolerance
            && self.w.dot(self.u).abs() <= tolerance;
        let right_handed = self.u.cross(self.v).abs_diff_eq(self.w, tolerance);

        unit && orthogonal && right_handed
    }
}

impl Default for Basis {
    fn default() -> Self {
        Self {
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        }
    }
}

/// Rotate `vector` about `axis` by `degrees`, right-hand rule.
pub fn rotate_about(vector: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    Quat::from_axis_angle(axis.normalize(), degrees.to_radians()) * vector
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_basis_default_view() {
        let basis = Basis::from_look_up(Vec3::new(0.0, 0.0, -1.0), Vec3::Y).unwrap();
        assert!(basis.u.abs_diff_eq(Vec3::X, EPS));
        assert!(basis.v.abs_diff_eq(Vec3::Y, EPS));
        assert!(basis.w.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn test_basis_orthonormal_for_skewed_inputs() {
        let cases = [
            (Vec3::new(1.0, 2.0, -3.0), Vec3::Y),
            (Vec3::new(-4.0, 0.5, 0.25), Vec3::new(0.3, 1.0, 0.2)),
            (Vec3::new(0.0, -1.0, -0.01), Vec3::Y),
            (Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0)),
        ];

        for (look, up) in cases {
            let basis = Basis::from_look_up(look, up).unwrap();
            assert!(basis.is_orthonormal(1e-4), "look={look} up={up}");
            assert!(basis.w.abs_diff_eq(-look.normalize(), EPS));
        }
    }

    #[test]
    fn test_basis_zero_look() {
        let result = Basis::from_look_up(Vec3::ZERO, Vec3::Y);
        assert!(matches!(result, Err(CoreError::ZeroLookVector)));
    }

    #[test]
    fn test_basis_parallel_up() {
        let result = Basis::from_look_up(Vec3::new(0.0, 3.0, 0.0), Vec3::Y);
        assert!(matches!(result, Err(CoreError::DegenerateBasis)));

        let result = Basis::from_look_up(Vec3::new(0.0, 0.0, -1.0), Vec3::ZERO);
        assert!(matches!(result, Err(CoreError::DegenerateBasis)));
    }

    #[test]
    fn test_orthonormalized_repairs_drift() {
        let drifted = Basis {
            u: Vec3::new(1.0, 0.02, 0.0),
            v: Vec3::new(0.0, 1.01, 0.03),
            w: Vec3::new(0.0, 0.0, 0.99),
        };
        assert!(!drifted.is_orthonormal(1e-4));

        let repaired = drifted.orthonormalized();
        assert!(repaired.is_orthonormal(1e-5));
        assert!(repaired.w.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn test_rotate_about_right_hand() {
        let rotated = rotate_about(Vec3::X, Vec3::Z, 90.0);
        assert!(rotated.abs_diff_eq(Vec3::Y, EPS));

        let rotated = rotate_about(Vec3::Y, Vec3::X, 90.0);
        assert!(rotated.abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn test_rotate_about_unnormalized_axis() {
        let rotated = rotate_about(Vec3::X, Vec3::new(0.0, 0.0, 5.0), -90.0);
        assert!(rotated.abs_diff_eq(-Vec3::Y, EPS));
    }
}
