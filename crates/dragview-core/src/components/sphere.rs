use crate::components::Transform;
use crate::math::{Mat4, Vec3};

/// Object-space radius of the pickable sphere.
pub const SPHERE_RADIUS: f32 = 0.5;

/// The single pickable primitive: a sphere of radius [`SPHERE_RADIUS`]
/// centred on its transform's position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sphere {
    pub transform: Transform,
}

impl Sphere {
    pub fn new(position: Vec3) -> Self {
        Self {
            transform: Transform::from_position(position),
        }
    }

    pub fn radius(&self) -> f32 {
        SPHERE_RADIUS
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    pub fn object_to_world(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Signed distance from `point` to the surface (negative inside).
    pub fn surface_distance(&self, point: Vec3) -> f32 {
        (point - self.position()).length() - SPHERE_RADIUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_at_origin() {
        let sphere = Sphere::default();
        assert_eq!(sphere.position(), Vec3::ZERO);
        assert_eq!(sphere.radius(), 0.5);
        assert_eq!(sphere.object_to_world(), Mat4::IDENTITY);
    }

    #[test]
    fn test_set_position() {
        let mut sphere = Sphere::new(Vec3::new(1.0, 1.0, 1.0));
        sphere.set_position(Vec3::new(0.0, 2.0, -1.0));
        assert_eq!(sphere.position(), Vec3::new(0.0, 2.0, -1.0));
        assert_eq!(
            sphere.object_to_world(),
            Mat4::from_translation(Vec3::new(0.0, 2.0, -1.0))
        );
    }

    #[test]
    fn test_surface_distance() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -2.0));
        assert!(sphere.surface_distance(Vec3::new(0.0, 0.0, -1.5)).abs() < 1e-6);
        assert!(sphere.surface_distance(Vec3::new(0.0, 0.0, -2.0)) < 0.0);
        assert!((sphere.surface_distance(Vec3::new(0.0, 0.0, 0.0)) - 1.5).abs() < 1e-6);
    }
}
