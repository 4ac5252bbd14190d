//! Picking system for ray-sphere intersection
//!
//! Turns a screen pixel into a world-space ray from the eye and tests it
//! against the sphere primitive on the CPU.

use dragview_core::math::Basis;
use dragview_core::{Sphere, SPHERE_RADIUS};
use glam::{Mat4, Vec3};

use crate::camera::Camera;

/// Ray for raycasting
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Ray from the camera eye through a pixel
    pub fn from_pixel(camera: &Camera, pixel_x: f32, pixel_y: f32) -> Self {
        Self {
            origin: camera.eye_point(),
            direction: generate_ray(camera, pixel_x, pixel_y),
        }
    }

    /// World point at parameter `t`
    pub fn point_at(&self, t: f32) -> Vec3 {
        isect_point_world(self.origin, self.direction, t)
    }

    /// Nearest root against the sphere placed by `object_to_world`.
    /// See [`intersect`].
    pub fn intersect_sphere(&self, object_to_world: &Mat4) -> Option<f32> {
        intersect(self.origin, self.direction, object_to_world)
    }
}

/// A ray that struck the sphere in front of the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Ray parameter of the hit, always > 0
    pub t: f32,
    /// World-space hit point
    pub point: Vec3,
}

/// Unit world-space direction from the eye through pixel (`pixel_x`, `pixel_y`).
///
/// The pixel is mapped onto the near-plane rectangle (half extents from the
/// view angle and the near distance). The returned vector has its y component
/// negated because screen y grows downward.
pub fn generate_ray(camera: &Camera, pixel_x: f32, pixel_y: f32) -> Vec3 {
    let eye = camera.eye_point();
    let look = camera.look_vector();
    let near = camera.near_plane();
    let screen_width = camera.screen_width() as f32;
    let screen_height = camera.screen_height() as f32;
    let ratio = screen_height / screen_width;

    let Basis { u, v, .. } =
        Basis::from_look_up(look, camera.up_vector()).unwrap_or_else(|_| camera.basis());

    let half_width = (camera.view_angle().to_radians() / 2.0).tan() * near;
    let half_height = half_width * ratio;

    let q = eye + near * look;
    let a = -half_width + 2.0 * half_width * (pixel_x / screen_width);
    let b = -half_height + 2.0 * half_height * (pixel_y / screen_height);

    let s = q + a * u + b * v;
    let mut direction = (s - eye).normalize();
    direction.y = -direction.y;
    direction
}

/// `eye + t * ray`
pub fn isect_point_world(eye: Vec3, ray: Vec3, t: f32) -> Vec3 {
    eye + t * ray
}

/// Intersect a ray with the radius-0.5 sphere placed by `object_to_world`.
///
/// The eye and direction are taken into object space with the inverse
/// transform. Returns `None` when the discriminant is not positive (a
/// tangent ray is a miss). Otherwise returns the smaller root, which is
/// negative when the sphere is behind the eye; callers need `t > 0` for a
/// real hit.
pub fn intersect(eye: Vec3, ray: Vec3, object_to_world: &Mat4) -> Option<f32> {
    let world_to_object = object_to_world.inverse();
    let origin = world_to_object.transform_point3(eye);
    let direction = world_to_object.transform_vector3(ray);

    let a = direction.dot(direction);
    let b = 2.0 * origin.dot(direction);
    let c = origin.dot(origin) - SPHERE_RADIUS * SPHERE_RADIUS;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant <= 0.0 {
        return None;
    }

    let sqrt_disc = discriminant.sqrt();
    let t1 = (-b + sqrt_disc) / (2.0 * a);
    let t2 = (-b - sqrt_disc) / (2.0 * a);
    Some(t1.min(t2))
}

/// Cast a ray through a pixel and report a hit in front of the eye.
pub fn pick(camera: &Camera, pixel_x: f32, pixel_y: f32, sphere: &Sphere) -> Option<PickHit> {
    let ray = Ray::from_pixel(camera, pixel_x, pixel_y);

    match ray.intersect_sphere(&sphere.object_to_world()) {
        Some(t) if t > 0.0 => {
            let point = ray.point_at(t);
            log::debug!("hit at ({pixel_x}, {pixel_y}): t={t} point={point}");
            Some(PickHit { t, point })
        }
        _ => {
            log::debug!("miss at ({pixel_x}, {pixel_y})");
            None
        }
    }
}
