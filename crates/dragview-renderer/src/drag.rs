//! Drag tracking for the picked sphere
//!
//! A drag starts with a successful pick and freezes the ray parameter `t` of
//! that hit. Each pointer sample then places the grab point at the same
//! distance along the new pixel ray and moves the sphere so the grab offset
//! is kept.

use dragview_core::Sphere;
use glam::Vec3;

use crate::camera::Camera;
use crate::picking::{pick, Ray};

/// State of one drag gesture, from a successful pick to button release.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    dragging: bool,
    /// Sphere centre at the previous sample
    old_center: Vec3,
    /// Grab point at the previous sample
    old_isect_point: Vec3,
    /// Ray parameter of the initial hit
    old_t: f32,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Ray parameter frozen at pick time, while dragging.
    pub fn pick_depth(&self) -> Option<f32> {
        self.dragging.then_some(self.old_t)
    }

    /// Offset from the sphere centre to the grab point, while dragging.
    pub fn grab_offset(&self) -> Option<Vec3> {
        self.dragging
            .then(|| self.old_isect_point - self.old_center)
    }

    /// Try to grab the sphere under the pixel.
    ///
    /// Does nothing while a drag is already running. Returns whether a new
    /// drag started, which requires a hit in front of the eye.
    pub fn begin(&mut self, camera: &Camera, pixel_x: f32, pixel_y: f32, sphere: &Sphere) -> bool {
        if self.dragging {
            return false;
        }

        let Some(hit) = pick(camera, pixel_x, pixel_y, sphere) else {
            return false;
        };

        self.dragging = true;
        self.old_center = sphere.position();
        self.old_isect_point = hit.point;
        self.old_t = hit.t;
        log::info!("Drag started: t={} center={}", hit.t, self.old_center);
        true
    }

    /// Move the sphere to follow the pointer.
    ///
    /// The grab point is placed at the frozen `t` along the new ray and the
    /// sphere centre keeps the offset from the previous sample. Both are then
    /// rebased to this sample, so rounding error can build up over a long
    /// drag. Returns the new centre, or `None` when not dragging.
    pub fn update(
        &mut self,
        camera: &Camera,
        pixel_x: f32,
        pixel_y: f32,
        sphere: &mut Sphere,
    ) -> Option<Vec3> {
        if !self.dragging {
            return None;
        }

        let ray = Ray::from_pixel(camera, pixel_x, pixel_y);
        let isect_point = ray.point_at(self.old_t);
        let offset = self.old_isect_point - self.old_center;
        let center = isect_point - offset;

        sphere.set_position(center);
        self.old_center = center;
        self.old_isect_point = isect_point;

        log::debug!("drag and move: center={center}");
        Some(center)
    }

    /// Finish the gesture. Returns whether a drag was running.
    pub fn end(&mut self) -> bool {
        let was_dragging = self.dragging;
        self.dragging = false;
        if was_dragging {
            log::info!("Drag ended at center={}", self.old_center);
        }
        was_dragging
    }
}
