//! Platform-agnostic viewer state
//!
//! Owns the camera, the sphere and the drag session and turns host input
//! events into camera moves, picks and drags. Hosts call
//! [`Viewer::handle_event`] for each event and [`Viewer::frame`] once per
//! redraw.

use dragview_core::config::ControlsConfig;
use dragview_core::{CoreError, ModelUniform, Sphere, ViewerConfig};
use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::camera::{Camera, CameraUniform};
use crate::drag::DragSession;
use crate::input::{EventResponse, InputEvent, MouseButton};
use crate::picking::pick;

/// Result of casting a ray through the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PickReport {
    pub hit: bool,
    /// Ray parameter of the hit
    pub t: Option<f32>,
    /// World-space hit point
    pub point: Option<[f32; 3]>,
    /// Pointer pixel the ray went through
    pub pixel: [f32; 2],
}

/// Everything a renderer needs for one redraw.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub uniform: CameraUniform,
    pub sphere_model: ModelUniform,
    /// `Some` while ray casting is switched on
    pub pick: Option<PickReport>,
    pub wireframe: bool,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    camera: Camera,
    sphere: Sphere,
    drag: DragSession,
    cast_ray: bool,
    pointer: Vec2,
    eye_position: Vec3,
    controls: ControlsConfig,
    wireframe: bool,
}

impl Viewer {
    /// Default camera and a sphere at the origin.
    pub fn new() -> Self {
        let camera = Camera::new();
        Self {
            eye_position: camera.eye_point(),
            camera,
            sphere: Sphere::default(),
            drag: DragSession::new(),
            cast_ray: false,
            pointer: Vec2::ZERO,
            controls: ControlsConfig::default(),
            wireframe: false,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Result<Self, CoreError> {
        config.validate()?;

        let mut camera = Camera::from_config(&config.camera)?;
        camera.set_screen_size(config.screen.width, config.screen.height);

        Ok(Self {
            eye_position: camera.eye_point(),
            camera,
            sphere: Sphere::new(config.sphere.position),
            drag: DragSession::new(),
            cast_ray: false,
            pointer: Vec2::ZERO,
            controls: config.controls.clone(),
            wireframe: config.wireframe,
        })
    }

    // ========================================================================
    // Events
    // ========================================================================

    pub fn handle_event(&mut self, event: InputEvent) -> EventResponse {
        match event {
            InputEvent::PointerMoved { x, y } => {
                self.pointer = Vec2::new(x, y);
                let moved = self.update_drag(x, y).is_some();
                // the pick report follows the pointer
                if moved || self.cast_ray {
                    EventResponse::REPAINT
                } else {
                    EventResponse::IDLE
                }
            }
            InputEvent::PointerPressed { x, y, button } => {
                self.pointer = Vec2::new(x, y);
                match button {
                    MouseButton::Left => {
                        self.cast_ray = true;
                        EventResponse::REPAINT
                    }
                    MouseButton::Right => {
                        if self.begin_pick(x, y) {
                            EventResponse::REPAINT
                        } else {
                            EventResponse::IDLE
                        }
                    }
                    MouseButton::Middle => EventResponse::IDLE,
                }
            }
            InputEvent::PointerReleased { x, y, button } => {
                self.pointer = Vec2::new(x, y);
                match button {
                    MouseButton::Left => {
                        self.cast_ray = false;
                        EventResponse::REPAINT
                    }
                    MouseButton::Right => {
                        if self.end_drag() {
                            EventResponse::REPAINT
                        } else {
                            EventResponse::IDLE
                        }
                    }
                    MouseButton::Middle => EventResponse::IDLE,
                }
            }
            InputEvent::Wheel { delta_y } => {
                self.eye_position.z += delta_y * -self.controls.wheel_step;
                self.sync_camera();
                EventResponse::REPAINT
            }
            InputEvent::KeyReleased { key } => {
                let step = self.controls.key_step;
                match key.to_ascii_lowercase() {
                    'w' => self.eye_position.y += step,
                    'a' => self.eye_position.x += step,
                    's' => self.eye_position.y -= step,
                    'd' => self.eye_position.x -= step,
                    _ => return EventResponse::IDLE,
                }
                self.sync_camera();
                EventResponse::REPAINT
            }
            InputEvent::Resized { width, height } => {
                self.camera.set_screen_size(width, height);
                EventResponse::REPAINT
            }
        }
    }

    /// Start dragging the sphere if the pixel ray hits it.
    pub fn begin_pick(&mut self, pixel_x: f32, pixel_y: f32) -> bool {
        self.drag.begin(&self.camera, pixel_x, pixel_y, &self.sphere)
    }

    /// Move the sphere with the pointer while dragging.
    pub fn update_drag(&mut self, pixel_x: f32, pixel_y: f32) -> Option<Vec3> {
        self.drag
            .update(&self.camera, pixel_x, pixel_y, &mut self.sphere)
    }

    pub fn end_drag(&mut self) -> bool {
        self.drag.end()
    }

    // ========================================================================
    // Frame
    // ========================================================================

    /// Recompute the camera basis and collect the per-frame uniforms.
    pub fn frame(&mut self) -> Frame {
        self.sync_camera();

        Frame {
            uniform: self.camera.uniform(),
            sphere_model: ModelUniform::from_transform(&self.sphere.transform),
            pick: self.cast_ray.then(|| self.pick_report()),
            wireframe: self.wireframe,
        }
    }

    /// Cast a ray through the current pointer position.
    pub fn pick_report(&self) -> PickReport {
        let Vec2 { x, y } = self.pointer;
        let hit = pick(&self.camera, x, y, &self.sphere);
        PickReport {
            hit: hit.is_some(),
            t: hit.map(|hit| hit.t),
            point: hit.map(|hit| hit.point.to_array()),
            pixel: [x, y],
        }
    }

    /// Re-orient from the eye position, keeping the current look and up axes.
    fn sync_camera(&mut self) {
        let look = self.camera.look_vector();
        let up = self.camera.up_vector();
        if let Err(err) = self.camera.orient(self.eye_position, look, up) {
            log::warn!("Camera re-orient failed: {err}");
        }
    }

    // ========================================================================
    // Camera controls
    // ========================================================================

    /// Absolute rotation angles in degrees about u, v and w.
    pub fn set_rotation(&mut self, u: f32, v: f32, w: f32) {
        self.camera.set_rotation_uvw(u, v, w);
    }

    pub fn set_view_angle(&mut self, degrees: f32) -> Result<(), CoreError> {
        self.camera.set_view_angle(degrees)
    }

    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> Result<(), CoreError> {
        self.camera.set_clip_planes(near, far)
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    pub fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_casting_ray(&self) -> bool {
        self.cast_ray
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}
