use bytemuck::{Pod, Zeroable};
use dragview_core::config::{
    CameraConfig, DEFAULT_FAR_PLANE, DEFAULT_FOCUS_LENGTH, DEFAULT_NEAR_PLANE,
    DEFAULT_SCREEN_SIZE, DEFAULT_VIEW_ANGLE,
};
use dragview_core::math::{rotate_about, Basis};
use dragview_core::CoreError;
use glam::{Mat4, Vec3, Vec4};

/// GPU用カメラUniform
/// View / Projection行列を列優先形式で格納
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Eye point, w = 1
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            eye: camera.eye_point().extend(1.0).to_array(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            eye: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Perspective camera driven by an eye point and an orthonormal (u, v, w)
/// basis derived from a look vector and an up hint.
///
/// The basis can be spun about its own axes with [`Camera::rotate_u`],
/// [`Camera::rotate_v`] and [`Camera::rotate_w`], or through absolute slider
/// angles with [`Camera::set_rotation_uvw`].
#[derive(Debug, Clone)]
pub struct Camera {
    eye_point: Vec3,
    basis: Basis,
    look_vector: Vec3,
    up_vector: Vec3,
    view_angle: f32,
    near_plane: f32,
    far_plane: f32,
    screen_width: u32,
    screen_height: u32,
    screen_width_ratio: f32,
    rot_u: f32,
    rot_v: f32,
    rot_w: f32,
}

impl Camera {
    /// Camera at (0, 0, 3) looking at the origin, 60° view angle,
    /// near 0.01, far 10, 200x200 screen.
    pub fn new() -> Self {
        let mut camera = Self {
            eye_point: Vec3::ZERO,
            basis: Basis::default(),
            look_vector: Vec3::NEG_Z,
            up_vector: Vec3::Y,
            view_angle: DEFAULT_VIEW_ANGLE,
            near_plane: DEFAULT_NEAR_PLANE,
            far_plane: DEFAULT_FAR_PLANE,
            screen_width: DEFAULT_SCREEN_SIZE,
            screen_height: DEFAULT_SCREEN_SIZE,
            screen_width_ratio: 1.0,
            rot_u: 0.0,
            rot_v: 0.0,
            rot_w: 0.0,
        };
        camera.reset();
        camera
    }

    /// Build a camera from validated config values.
    pub fn from_config(config: &CameraConfig) -> Result<Self, CoreError> {
        let mut camera = Self::new();
        camera.set_view_angle(config.view_angle)?;
        camera.set_clip_planes(config.near_plane, config.far_plane)?;
        camera.orient(config.eye, config.look, config.up)?;
        Ok(camera)
    }

    /// Restore the default placement, projection and screen size.
    pub fn reset(&mut self) {
        // looking at the origin from the +z axis
        self.eye_point = Vec3::new(0.0, 0.0, DEFAULT_FOCUS_LENGTH);
        self.look_vector = Vec3::NEG_Z;
        self.up_vector = Vec3::Y;
        self.basis = Basis {
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
        };
        self.view_angle = DEFAULT_VIEW_ANGLE;
        self.near_plane = DEFAULT_NEAR_PLANE;
        self.far_plane = DEFAULT_FAR_PLANE;
        self.screen_width = DEFAULT_SCREEN_SIZE;
        self.screen_height = DEFAULT_SCREEN_SIZE;
        self.screen_width_ratio = 1.0;
        self.rot_u = 0.0;
        self.rot_v = 0.0;
        self.rot_w = 0.0;
    }

    // ========================================================================
    // Orientation
    // ========================================================================

    /// Place the eye and rebuild the basis from `look` and `up`.
    /// On a degenerate look/up pair the camera is left untouched.
    pub fn orient(&mut self, eye: Vec3, look: Vec3, up: Vec3) -> Result<(), CoreError> {
        let basis = Basis::from_look_up(look, up)?;
        self.eye_point = eye;
        self.look_vector = look;
        self.up_vector = up;
        self.basis = basis;
        Ok(())
    }

    /// Orient toward a target point.
    pub fn orient_look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) -> Result<(), CoreError> {
        self.orient(eye, target - eye, up)
    }

    /// Rotate v, w and the look vector about u.
    pub fn rotate_u(&mut self, degrees: f32) {
        let axis = self.basis.u;
        self.basis.v = rotate_about(self.basis.v, axis, degrees);
        self.basis.w = rotate_about(self.basis.w, axis, degrees);
        self.look_vector = rotate_about(self.look_vector, axis, degrees);
    }

    /// Rotate u, w and the look vector about v.
    pub fn rotate_v(&mut self, degrees: f32) {
        let axis = self.basis.v;
        self.basis.u = rotate_about(self.basis.u, axis, degrees);
        self.basis.w = rotate_about(self.basis.w, axis, degrees);
        self.look_vector = rotate_about(self.look_vector, axis, degrees);
    }

    /// Roll u and v about w. The angle is negated so a positive value rolls
    /// the image clockwise on screen. The look vector is unaffected.
    pub fn rotate_w(&mut self, degrees: f32) {
        let axis = self.basis.w;
        self.basis.u = rotate_about(self.basis.u, axis, -degrees);
        self.basis.v = rotate_about(self.basis.v, axis, -degrees);
    }

    /// Apply absolute rotation angles (e.g. slider positions).
    ///
    /// Only the difference from the previously applied angles is rotated,
    /// so reporting the same angles twice leaves the basis unchanged.
    pub fn set_rotation_uvw(&mut self, u: f32, v: f32, w: f32) {
        let (diff_u, diff_v, diff_w) = (u - self.rot_u, v - self.rot_v, w - self.rot_w);

        if diff_u != 0.0 {
            self.rotate_u(diff_u);
        }
        if diff_v != 0.0 {
            self.rotate_v(diff_v);
        }
        if diff_w != 0.0 {
            self.rotate_w(diff_w);
        }
        if diff_u != 0.0 || diff_v != 0.0 || diff_w != 0.0 {
            self.basis = self.basis.orthonormalized();
        }

        self.rot_u = u;
        self.rot_v = v;
        self.rot_w = w;
    }

    // ========================================================================
    // Matrices
    // ========================================================================

    /// World to camera space: translate the eye to the origin, then rotate by
    /// the transpose of `[u v w]`.
    pub fn view_matrix(&self) -> Mat4 {
        let Basis { u, v, w } = self.basis;
        let rotation = Mat4::from_cols(
            u.extend(0.0),
            v.extend(0.0),
            w.extend(0.0),
            Vec4::W,
        )
        .transpose();

        rotation * Mat4::from_translation(-self.eye_point)
    }

    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    /// Eye-to-origin translation followed by a rotation by the transpose of
    /// `[v u w]`.
    ///
    /// The column order differs from [`Camera::view_matrix`], and this stage
    /// is not part of [`Camera::projection_matrix`]. The rasterizer expects
    /// exactly this pairing.
    pub fn canonical_frame_matrix(&self) -> Mat4 {
        let Basis { u, v, w } = self.basis;
        let rotation = Mat4::from_cols(
            v.extend(0.0),
            u.extend(0.0),
            w.extend(0.0),
            Vec4::W,
        )
        .transpose();

        rotation * Mat4::from_translation(-self.eye_point)
    }

    /// Scale the far-plane frustum section to unit size.
    ///
    /// Recomputes the width ratio from the current screen dimensions.
    pub fn scale_matrix(&mut self) -> Mat4 {
        self.screen_width_ratio = self.screen_height as f32 / self.screen_width as f32;
        let (half_width, half_height) = self.far_half_extents();

        Mat4::from_scale(Vec3::new(
            1.0 / half_width,
            1.0 / half_height,
            1.0 / self.far_plane,
        ))
    }

    pub fn inverse_scale_matrix(&mut self) -> Mat4 {
        self.scale_matrix().inverse()
    }

    /// Perspective-to-parallel "unhinge" stage, c = -near / far.
    pub fn unhinge_matrix(&self) -> Mat4 {
        let c = -self.near_plane / self.far_plane;
        Mat4::from_cols(
            Vec4::X,
            Vec4::Y,
            Vec4::new(0.0, 0.0, -1.0 / (c + 1.0), -1.0),
            Vec4::new(0.0, 0.0, c / (c + 1.0), 0.0),
        )
    }

    /// `unhinge * scale`. See [`Camera::canonical_frame_matrix`] for the
    /// translate/rotate stage that is kept out of this product.
    pub fn projection_matrix(&self) -> Mat4 {
        let ratio = self.screen_height as f32 / self.screen_width as f32;
        let half_width = (self.view_angle.to_radians() / 2.0).tan() * self.far_plane;
        let half_height = half_width * ratio;
        let scale = Mat4::from_scale(Vec3::new(
            1.0 / half_width,
            1.0 / half_height,
            1.0 / self.far_plane,
        ));

        self.unhinge_matrix() * scale
    }

    /// GPU用のCameraUniformを取得
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform::from_camera(self)
    }

    fn far_half_extents(&self) -> (f32, f32) {
        let half_width = (self.view_angle.to_radians() / 2.0).tan() * self.far_plane;
        (half_width, half_width * self.screen_width_ratio)
    }

    // ========================================================================
    // Projection parameters
    // ========================================================================

    pub fn set_view_angle(&mut self, degrees: f32) -> Result<(), CoreError> {
        if !(degrees > 0.0 && degrees < 180.0) {
            log::warn!("Rejected view angle {degrees}");
            return Err(CoreError::InvalidViewAngle(degrees));
        }
        self.view_angle = degrees;
        Ok(())
    }

    pub fn set_near_plane(&mut self, near: f32) -> Result<(), CoreError> {
        self.set_clip_planes(near, self.far_plane)
    }

    pub fn set_far_plane(&mut self, far: f32) -> Result<(), CoreError> {
        self.set_clip_planes(self.near_plane, far)
    }

    /// Set both planes at once, for moves that would cross the other plane.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) -> Result<(), CoreError> {
        if !(near > 0.0 && near < far) {
            log::warn!("Rejected clip planes near={near} far={far}");
            return Err(CoreError::InvalidClipPlanes { near, far });
        }
        self.near_plane = near;
        self.far_plane = far;
        Ok(())
    }

    /// Record the viewport size. A zero dimension is ignored and the last
    /// valid size stays in effect.
    pub fn set_screen_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring screen size {width}x{height}");
            return;
        }
        self.screen_width = width;
        self.screen_height = height;
        self.screen_width_ratio = height as f32 / width as f32;
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn eye_point(&self) -> Vec3 {
        self.eye_point
    }

    pub fn look_vector(&self) -> Vec3 {
        self.look_vector
    }

    /// The camera's current up axis (`v`), not the up hint passed to `orient`.
    pub fn up_vector(&self) -> Vec3 {
        self.basis.v
    }

    /// The up hint last passed to [`Camera::orient`].
    pub fn up_hint(&self) -> Vec3 {
        self.up_vector
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    pub fn view_angle(&self) -> f32 {
        self.view_angle
    }

    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    /// height / width
    pub fn screen_width_ratio(&self) -> f32 {
        self.screen_width_ratio
    }

    /// Last absolute angles applied through [`Camera::set_rotation_uvw`].
    pub fn rotation_uvw(&self) -> (f32, f32, f32) {
        (self.rot_u, self.rot_v, self.rot_w)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
