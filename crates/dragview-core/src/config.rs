//! Viewer configuration
//!
//! Loaded from JSON. Every section uses `#[serde(default)]`, so a partial
//! document only overrides the fields it names.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::math::{Basis, Vec3};

/// Distance from the eye to the origin in the default camera placement.
pub const DEFAULT_FOCUS_LENGTH: f32 = 3.0;
/// Default vertical field of view in degrees.
pub const DEFAULT_VIEW_ANGLE: f32 = 60.0;
pub const DEFAULT_NEAR_PLANE: f32 = 0.01;
pub const DEFAULT_FAR_PLANE: f32 = 10.0;
/// Screen size assumed until the host reports a real viewport.
pub const DEFAULT_SCREEN_SIZE: u32 = 200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub look: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub view_angle: f32,
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, DEFAULT_FOCUS_LENGTH),
            look: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            view_angle: DEFAULT_VIEW_ANGLE,
            near_plane: DEFAULT_NEAR_PLANE,
            far_plane: DEFAULT_FAR_PLANE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_SIZE,
            height: DEFAULT_SCREEN_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub position: Vec3,
}

/// Step sizes for keyboard and wheel camera nudges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub key_step: f32,
    pub wheel_step: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            key_step: 0.05,
            wheel_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraConfig,
    pub screen: ScreenConfig,
    pub sphere: SphereConfig,
    pub controls: ControlsConfig,
    pub wireframe: bool,
}

impl ViewerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded viewer config: eye={} view_angle={} screen={}x{}",
            config.camera.eye,
            config.camera.view_angle,
            config.screen.width,
            config.screen.height
        );
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the camera and screen invariants.
    pub fn validate(&self) -> Result<(), CoreError> {
        let camera = &self.camera;
        Basis::from_look_up(camera.look, camera.up)?;

        if !(camera.view_angle > 0.0 && camera.view_angle < 180.0) {
            return Err(CoreError::InvalidViewAngle(camera.view_angle));
        }
        if !(camera.near_plane > 0.0 && camera.near_plane < camera.far_plane) {
            return Err(CoreError::InvalidClipPlanes {
                near: camera.near_plane,
                far: camera.far_plane,
            });
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(CoreError::InvalidScreenSize {
                width: self.screen.width,
                height: self.screen.height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.camera.eye, Vec3::new(0.0, 0.0, 3.0));
        assert_eq!(config.screen.width, 200);
        assert!(!config.wireframe);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "camera": { "view_angle": 45.0 }, "wireframe": true }"#;
        let config = ViewerConfig::from_json_str(json).unwrap();

        assert_eq!(config.camera.view_angle, 45.0);
        assert!(config.wireframe);
        // untouched fields keep their defaults
        assert_eq!(config.camera.near_plane, DEFAULT_NEAR_PLANE);
        assert_eq!(config.controls.key_step, 0.05);
        assert_eq!(config.sphere.position, Vec3::ZERO);
    }

    #[test]
    fn test_vectors_as_arrays() {
        let json = r#"{ "sphere": { "position": [1.0, -2.0, 0.5] } }"#;
        let config = ViewerConfig::from_json_str(json).unwrap();
        assert_eq!(config.sphere.position, Vec3::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn test_json_output_reloads() {
        let mut config = ViewerConfig::default();
        config.screen.width = 640;
        config.screen.height = 480;

        let json = config.to_json_string().unwrap();
        let reloaded = ViewerConfig::from_json_str(&json).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_rejects_bad_clip_planes() {
        let json = r#"{ "camera": { "near_plane": 5.0, "far_plane": 1.0 } }"#;
        let result = ViewerConfig::from_json_str(json);
        assert!(matches!(
            result,
            Err(CoreError::InvalidClipPlanes { near, far }) if near == 5.0 && far == 1.0
        ));
    }

    #[test]
    fn test_rejects_parallel_up() {
        let json = r#"{ "camera": { "look": [0.0, 1.0, 0.0] } }"#;
        let result = ViewerConfig::from_json_str(json);
        assert!(matches!(result, Err(CoreError::DegenerateBasis)));
    }

    #[test]
    fn test_rejects_bad_view_angle() {
        let mut config = ViewerConfig::default();
        config.camera.view_angle = 0.0;
        assert!(matches!(config.validate(), Err(CoreError::InvalidViewAngle(_))));
    }

    #[test]
    fn test_rejects_zero_screen() {
        let json = r#"{ "screen": { "width": 0 } }"#;
        let result = ViewerConfig::from_json_str(json);
        assert!(matches!(result, Err(CoreError::InvalidScreenSize { width: 0, .. })));
    }

    #[test]
    fn test_malformed_json() {
        let result = ViewerConfig::from_json_str("{ camera: ");
        assert!(matches!(result, Err(CoreError::Config(_))));
    }
}
