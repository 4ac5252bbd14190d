//! Error type shared by the viewer crates.

use thiserror::Error;

/// Errors raised when camera or viewer input would break a geometric invariant.
///
/// A ray missing the sphere is not an error; picking reports it as `None`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("look vector has zero length")]
    ZeroLookVector,

    #[error("up vector is zero or parallel to the look vector")]
    DegenerateBasis,

    #[error("view angle must lie in (0, 180) degrees, got {0}")]
    InvalidViewAngle(f32),

    #[error("clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("screen size must be non-zero, got {width}x{height}")]
    InvalidScreenSize { width: u32, height: u32 },

    #[error("invalid viewer config: {0}")]
    Config(#[from] serde_json::Error),
}
