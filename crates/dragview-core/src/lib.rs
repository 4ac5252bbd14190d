pub mod components;
pub mod config;
pub mod error;
pub mod math;

// Re-exports
pub use components::{ModelUniform, Sphere, Transform, SPHERE_RADIUS};
pub use config::ViewerConfig;
pub use error::CoreError;
pub use math::Basis;
