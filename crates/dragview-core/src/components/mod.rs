pub mod sphere;
pub mod transform;

pub use sphere::{Sphere, SPHERE_RADIUS};
pub use transform::{ModelUniform, Transform};
