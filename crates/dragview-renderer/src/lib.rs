pub mod mesh;
pub mod camera;
pub mod picking;
pub mod drag;
pub mod input;
pub mod viewer;

pub use mesh::{Mesh, Vertex};
pub use camera::{Camera, CameraUniform};
pub use picking::{generate_ray, intersect, isect_point_world, pick, PickHit, Ray};
pub use drag::DragSession;
pub use input::{EventResponse, InputEvent, MouseButton};
pub use viewer::{Frame, PickReport, Viewer};

// Re-export glam types for consistent version usage
pub use glam;
