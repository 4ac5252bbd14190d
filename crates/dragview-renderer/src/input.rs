//! Host-facing input events
//!
//! Window toolkits and the browser translate their native events into
//! [`InputEvent`] before handing them to [`crate::viewer::Viewer`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer coordinates are pixels from the top-left corner of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerMoved { x: f32, y: f32 },
    PointerPressed { x: f32, y: f32, button: MouseButton },
    PointerReleased { x: f32, y: f32, button: MouseButton },
    /// Positive `delta_y` scrolls toward the user.
    Wheel { delta_y: f32 },
    KeyReleased { key: char },
    Resized { width: u32, height: u32 },
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The scene changed and a new frame should be drawn
    pub repaint: bool,
}

impl EventResponse {
    pub const IDLE: Self = Self { repaint: false };
    pub const REPAINT: Self = Self { repaint: true };
}
