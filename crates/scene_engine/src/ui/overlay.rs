//! Debug overlay contract
//!
//! The overlay receives mutable references into live program state and
//! writes edits straight through them during its draw step. The frame loop
//! only hands these out after the scene has been drawn, and the next frame
//! reads the edited values.

use crate::foundation::math::Vec3;
use crate::input::InputEvent;
use crate::render::primitives::camera::FlyCamera;
use crate::render::window::WindowBackend;

/// Smallest uniform scale the overlay will set
pub const MIN_OBJECT_SCALE: f32 = 0.1;

/// Largest uniform scale the overlay will set
pub const MAX_OBJECT_SCALE: f32 = 4.0;

/// Read-only camera readout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTelemetry {
    /// World position
    pub position: Vec3,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
    /// Viewing direction
    pub front: Vec3,
    /// Vertical field of view in degrees
    pub zoom: f32,
    /// Frames per second
    pub fps: f32,
}

impl CameraTelemetry {
    /// Snapshot a camera
    pub fn from_camera(camera: &FlyCamera, fps: f32) -> Self {
        Self {
            position: camera.position(),
            yaw: camera.yaw(),
            pitch: camera.pitch(),
            front: camera.front(),
            zoom: camera.zoom(),
            fps,
        }
    }
}

/// The scene object the overlay edits
#[derive(Debug)]
pub struct ObjectBinding<'a> {
    /// Name shown next to the widgets
    pub label: &'a str,
    /// World position
    pub position: &'a mut Vec3,
    /// Per-axis scale; the overlay edits it uniformly
    pub scale: &'a mut Vec3,
}

/// Live values the overlay may change
#[derive(Debug)]
pub struct OverlayBindings<'a> {
    /// Background clear color
    pub clear_color: &'a mut Vec3,
    /// Edited object, if the scene designates one
    pub object: Option<ObjectBinding<'a>>,
    /// Mouse-look toggle
    pub mouse_look_enabled: &'a mut bool,
}

/// Immediate-mode debug overlay
pub trait DebugOverlay {
    /// See an input event while the overlay is enabled
    fn handle_event(&mut self, event: &InputEvent);

    /// Apply pending edits through `bindings` and present the overlay
    fn draw(
        &mut self,
        window: &mut dyn WindowBackend,
        bindings: OverlayBindings<'_>,
        telemetry: &CameraTelemetry,
    );

    /// Called once when the overlay is turned off
    fn hide(&mut self, _window: &mut dyn WindowBackend) {}
}
