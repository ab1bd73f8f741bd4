//! Program state
//!
//! [`ProgramState`] is the one mutable state object of a running viewer:
//! camera, clear color and the overlay/mouse-look flags. It is owned by the
//! frame loop and passed by reference to whatever needs it. The subset that
//! survives restarts is [`PersistedState`].

pub mod persisted;

pub use persisted::PersistedState;

use crate::core::CameraSettings;
use crate::foundation::math::Vec3;
use crate::input::CursorMode;
use crate::render::primitives::camera::{CameraBasis, FlyCamera};

/// Live state shared by input handling, rendering and the overlay
#[derive(Debug, Clone)]
pub struct ProgramState {
    /// Background clear color
    pub clear_color: Vec3,
    /// Debug overlay visible
    pub overlay_enabled: bool,
    /// Cursor motion turns the camera
    pub mouse_look_enabled: bool,
    /// The fly camera
    pub camera: FlyCamera,
}

impl ProgramState {
    /// Persisted defaults derived from the configured camera start pose
    pub fn persisted_defaults(settings: &CameraSettings) -> PersistedState {
        let world_up = Vec3::y();
        PersistedState {
            camera_position: settings.start_position,
            camera_front: CameraBasis::from_angles(settings.yaw, settings.pitch, world_up).front,
            ..PersistedState::default()
        }
    }

    /// Build live state from what was saved last run
    ///
    /// An overlay that was open at shutdown comes back open, with mouse-look
    /// off just as if it had been toggled on.
    pub fn from_persisted(persisted: &PersistedState, settings: &CameraSettings) -> Self {
        let mut camera = FlyCamera::new(persisted.camera_position, settings);
        camera.set_front(persisted.camera_front);

        Self {
            clear_color: persisted.clear_color,
            overlay_enabled: persisted.ui_enabled,
            mouse_look_enabled: !persisted.ui_enabled,
            camera,
        }
    }

    /// Snapshot the fields that are saved between runs
    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            clear_color: self.clear_color,
            ui_enabled: self.overlay_enabled,
            camera_position: self.camera.position(),
            camera_front: self.camera.front(),
        }
    }

    /// Cursor mode matching the overlay flag: free for the overlay,
    /// captured for mouse-look
    pub fn cursor_mode(&self) -> CursorMode {
        if self.overlay_enabled {
            CursorMode::Normal
        } else {
            CursorMode::Disabled
        }
    }

    /// Flip the overlay and return the cursor mode to apply
    ///
    /// Opening the overlay turns mouse-look off; closing it turns it back on.
    pub fn toggle_overlay(&mut self) -> CursorMode {
        self.overlay_enabled = !self.overlay_enabled;
        self.mouse_look_enabled = !self.overlay_enabled;
        log::debug!("Overlay {}", if self.overlay_enabled { "enabled" } else { "disabled" });
        self.cursor_mode()
    }
}
