//! # Free-Fly Camera
//!
//! Euler-angle camera driven by keyboard and mouse input.
//!
//! ## Design Principles
//! - **Angles are the source of truth**: yaw and pitch are stored, and the
//!   front/right/up basis is recomputed from them after every mutation
//!   instead of being rotated incrementally, so no drift accumulates.
//! - **Library-agnostic**: no window or GL types appear here; input arrives
//!   as plain offsets and directions.
//! - **Pure queries**: `view_matrix` and `projection_matrix` never mutate.

use crate::core::CameraSettings;
use crate::foundation::math::{Vec3, Mat4, Mat4Ext, utils};

/// Directions the camera can be moved in by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along the front vector
    Forward,
    /// Against the front vector
    Backward,
    /// Against the right vector
    Left,
    /// Along the right vector
    Right,
    /// Along world up
    Up,
    /// Against world up
    Down,
}

/// Orthonormal camera basis derived from yaw and pitch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    /// Viewing direction
    pub front: Vec3,
    /// Camera-space +X in world coordinates
    pub right: Vec3,
    /// Camera-space +Y in world coordinates
    pub up: Vec3,
}

impl CameraBasis {
    /// Spherical-to-Cartesian conversion followed by re-orthonormalisation
    ///
    /// `yaw = -90°, pitch = 0°` faces -Z.
    pub fn from_angles(yaw_degrees: f32, pitch_degrees: f32, world_up: Vec3) -> Self {
        let yaw = utils::deg_to_rad(yaw_degrees);
        let pitch = utils::deg_to_rad(pitch_degrees);

        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        ).normalize();
        let right = front.cross(&world_up).normalize();
        let up = right.cross(&front).normalize();

        Self { front, right, up }
    }
}

/// Free-fly camera with Euler angles and a zoomable field of view
///
/// Holds everything needed to build the per-frame view and projection
/// matrices. The basis vectors are read-only from outside: mutate the
/// camera through the `process_*` methods, `set_position` or `set_front`.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    position: Vec3,
    basis: CameraBasis,
    world_up: Vec3,

    yaw: f32,
    pitch: f32,

    movement_speed: f32,
    mouse_sensitivity: f32,
    zoom: f32,

    min_zoom: f32,
    max_zoom: f32,
    pitch_limit: f32,
}

impl FlyCamera {
    /// Create a camera at `position` with the tuning from `settings`
    pub fn new(position: Vec3, settings: &CameraSettings) -> Self {
        let world_up = Vec3::y();
        let pitch = utils::clamp(settings.pitch, -settings.pitch_limit, settings.pitch_limit);
        Self {
            position,
            basis: CameraBasis::from_angles(settings.yaw, pitch, world_up),
            world_up,
            yaw: settings.yaw,
            pitch,
            movement_speed: settings.movement_speed,
            mouse_sensitivity: settings.mouse_sensitivity,
            zoom: utils::clamp(settings.zoom, settings.min_zoom, settings.max_zoom),
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            pitch_limit: settings.pitch_limit,
        }
    }

    /// Move along the camera basis by `movement_speed * delta_time`
    ///
    /// No bounds are applied; the camera can fly anywhere.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.basis.front * velocity,
            CameraMovement::Backward => self.position -= self.basis.front * velocity,
            CameraMovement::Left => self.position -= self.basis.right * velocity,
            CameraMovement::Right => self.position += self.basis.right * velocity,
            CameraMovement::Up => self.position += self.world_up * velocity,
            CameraMovement::Down => self.position -= self.world_up * velocity,
        }
    }

    /// Turn the camera by a cursor offset in pixels
    ///
    /// `y_offset` is positive when the cursor moves up. Pitch is clamped
    /// to the configured limit, inclusive: ±89° itself is reachable and
    /// still leaves a well-defined basis.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.pitch = utils::clamp(self.pitch, -self.pitch_limit, self.pitch_limit);
        self.update_camera_vectors();
    }

    /// Narrow or widen the field of view by a scroll offset
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = utils::clamp(self.zoom - y_offset, self.min_zoom, self.max_zoom);
    }

    /// Look-at view matrix from position, position + front and up
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.basis.front, self.basis.up)
    }

    /// Perspective projection using the current zoom as vertical FOV
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective(utils::deg_to_rad(self.zoom), aspect, near, far)
    }

    /// Teleport the camera
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Point the camera along `front`
    ///
    /// Yaw and pitch are re-derived from the direction so that later
    /// mouse input continues from where the camera actually looks. A zero
    /// or non-finite vector is ignored.
    pub fn set_front(&mut self, front: Vec3) {
        let length = front.norm();
        if !length.is_finite() || length <= f32::EPSILON {
            log::warn!("Ignoring degenerate camera front {:?}", front);
            return;
        }
        let front = front / length;
        self.pitch = utils::clamp(
            utils::rad_to_deg(front.y.clamp(-1.0, 1.0).asin()),
            -self.pitch_limit,
            self.pitch_limit,
        );
        self.yaw = utils::rad_to_deg(front.z.atan2(front.x));
        self.update_camera_vectors();
    }

    fn update_camera_vectors(&mut self) {
        self.basis = CameraBasis::from_angles(self.yaw, self.pitch, self.world_up);
    }

    /// World-space position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Viewing direction
    pub fn front(&self) -> Vec3 {
        self.basis.front
    }

    /// Camera right vector
    pub fn right(&self) -> Vec3 {
        self.basis.right
    }

    /// Camera up vector
    pub fn up(&self) -> Vec3 {
        self.basis.up
    }

    /// Yaw in degrees
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Keyboard speed in units per second
    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        let settings = CameraSettings::default();
        Self::new(settings.start_position, &settings)
    }
}
