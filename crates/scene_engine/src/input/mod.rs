//! Input management system
//!
//! The window backend translates native events into [`InputEvent`]s and
//! queues them; the frame loop drains the queue once per frame before
//! rendering, so every mutation lands before the frame reads the state.

pub mod mouse;

pub use mouse::MouseTracker;

use std::collections::HashSet;

use crate::render::primitives::camera::CameraMovement;

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Q key
    Q,
    /// E key
    E,
    /// R key
    R,
    /// G key
    G,
    /// B key
    B,
    /// M key
    M,
    /// Escape key
    Escape,
    /// F1 key
    F1,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// `=` / `+` key
    Equal,
    /// `-` key
    Minus,
}

impl KeyCode {
    /// Camera motion bound to this key while held
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Self::W => Some(CameraMovement::Forward),
            Self::S => Some(CameraMovement::Backward),
            Self::A => Some(CameraMovement::Left),
            Self::D => Some(CameraMovement::Right),
            Self::E => Some(CameraMovement::Up),
            Self::Q => Some(CameraMovement::Down),
            _ => None,
        }
    }
}

/// Cursor behaviour requested from the window system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Visible and free
    Normal,
    /// Invisible over the window but not captured
    Hidden,
    /// Hidden and captured, reporting unbounded relative motion
    Disabled,
}

/// Window input translated into engine terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to an absolute position in window coordinates
    CursorMoved {
        /// Horizontal position, pixels from the left edge
        x: f64,
        /// Vertical position, pixels from the top edge
        y: f64,
    },
    /// Scroll wheel offset
    Scroll {
        /// Horizontal scroll
        x_offset: f64,
        /// Vertical scroll; positive is away from the user
        y_offset: f64,
    },
    /// Key pressed or released; auto-repeat is not reported
    Key {
        /// Which key
        key: KeyCode,
        /// `true` on press, `false` on release
        pressed: bool,
    },
    /// Framebuffer size changed
    FramebufferResized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
    /// User asked to close the window
    CloseRequested,
}

/// Keys currently held down
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
}

impl InputState {
    /// Create an empty input state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition
    ///
    /// Returns true only on the press edge, so callers can fire toggles
    /// once per press no matter how long the key is held.
    pub fn update_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        if pressed {
            self.held.insert(key)
        } else {
            self.held.remove(&key);
            false
        }
    }

    /// Check whether a key is held
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Camera motions for every held movement key
    pub fn held_movements(&self) -> Vec<CameraMovement> {
        let mut movements: Vec<CameraMovement> =
            self.held.iter().filter_map(|key| key.movement()).collect();
        // HashSet order is unspecified; keep frame results reproducible
        movements.sort_by_key(|movement| *movement as u8);
        movements
    }

    /// Forget all held keys
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_fires_once() {
        let mut input = InputState::new();
        assert!(input.update_key(KeyCode::F1, true));
        // A second press without release (e.g. a duplicated event) is not an edge
        assert!(!input.update_key(KeyCode::F1, true));
        assert!(!input.update_key(KeyCode::F1, false));
        assert!(input.update_key(KeyCode::F1, true));
    }

    #[test]
    fn test_held_movements() {
        let mut input = InputState::new();
        input.update_key(KeyCode::D, true);
        input.update_key(KeyCode::W, true);
        input.update_key(KeyCode::F1, true);

        assert_eq!(
            input.held_movements(),
            vec![CameraMovement::Forward, CameraMovement::Right]
        );

        input.update_key(KeyCode::W, false);
        assert_eq!(input.held_movements(), vec![CameraMovement::Right]);
        assert!(input.is_held(KeyCode::F1));
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(KeyCode::E.movement(), Some(CameraMovement::Up));
        assert_eq!(KeyCode::Q.movement(), Some(CameraMovement::Down));
        assert_eq!(KeyCode::Escape.movement(), None);
    }
}
