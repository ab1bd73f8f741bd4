//! Backend-agnostic window trait
//!
//! The frame loop only needs a clock, an event queue, cursor control and
//! buffer presentation. Native events are translated into [`InputEvent`]s
//! when polled and held until the loop drains them.

use crate::input::{CursorMode, InputEvent};

/// Window and event source driven by the frame loop
///
/// All calls happen on the thread that created the window.
pub trait WindowBackend {
    /// Check if the window has been asked to close
    fn should_close(&self) -> bool;

    /// Request (or cancel) closing the window
    fn set_should_close(&mut self, should_close: bool);

    /// Seconds since the window system started, monotonic
    fn time(&self) -> f64;

    /// Process pending native events into the input queue
    fn poll_events(&mut self);

    /// Take every queued event, oldest first
    fn drain_events(&mut self) -> Vec<InputEvent>;

    /// Current framebuffer size in pixels
    fn framebuffer_size(&self) -> (u32, u32);

    /// Change cursor visibility/capture
    fn set_cursor_mode(&mut self, mode: CursorMode);

    /// Replace the window title
    fn set_title(&mut self, title: &str);

    /// Present the back buffer; blocks for vsync when enabled
    fn swap_buffers(&mut self);
}
