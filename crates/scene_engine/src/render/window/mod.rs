//! Window management subsystem
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Frame loop (engine.rs)      │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!      ┌────────▼────────┐
//!      │ WindowBackend   │ ← trait (backend.rs)
//!      └────────┬────────┘
//!               │ Implemented by
//!   ┌───────────▼───────────┐
//!   │ GlfwWindow            │ ← GLFW + OpenGL 3.3 core (glfw_window.rs)
//!   │ FakeWindow            │ ← scripted, tests only
//!   └───────────────────────┘
//! ```

pub mod backend;
pub mod glfw_window;

pub use backend::WindowBackend;
pub use glfw_window::GlfwWindow;

use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW itself could not start
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// Window or OpenGL context creation failed
    #[error("Failed to create GLFW window {width}x{height}")]
    CreationFailed {
        /// Requested client width
        width: u32,
        /// Requested client height
        height: u32,
    },
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;
