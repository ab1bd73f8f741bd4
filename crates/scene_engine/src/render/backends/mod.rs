//! Backend implementations for the render module
//!
//! OpenGL 3.3 core through the `gl` function loader.

/// OpenGL rendering backend implementation
pub mod opengl;

pub use opengl::GlBackend;
