//! Public rendering API
//!
//! The backend trait the scene renderer talks to, and the handles it
//! hands out.

pub mod render_backend;

pub use render_backend::{
    BackendResult, DepthFunc, DepthState, ModelHandle, ShaderHandle, ShadingBackend,
    SkyboxHandle, UniformSink,
};
