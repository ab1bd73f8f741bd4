//! # Core Engine Module
//!
//! Shared configuration types used by every subsystem.

pub mod config;

pub use config::{
    ApplicationConfig,
    WindowSettings,
    CameraSettings,
    ResourcePaths,
    LoggingSettings,
};
pub use crate::config::{Config, ConfigError};
