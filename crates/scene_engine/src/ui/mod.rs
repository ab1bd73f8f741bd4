//! UI System Module
//!
//! The debug overlay: a trait the frame loop drives while the overlay is
//! enabled, and a window-title implementation of it.
//!
//! Architecture:
//! - overlay: [`DebugOverlay`] trait, live [`OverlayBindings`] and read-only
//!   [`CameraTelemetry`]
//! - title_bar: [`TitleBarOverlay`], telemetry in the title bar and keyboard
//!   edits

pub mod overlay;
pub mod title_bar;

pub use overlay::{CameraTelemetry, DebugOverlay, ObjectBinding, OverlayBindings};
pub use title_bar::TitleBarOverlay;
