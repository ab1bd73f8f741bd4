//! Core engine implementation
//!
//! The frame loop is a small state machine:
//!
//! ```text
//! Init ──► Running ⇄ OverlayToggle
//!             │
//!             ▼
//!          Shutdown
//! ```
//!
//! One frame runs these steps in order, on one thread:
//!
//! 1. advance the timer from the window clock
//! 2. drain the input queue into camera, overlay flag and held keys
//! 3. clear with the current clear color
//! 4. draw every shader group (complete uniforms per group, model per object)
//! 5. draw the skybox
//! 6. draw the overlay, if enabled
//! 7. swap buffers and poll the window for the next frame's input

use thiserror::Error;

use crate::application::Application;
use crate::assets::AssetError;
use crate::config::ConfigError;
use crate::core::ApplicationConfig;
use crate::foundation::time::Timer;
use crate::input::{InputEvent, InputState, KeyCode, MouseTracker};
use crate::render::api::ShadingBackend;
use crate::render::window::{WindowBackend, WindowError};
use crate::render::RenderError;
use crate::scene::{FrameUniforms, Scene, SceneRenderer};
use crate::state::{PersistedState, ProgramState};
use crate::ui::{CameraTelemetry, DebugOverlay, ObjectBinding, OverlayBindings};

/// Where the frame loop is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Resources and state being set up
    Init,
    /// Steady-state frames
    Running,
    /// Applying an overlay on/off transition
    OverlayToggle,
    /// Loop exited; state persisted
    Shutdown,
}

/// Main engine struct
///
/// Owns the window, the shading backend, the scene and all mutable program
/// state. Generic over the window and backend so the loop runs headless in
/// tests.
pub struct Engine<W: WindowBackend, B: ShadingBackend, O: DebugOverlay> {
    // Drop order matters: GL resources go before the window that owns the
    // context.
    renderer: SceneRenderer,
    scene: Scene,
    overlay: O,
    backend: B,
    window: W,

    state: ProgramState,
    input: InputState,
    mouse: MouseTracker,
    timer: Timer,
    framebuffer: (u32, u32),
    config: ApplicationConfig,
    phase: LoopPhase,
}

impl<W: WindowBackend, B: ShadingBackend, O: DebugOverlay> Engine<W, B, O> {
    /// Initialize: restore persisted state, let the application build its
    /// scene and apply the initial cursor mode
    pub fn new<A: Application>(
        mut window: W,
        mut backend: B,
        overlay: O,
        app: &mut A,
        config: ApplicationConfig,
    ) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let defaults = ProgramState::persisted_defaults(&config.camera);
        let persisted = PersistedState::load(&config.paths.state_file, defaults);
        let state = ProgramState::from_persisted(&persisted, &config.camera);

        let scene = app
            .build_scene(&mut backend, &config)
            .map_err(|e| EngineError::Application(e.to_string()))?;
        log::info!(
            "Scene ready: {} objects in {} shader groups",
            scene.graph.len(),
            scene.graph.groups().len()
        );

        window.set_cursor_mode(state.cursor_mode());
        let framebuffer = window.framebuffer_size();
        backend.set_viewport(framebuffer.0, framebuffer.1);

        Ok(Self {
            renderer: SceneRenderer::new(),
            scene,
            overlay,
            backend,
            window,
            state,
            input: InputState::new(),
            mouse: MouseTracker::new(),
            timer: Timer::new(),
            framebuffer,
            config,
            phase: LoopPhase::Init,
        })
    }

    /// Run frames until the window is asked to close, then shut down
    ///
    /// A failing frame still shuts down, so state is saved before the
    /// error is returned.
    pub fn run(&mut self) -> Result<(), EngineError> {
        log::info!("Starting main loop...");
        self.phase = LoopPhase::Running;

        while !self.window.should_close() {
            if let Err(e) = self.frame() {
                log::error!("Frame failed, shutting down: {}", e);
                self.shutdown();
                return Err(e);
            }
        }

        self.shutdown();
        Ok(())
    }

    /// Execute one frame
    pub fn frame(&mut self) -> Result<(), EngineError> {
        if self.phase == LoopPhase::Init {
            self.phase = LoopPhase::Running;
        }

        let delta_time = self.timer.tick(self.window.time());
        let elapsed = self.timer.total_time();

        self.process_input(delta_time);
        self.render(elapsed)?;
        if self.state.overlay_enabled {
            self.draw_overlay();
        }

        self.window.swap_buffers();
        self.window.poll_events();
        Ok(())
    }

    /// Persist state; the engine is not meant to run frames afterwards
    ///
    /// A failed save is logged rather than returned: by this point the
    /// session is over and the next start falls back to defaults anyway.
    pub fn shutdown(&mut self) {
        self.phase = LoopPhase::Shutdown;
        let path = &self.config.paths.state_file;
        if let Err(e) = self.state.to_persisted().save(path) {
            log::warn!("Failed to save program state to {:?}: {}", path, e);
        }
        log::info!("Engine shutdown complete");
    }

    fn process_input(&mut self, delta_time: f32) {
        for event in self.window.drain_events() {
            match event {
                InputEvent::Key { key, pressed } => {
                    if self.input.update_key(key, pressed) {
                        self.on_key_pressed(key);
                    }
                }
                InputEvent::CursorMoved { x, y } => {
                    // Tracker always follows the cursor so re-enabling
                    // mouse-look starts from the current position
                    let (x_offset, y_offset) = self.mouse.offset(x, y);
                    if self.state.mouse_look_enabled {
                        self.state.camera.process_mouse_movement(x_offset, y_offset);
                    }
                }
                InputEvent::Scroll { y_offset, .. } => {
                    self.state.camera.process_mouse_scroll(y_offset as f32);
                }
                InputEvent::FramebufferResized { width, height } => {
                    log::debug!("Framebuffer resized to {}x{}", width, height);
                    self.framebuffer = (width, height);
                    self.backend.set_viewport(width, height);
                }
                InputEvent::CloseRequested => self.window.set_should_close(true),
            }

            if self.state.overlay_enabled {
                self.overlay.handle_event(&event);
            }
        }

        for movement in self.input.held_movements() {
            self.state.camera.process_keyboard(movement, delta_time);
        }
    }

    fn on_key_pressed(&mut self, key: KeyCode) {
        match key {
            KeyCode::Escape => self.window.set_should_close(true),
            KeyCode::F1 => self.toggle_overlay(),
            _ => {}
        }
    }

    fn toggle_overlay(&mut self) {
        self.phase = LoopPhase::OverlayToggle;

        let cursor = self.state.toggle_overlay();
        self.window.set_cursor_mode(cursor);
        if self.state.overlay_enabled {
            log::info!("Debug overlay enabled");
        } else {
            self.overlay.hide(&mut self.window);
            self.mouse.reset();
            log::info!("Debug overlay disabled");
        }

        self.phase = LoopPhase::Running;
    }

    fn render(&mut self, elapsed: f64) -> Result<(), EngineError> {
        self.backend.clear(self.state.clear_color);

        let (width, height) = self.framebuffer;
        if width == 0 || height == 0 {
            // Minimized; nothing visible to draw into
            log::trace!("Skipping draw for empty framebuffer");
            return Ok(());
        }

        self.scene.update_lights(elapsed);
        let frame = FrameUniforms::from_camera(
            &self.state.camera,
            width as f32 / height as f32,
            self.config.camera.near,
            self.config.camera.far,
        );
        self.renderer.render(&mut self.backend, &self.scene, &frame, elapsed)?;
        Ok(())
    }

    fn draw_overlay(&mut self) {
        let telemetry = CameraTelemetry::from_camera(&self.state.camera, self.timer.current_fps());
        let mouse_look_before = self.state.mouse_look_enabled;

        let object = self
            .scene
            .overlay_target
            .and_then(|id| self.scene.graph.object_mut(id))
            .map(|object| ObjectBinding {
                label: &object.name,
                position: &mut object.transform.translation,
                scale: &mut object.transform.scale,
            });
        let bindings = OverlayBindings {
            clear_color: &mut self.state.clear_color,
            object,
            mouse_look_enabled: &mut self.state.mouse_look_enabled,
        };
        self.overlay.draw(&mut self.window, bindings, &telemetry);

        if self.state.mouse_look_enabled && !mouse_look_before {
            self.mouse.reset();
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Live program state
    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    /// Live program state, mutable
    pub fn state_mut(&mut self) -> &mut ProgramState {
        &mut self.state
    }

    /// The scene being drawn
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The window
    pub fn window(&self) -> &W {
        &self.window
    }

    /// The window, mutable
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// The shading backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The shading backend, mutable
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Frame timer
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window or context creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// Graphics backend failure
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// Asset loading failure
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The application failed to set up its scene
    #[error("Application error: {0}")]
    Application(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::foundation::math::Vec3;
    use crate::input::CursorMode;
    use crate::render::api::{DepthState, SkyboxHandle};
    use crate::test_support::{sample_scene, Call, FakeWindow, RecordingBackend};
    use crate::ui::TitleBarOverlay;
    use approx::assert_relative_eq;
    use std::path::PathBuf;

    struct SampleApp;

    impl Application for SampleApp {
        fn build_scene(
            &mut self,
            backend: &mut dyn ShadingBackend,
            _config: &ApplicationConfig,
        ) -> Result<Scene, AppError> {
            Ok(sample_scene(backend))
        }
    }

    /// Builds the sample scene but points its skybox at a handle the
    /// backend never issued, so the first frame fails
    struct StaleSkyboxApp;

    impl Application for StaleSkyboxApp {
        fn build_scene(
            &mut self,
            backend: &mut dyn ShadingBackend,
            _config: &ApplicationConfig,
        ) -> Result<Scene, AppError> {
            let mut scene = sample_scene(backend);
            if let Some(pass) = scene.skybox.as_mut() {
                pass.skybox = SkyboxHandle::default();
            }
            Ok(scene)
        }
    }

    fn state_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("scene_engine_engine_{}_{}.txt", std::process::id(), name))
    }

    fn engine(name: &str) -> Engine<FakeWindow, RecordingBackend, TitleBarOverlay> {
        let path = state_path(name);
        let _ = std::fs::remove_file(&path);
        engine_with_state(path)
    }

    fn engine_with_state(path: PathBuf) -> Engine<FakeWindow, RecordingBackend, TitleBarOverlay> {
        let mut config = ApplicationConfig::default();
        config.paths.state_file = path;
        Engine::new(
            FakeWindow::new(),
            RecordingBackend::new(),
            TitleBarOverlay::new("Saturn Scene"),
            &mut SampleApp,
            config,
        )
        .unwrap()
    }

    fn key(engine: &mut Engine<FakeWindow, RecordingBackend, TitleBarOverlay>, key: KeyCode, pressed: bool) {
        engine.window_mut().push_event(InputEvent::Key { key, pressed });
    }

    #[test]
    fn test_init_captures_cursor_and_sets_viewport() {
        let engine = engine("init");
        assert_eq!(engine.phase(), LoopPhase::Init);
        assert_eq!(engine.window().cursor_modes(), &[CursorMode::Disabled]);
        assert!(engine.backend().calls().contains(&Call::Viewport(800, 600)));
    }

    #[test]
    fn test_frame_steps_run_in_order() {
        let mut engine = engine("order");
        engine.backend_mut().clear_calls();
        engine.window_mut().set_time(0.016);
        engine.frame().unwrap();

        let calls = engine.backend().calls();
        assert!(matches!(calls[0], Call::Clear(_)));
        let first_skybox = calls.iter().position(|c| matches!(c, Call::DrawSkybox(_))).unwrap();
        let last_model = calls.iter().rposition(|c| matches!(c, Call::DrawModel(_))).unwrap();
        assert!(last_model < first_skybox);
        assert_eq!(calls.last(), Some(&Call::Depth(DepthState::OPAQUE)));

        assert_eq!(engine.window().swaps(), 1);
        assert_eq!(engine.window().polls(), 1);
        assert_eq!(engine.phase(), LoopPhase::Running);
    }

    #[test]
    fn test_held_forward_key_moves_camera() {
        let mut engine = engine("forward");
        key(&mut engine, KeyCode::W, true);
        engine.window_mut().set_time(1.0);
        engine.frame().unwrap();

        assert_relative_eq!(
            engine.state().camera.position(),
            Vec3::new(0.0, 0.0, 0.5),
            epsilon = 1e-5
        );

        // Released: no further motion
        key(&mut engine, KeyCode::W, false);
        engine.window_mut().set_time(2.0);
        engine.frame().unwrap();
        assert_relative_eq!(engine.state().camera.position().z, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_first_cursor_event_does_not_turn_camera() {
        let mut engine = engine("first_mouse");
        engine.window_mut().push_event(InputEvent::CursorMoved { x: 640.0, y: 10.0 });
        engine.frame().unwrap();
        assert_relative_eq!(engine.state().camera.yaw(), -90.0);
        assert_relative_eq!(engine.state().camera.pitch(), 0.0);

        engine.window_mut().push_event(InputEvent::CursorMoved { x: 650.0, y: 0.0 });
        engine.frame().unwrap();
        assert_relative_eq!(engine.state().camera.yaw(), -89.0, epsilon = 1e-5);
        assert_relative_eq!(engine.state().camera.pitch(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_f1_toggles_once_per_press() {
        let mut engine = engine("toggle");
        key(&mut engine, KeyCode::F1, true);
        engine.frame().unwrap();
        assert!(engine.state().overlay_enabled);
        assert!(!engine.state().mouse_look_enabled);

        // Held across frames: still one toggle
        engine.frame().unwrap();
        assert!(engine.state().overlay_enabled);

        // Cursor motion is ignored for look while the overlay is open
        engine.window_mut().push_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        engine.window_mut().push_event(InputEvent::CursorMoved { x: 300.0, y: 0.0 });
        engine.frame().unwrap();
        assert_relative_eq!(engine.state().camera.yaw(), -90.0);

        key(&mut engine, KeyCode::F1, false);
        key(&mut engine, KeyCode::F1, true);
        engine.frame().unwrap();
        assert!(!engine.state().overlay_enabled);
        assert!(engine.state().mouse_look_enabled);
        assert_eq!(
            engine.window().cursor_modes(),
            &[CursorMode::Disabled, CursorMode::Normal, CursorMode::Disabled]
        );
        assert_eq!(engine.window().title(), "Saturn Scene");
    }

    #[test]
    fn test_overlay_edits_reach_next_frame() {
        let mut engine = engine("overlay_edit");
        key(&mut engine, KeyCode::F1, true);
        key(&mut engine, KeyCode::Up, true);
        engine.frame().unwrap();

        let target = engine.scene().overlay_target.unwrap();
        let object = engine.scene().graph.object(target).unwrap();
        assert_relative_eq!(object.transform.translation.y, 0.1, epsilon = 1e-6);
        assert!(engine.window().title().contains(&object.name));
    }

    #[test]
    fn test_resize_updates_viewport() {
        let mut engine = engine("resize");
        engine
            .window_mut()
            .push_event(InputEvent::FramebufferResized { width: 1600, height: 1200 });
        engine.frame().unwrap();
        assert!(engine.backend().calls().contains(&Call::Viewport(1600, 1200)));

        // Minimized: clear only, no draws
        engine.backend_mut().clear_calls();
        engine.window_mut().push_event(InputEvent::FramebufferResized { width: 0, height: 0 });
        engine.frame().unwrap();
        assert!(!engine.backend().calls().iter().any(|c| matches!(c, Call::DrawModel(_))));
    }

    #[test]
    fn test_escape_ends_run_and_persists_state() {
        let path = state_path("escape");
        let _ = std::fs::remove_file(&path);

        let mut engine = engine_with_state(path.clone());
        engine.state_mut().clear_color = Vec3::new(0.25, 0.5, 0.75);
        key(&mut engine, KeyCode::Escape, true);
        engine.run().unwrap();

        assert_eq!(engine.phase(), LoopPhase::Shutdown);
        assert_eq!(engine.window().swaps(), 1);

        let saved = PersistedState::load(&path, PersistedState::default());
        assert_eq!(saved.clear_color, Vec3::new(0.25, 0.5, 0.75));
        assert!(!saved.ui_enabled);

        // Next start restores it
        let restored = engine_with_state(path.clone());
        assert_eq!(restored.state().clear_color, Vec3::new(0.25, 0.5, 0.75));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_failed_frame_still_persists_state() {
        let path = state_path("failed_frame");
        let _ = std::fs::remove_file(&path);

        let mut config = ApplicationConfig::default();
        config.paths.state_file = path.clone();
        let mut engine = Engine::new(
            FakeWindow::new(),
            RecordingBackend::new(),
            TitleBarOverlay::new("Saturn Scene"),
            &mut StaleSkyboxApp,
            config,
        )
        .unwrap();
        engine.state_mut().clear_color = Vec3::new(0.1, 0.2, 0.3);

        assert!(engine.run().is_err());
        assert_eq!(engine.phase(), LoopPhase::Shutdown);

        let saved = PersistedState::load(&path, PersistedState::default());
        assert_eq!(saved.clear_color, Vec3::new(0.1, 0.2, 0.3));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_saved_open_overlay_starts_with_free_cursor() {
        let path = state_path("open_overlay");
        PersistedState { ui_enabled: true, ..PersistedState::default() }.save(&path).unwrap();

        let engine = engine_with_state(path.clone());
        assert!(engine.state().overlay_enabled);
        assert_eq!(engine.window().cursor_modes(), &[CursorMode::Normal]);
        let _ = std::fs::remove_file(&path);
    }
}
