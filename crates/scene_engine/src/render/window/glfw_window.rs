//! GLFW window with an OpenGL 3.3 core context

use glfw::{Action, Context, WindowEvent};

use crate::core::WindowSettings;
use crate::input::{CursorMode, InputEvent, KeyCode};
use crate::render::window::{WindowBackend, WindowError, WindowResult};

/// GLFW window wrapper owning the GL context
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    pending: Vec<InputEvent>,
}

impl GlfwWindow {
    /// Create the window, make its context current and register for the
    /// events the viewer consumes
    pub fn new(settings: &WindowSettings) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        if cfg!(target_os = "macos") {
            glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        }

        let (mut window, events) = glfw
            .create_window(settings.width, settings.height, &settings.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed {
                width: settings.width,
                height: settings.height,
            })?;

        window.make_current();
        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_scroll_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        let interval = if settings.vsync {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        };
        glfw.set_swap_interval(interval);

        log::info!(
            "Created {}x{} window '{}' with an OpenGL 3.3 core context",
            settings.width,
            settings.height,
            settings.title
        );

        Ok(Self {
            glfw,
            window,
            events,
            pending: Vec::new(),
        })
    }

    /// Resolve an OpenGL function pointer from the current context
    pub fn get_proc_address(&mut self, name: &str) -> *const std::ffi::c_void {
        self.window.get_proc_address(name) as *const _
    }

    fn translate(event: WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorPos(x, y) => Some(InputEvent::CursorMoved { x, y }),
            WindowEvent::Scroll(x_offset, y_offset) => Some(InputEvent::Scroll { x_offset, y_offset }),
            WindowEvent::FramebufferSize(width, height) => Some(InputEvent::FramebufferResized {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            }),
            WindowEvent::Close => Some(InputEvent::CloseRequested),
            WindowEvent::Key(key, _, action, _) => {
                let key = map_key(key)?;
                match action {
                    Action::Press => Some(InputEvent::Key { key, pressed: true }),
                    Action::Release => Some(InputEvent::Key { key, pressed: false }),
                    Action::Repeat => None,
                }
            }
            _ => None,
        }
    }
}

impl WindowBackend for GlfwWindow {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            if let Some(event) = Self::translate(event) {
                self.pending.push(event);
            }
        }
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        let mode = match mode {
            CursorMode::Normal => glfw::CursorMode::Normal,
            CursorMode::Hidden => glfw::CursorMode::Hidden,
            CursorMode::Disabled => glfw::CursorMode::Disabled,
        };
        self.window.set_cursor_mode(mode);
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }
}

fn map_key(key: glfw::Key) -> Option<KeyCode> {
    use glfw::Key;

    Some(match key {
        Key::W => KeyCode::W,
        Key::A => KeyCode::A,
        Key::S => KeyCode::S,
        Key::D => KeyCode::D,
        Key::Q => KeyCode::Q,
        Key::E => KeyCode::E,
        Key::R => KeyCode::R,
        Key::G => KeyCode::G,
        Key::B => KeyCode::B,
        Key::M => KeyCode::M,
        Key::Escape => KeyCode::Escape,
        Key::F1 => KeyCode::F1,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::Equal | Key::KpAdd => KeyCode::Equal,
        Key::Minus | Key::KpSubtract => KeyCode::Minus,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_events_translate_without_repeat() {
        let press = WindowEvent::Key(glfw::Key::F1, 0, Action::Press, glfw::Modifiers::empty());
        let repeat = WindowEvent::Key(glfw::Key::F1, 0, Action::Repeat, glfw::Modifiers::empty());
        let unmapped = WindowEvent::Key(glfw::Key::Z, 0, Action::Press, glfw::Modifiers::empty());

        assert_eq!(
            GlfwWindow::translate(press),
            Some(InputEvent::Key { key: KeyCode::F1, pressed: true })
        );
        assert_eq!(GlfwWindow::translate(repeat), None);
        assert_eq!(GlfwWindow::translate(unmapped), None);
    }

    #[test]
    fn test_pointer_and_resize_events_translate() {
        assert_eq!(
            GlfwWindow::translate(WindowEvent::CursorPos(1.5, 2.5)),
            Some(InputEvent::CursorMoved { x: 1.5, y: 2.5 })
        );
        assert_eq!(
            GlfwWindow::translate(WindowEvent::FramebufferSize(1600, 1200)),
            Some(InputEvent::FramebufferResized { width: 1600, height: 1200 })
        );
    }
}
