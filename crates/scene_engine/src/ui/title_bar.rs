//! Overlay rendered into the window title
//!
//! Shows camera telemetry and the edited object's state, and turns key
//! presses into edits while enabled:
//!
//! | key            | edit                                    |
//! |----------------|-----------------------------------------|
//! | arrows         | move the object in X (left/right) and Y |
//! | `=` / `-`      | grow / shrink the object uniformly      |
//! | `R`, `G`, `B`  | step a clear color channel, wrapping    |
//! | `M`            | toggle mouse-look                       |

use crate::foundation::math::Vec3;
use crate::input::{InputEvent, KeyCode};
use crate::render::window::WindowBackend;
use crate::ui::overlay::{
    CameraTelemetry, DebugOverlay, OverlayBindings, MAX_OBJECT_SCALE, MIN_OBJECT_SCALE,
};

const MOVE_STEP: f32 = 0.1;
const SCALE_STEP: f32 = 0.05;
const COLOR_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
enum OverlayEdit {
    Move(Vec3),
    Scale(f32),
    Color(usize),
    ToggleMouseLook,
}

/// Title-bar debug overlay
#[derive(Debug, Clone)]
pub struct TitleBarOverlay {
    base_title: String,
    pending: Vec<OverlayEdit>,
    shown_title: Option<String>,
}

impl TitleBarOverlay {
    /// Create an overlay that prefixes its readout with `base_title`
    pub fn new(base_title: impl Into<String>) -> Self {
        Self {
            base_title: base_title.into(),
            pending: Vec::new(),
            shown_title: None,
        }
    }

    fn apply(edit: OverlayEdit, bindings: &mut OverlayBindings<'_>) {
        match edit {
            OverlayEdit::Move(delta) => {
                if let Some(object) = bindings.object.as_mut() {
                    *object.position += delta;
                }
            }
            OverlayEdit::Scale(delta) => {
                if let Some(object) = bindings.object.as_mut() {
                    let scale = (object.scale.x + delta).clamp(MIN_OBJECT_SCALE, MAX_OBJECT_SCALE);
                    *object.scale = Vec3::new(scale, scale, scale);
                }
            }
            OverlayEdit::Color(channel) => {
                let current = bindings.clear_color[channel];
                // Full channel wraps to zero; the tolerance absorbs float steps
                bindings.clear_color[channel] = if current >= 1.0 - 1e-4 {
                    0.0
                } else {
                    (current + COLOR_STEP).min(1.0)
                };
            }
            OverlayEdit::ToggleMouseLook => {
                *bindings.mouse_look_enabled = !*bindings.mouse_look_enabled;
            }
        }
    }

    /// Compose the title text
    pub fn title_text(&self, bindings: &OverlayBindings<'_>, telemetry: &CameraTelemetry) -> String {
        let mut title = self.base_title.clone();
        if let Some(object) = &bindings.object {
            title.push_str(&format!(
                " | {} pos ({:.2}, {:.2}, {:.2}) scale {:.2}",
                object.label, object.position.x, object.position.y, object.position.z, object.scale.x
            ));
        }
        let color = &bindings.clear_color;
        title.push_str(&format!(
            " | clear ({:.2}, {:.2}, {:.2}) | cam ({:.2}, {:.2}, {:.2}) yaw {:.1} pitch {:.1} front ({:.2}, {:.2}, {:.2}) fov {:.0} | mouse-look {} | {:.0} fps",
            color.x, color.y, color.z,
            telemetry.position.x, telemetry.position.y, telemetry.position.z,
            telemetry.yaw, telemetry.pitch,
            telemetry.front.x, telemetry.front.y, telemetry.front.z,
            telemetry.zoom,
            if *bindings.mouse_look_enabled { "on" } else { "off" },
            telemetry.fps,
        ));
        title
    }
}

impl DebugOverlay for TitleBarOverlay {
    fn handle_event(&mut self, event: &InputEvent) {
        let InputEvent::Key { key, pressed: true } = event else {
            return;
        };
        let edit = match key {
            KeyCode::Up => OverlayEdit::Move(Vec3::new(0.0, MOVE_STEP, 0.0)),
            KeyCode::Down => OverlayEdit::Move(Vec3::new(0.0, -MOVE_STEP, 0.0)),
            KeyCode::Left => OverlayEdit::Move(Vec3::new(-MOVE_STEP, 0.0, 0.0)),
            KeyCode::Right => OverlayEdit::Move(Vec3::new(MOVE_STEP, 0.0, 0.0)),
            KeyCode::Equal => OverlayEdit::Scale(SCALE_STEP),
            KeyCode::Minus => OverlayEdit::Scale(-SCALE_STEP),
            KeyCode::R => OverlayEdit::Color(0),
            KeyCode::G => OverlayEdit::Color(1),
            KeyCode::B => OverlayEdit::Color(2),
            KeyCode::M => OverlayEdit::ToggleMouseLook,
            _ => return,
        };
        self.pending.push(edit);
    }

    fn draw(
        &mut self,
        window: &mut dyn WindowBackend,
        mut bindings: OverlayBindings<'_>,
        telemetry: &CameraTelemetry,
    ) {
        for edit in self.pending.drain(..) {
            Self::apply(edit, &mut bindings);
        }

        let title = self.title_text(&bindings, telemetry);
        if self.shown_title.as_deref() != Some(title.as_str()) {
            window.set_title(&title);
            self.shown_title = Some(title);
        }
    }

    fn hide(&mut self, window: &mut dyn WindowBackend) {
        self.pending.clear();
        self.shown_title = None;
        window.set_title(&self.base_title);
    }
}
