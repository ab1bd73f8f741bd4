//! Headless stand-ins for the window and the shading backend
//!
//! Both record what the engine asks of them so tests can assert on call
//! order without a GL context.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use slotmap::SlotMap;

use crate::foundation::math::{Mat4, Vec3};
use crate::input::{CursorMode, InputEvent};
use crate::render::api::{
    BackendResult, DepthState, ModelHandle, ShaderHandle, ShadingBackend, SkyboxHandle,
    UniformSink,
};
use crate::render::lighting::{
    DirectionalLight, GroupLighting, MaterialParams, OrbitTarget, SceneLighting, SpotLight,
    TrackedSpotLight,
};
use crate::render::skybox::SkyboxPass;
use crate::render::window::WindowBackend;
use crate::render::RenderError;
use crate::scene::{LocalTransform, Rotation, Scene, SceneGraph, SceneObject, ShaderGroup};

/// Window that never opens
pub struct FakeWindow {
    time: f64,
    should_close: bool,
    events: VecDeque<InputEvent>,
    framebuffer: (u32, u32),
    title: String,
    title_changes: usize,
    cursor_modes: Vec<CursorMode>,
    swaps: usize,
    polls: usize,
}

impl FakeWindow {
    pub fn new() -> Self {
        Self {
            time: 0.0,
            should_close: false,
            events: VecDeque::new(),
            framebuffer: (800, 600),
            title: String::new(),
            title_changes: 0,
            cursor_modes: Vec::new(),
            swaps: 0,
            polls: 0,
        }
    }

    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Queue an event for the next drain; resizes also update the
    /// reported framebuffer size
    pub fn push_event(&mut self, event: InputEvent) {
        if let InputEvent::FramebufferResized { width, height } = event {
            self.framebuffer = (width, height);
        }
        self.events.push_back(event);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_changes(&self) -> usize {
        self.title_changes
    }

    pub fn cursor_modes(&self) -> &[CursorMode] {
        &self.cursor_modes
    }

    pub fn swaps(&self) -> usize {
        self.swaps
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl WindowBackend for FakeWindow {
    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.should_close = should_close;
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn poll_events(&mut self) {
        self.polls += 1;
    }

    fn drain_events(&mut self) -> Vec<InputEvent> {
        self.events.drain(..).collect()
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer
    }

    fn set_cursor_mode(&mut self, mode: CursorMode) {
        self.cursor_modes.push(mode);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.title_changes += 1;
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }
}

/// Every backend request, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader(String),
    CreateModel(PathBuf),
    CreateSkybox,
    Viewport(u32, u32),
    Clear(Vec3),
    UseShader(ShaderHandle),
    SetMat4(String, Mat4),
    SetVec3(String, Vec3),
    SetFloat(String, f32),
    SetInt(String, i32),
    DrawModel(ModelHandle),
    Depth(DepthState),
    DrawSkybox(SkyboxHandle),
}

impl Call {
    /// Uniform name for uniform uploads
    pub fn uniform_name(&self) -> Option<&str> {
        match self {
            Call::SetMat4(name, _)
            | Call::SetVec3(name, _)
            | Call::SetFloat(name, _)
            | Call::SetInt(name, _) => Some(name),
            _ => None,
        }
    }
}

/// Backend that records instead of drawing
#[derive(Default)]
pub struct RecordingBackend {
    shaders: SlotMap<ShaderHandle, String>,
    models: SlotMap<ModelHandle, PathBuf>,
    skyboxes: SlotMap<SkyboxHandle, ()>,
    calls: Vec<Call>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn mat4(&self, name: &str) -> Option<Mat4> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::SetMat4(n, value) if n == name => Some(*value),
            _ => None,
        })
    }

    pub fn vec3(&self, name: &str) -> Option<Vec3> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::SetVec3(n, value) if n == name => Some(*value),
            _ => None,
        })
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::SetFloat(n, value) if n == name => Some(*value),
            _ => None,
        })
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::SetInt(n, value) if n == name => Some(*value),
            _ => None,
        })
    }

    /// Register a skybox shader and cubemap, returning the pass with no
    /// calls recorded
    pub fn skybox_pass(&mut self) -> SkyboxPass {
        SkyboxPass {
            shader: self.shaders.insert("skybox".to_string()),
            skybox: self.skyboxes.insert(()),
        }
    }
}

impl UniformSink for RecordingBackend {
    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.calls.push(Call::SetMat4(name.to_string(), *value));
    }

    fn set_vec3(&mut self, name: &str, value: &Vec3) {
        self.calls.push(Call::SetVec3(name.to_string(), *value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.calls.push(Call::SetFloat(name.to_string(), value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.calls.push(Call::SetInt(name.to_string(), value));
    }
}

impl ShadingBackend for RecordingBackend {
    fn create_shader(&mut self, _dir: &Path, name: &str) -> BackendResult<ShaderHandle> {
        self.calls.push(Call::CreateShader(name.to_string()));
        Ok(self.shaders.insert(name.to_string()))
    }

    fn create_model(&mut self, path: &Path, _texture_prefix: &str) -> BackendResult<ModelHandle> {
        self.calls.push(Call::CreateModel(path.to_path_buf()));
        Ok(self.models.insert(path.to_path_buf()))
    }

    fn create_skybox(&mut self, _faces: &[PathBuf; 6]) -> BackendResult<SkyboxHandle> {
        self.calls.push(Call::CreateSkybox);
        Ok(self.skyboxes.insert(()))
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn clear(&mut self, color: Vec3) {
        self.calls.push(Call::Clear(color));
    }

    fn use_shader(&mut self, shader: ShaderHandle) -> BackendResult<()> {
        if !self.shaders.contains_key(shader) {
            return Err(RenderError::InvalidHandle("shader"));
        }
        self.calls.push(Call::UseShader(shader));
        Ok(())
    }

    fn draw_model(&mut self, model: ModelHandle) -> BackendResult<()> {
        if !self.models.contains_key(model) {
            return Err(RenderError::InvalidHandle("model"));
        }
        self.calls.push(Call::DrawModel(model));
        Ok(())
    }

    fn set_depth_state(&mut self, state: DepthState) {
        self.calls.push(Call::Depth(state));
    }

    fn draw_skybox(&mut self, skybox: SkyboxHandle) -> BackendResult<()> {
        if !self.skyboxes.contains_key(skybox) {
            return Err(RenderError::InvalidHandle("skybox"));
        }
        self.calls.push(Call::DrawSkybox(skybox));
        Ok(())
    }
}

/// UFO in an unlit group, Saturn and a house in a lit group, plus a skybox
///
/// Saturn sits at the origin with unit scale and is the overlay target.
pub fn sample_scene(backend: &mut dyn ShadingBackend) -> Scene {
    let dir = Path::new("shaders");
    let ufo_shader = backend.create_shader(dir, "ufo").unwrap();
    let saturn_shader = backend.create_shader(dir, "saturn").unwrap();
    let skybox_shader = backend.create_shader(dir, "skybox").unwrap();

    let mut graph = SceneGraph::new();
    let ufo_group = graph.add_group(ShaderGroup {
        name: "ufo".to_string(),
        shader: ufo_shader,
        lighting: GroupLighting {
            ambient_override: Some(Vec3::new(1.0, 1.0, 1.0)),
            receives_spot_light: false,
            material: MaterialParams::default(),
        },
    });
    let saturn_group = graph.add_group(ShaderGroup {
        name: "saturn".to_string(),
        shader: saturn_shader,
        lighting: GroupLighting {
            ambient_override: None,
            receives_spot_light: true,
            material: MaterialParams::default(),
        },
    });

    let ufo = graph
        .add_object(SceneObject {
            name: "ufo".to_string(),
            model: backend.create_model(Path::new("ufo.obj"), "texture_").unwrap(),
            group: ufo_group,
            transform: LocalTransform::at(Vec3::new(0.0, 1.5, 0.0)).with_uniform_scale(0.1),
        })
        .unwrap();
    let saturn = graph
        .add_object(SceneObject {
            name: "saturn".to_string(),
            model: backend.create_model(Path::new("saturn.obj"), "texture_").unwrap(),
            group: saturn_group,
            transform: LocalTransform::at(Vec3::zeros())
                .with_rotation(Rotation::spinning(Vec3::y(), 0.0, 20.0)),
        })
        .unwrap();
    graph
        .add_object(SceneObject {
            name: "house".to_string(),
            model: backend.create_model(Path::new("house.obj"), "texture_").unwrap(),
            group: saturn_group,
            transform: LocalTransform::at(Vec3::new(0.0, 0.9, 0.0)).with_uniform_scale(0.05),
        })
        .unwrap();

    let lighting = SceneLighting {
        directional: DirectionalLight {
            direction: Vec3::new(-10.0, -5.0, -2.0),
            ambient: Vec3::new(0.2, 0.2, 0.2),
            diffuse: Vec3::new(0.6, 0.6, 0.6),
            specular: Vec3::new(1.0, 1.0, 1.0),
        },
        spot: Some(TrackedSpotLight {
            light: SpotLight::new(Vec3::zeros(), -Vec3::y(), 8.5, 10.5),
            target: OrbitTarget { radius_x: 1.2, height: -1.0, radius_z: 1.5 },
        }),
    };

    let skybox = backend
        .create_skybox(&std::array::from_fn(|i| PathBuf::from(format!("face{i}.png"))))
        .unwrap();

    let mut scene = Scene::new(graph, lighting);
    scene.spot_emitter = Some(ufo);
    scene.overlay_target = Some(saturn);
    scene.skybox = Some(SkyboxPass { shader: skybox_shader, skybox });
    scene
}
