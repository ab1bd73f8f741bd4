//! Scene Renderer - issues one frame's draws against a shading backend
//!
//! Draw order is fixed: every shader group in registration order, each
//! group's objects in insertion order, then the skybox. Every group gets
//! its complete uniform set (transforms, view position, lights, material)
//! when its shader is made current, and every object its own model matrix,
//! so no draw depends on what a previous one left bound.

use crate::foundation::math::{Mat4, Vec3};
use crate::render::api::{BackendResult, ShadingBackend, UniformSink};
use crate::render::lighting::uniforms;
use crate::render::primitives::camera::FlyCamera;
use crate::scene::{GroupId, Scene};

/// Per-frame camera uniforms shared by every group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    /// Projection matrix
    pub projection: Mat4,
    /// View matrix
    pub view: Mat4,
    /// Camera world position
    pub view_position: Vec3,
}

impl FrameUniforms {
    /// Derive this frame's matrices from the camera
    pub fn from_camera(camera: &FlyCamera, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            projection: camera.projection_matrix(aspect, near, far),
            view: camera.view_matrix(),
            view_position: camera.position(),
        }
    }

    /// Upload to the current shader
    pub fn bind<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_mat4(uniforms::PROJECTION, &self.projection);
        sink.set_mat4(uniforms::VIEW, &self.view);
        sink.set_vec3(uniforms::VIEW_POSITION, &self.view_position);
    }
}

/// Scene renderer with per-frame statistics
#[derive(Debug, Default)]
pub struct SceneRenderer {
    draw_calls: usize,
}

impl SceneRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw all objects and then the skybox
    pub fn render(
        &mut self,
        backend: &mut dyn ShadingBackend,
        scene: &Scene,
        frame: &FrameUniforms,
        elapsed: f64,
    ) -> BackendResult<()> {
        self.draw_calls = 0;
        self.draw_objects(backend, scene, frame, elapsed)?;

        if let Some(skybox) = &scene.skybox {
            skybox.render(backend, &frame.view, &frame.projection)?;
            self.draw_calls += 1;
        }

        log::trace!("Frame issued {} draw calls", self.draw_calls);
        Ok(())
    }

    /// Draw every shader group's objects
    pub fn draw_objects(
        &mut self,
        backend: &mut dyn ShadingBackend,
        scene: &Scene,
        frame: &FrameUniforms,
        elapsed: f64,
    ) -> BackendResult<()> {
        for (index, group) in scene.graph.groups().iter().enumerate() {
            backend.use_shader(group.shader)?;
            frame.bind(backend);
            scene.lighting.bind_group(backend, &group.lighting);

            for object in scene.graph.objects_in_group(GroupId(index)) {
                backend.set_mat4(uniforms::MODEL, &object.transform.world_matrix(elapsed));
                backend.draw_model(object.model)?;
                self.draw_calls += 1;
            }
        }
        Ok(())
    }

    /// Draw calls issued by the last [`render`](Self::render)
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }
}
