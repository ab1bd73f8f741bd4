//! Scene description
//!
//! A [`Scene`] bundles everything the frame loop draws: the object graph,
//! the lights, the skybox and which object the debug overlay edits.

pub mod scene_graph;
pub mod scene_renderer;

pub use scene_graph::{
    GroupId, LocalTransform, ObjectId, Rotation, SceneGraph, SceneObject, ShaderGroup,
};
pub use scene_renderer::{FrameUniforms, SceneRenderer};

use crate::render::lighting::SceneLighting;
use crate::render::skybox::SkyboxPass;

/// Complete drawable scene
#[derive(Debug, Clone)]
pub struct Scene {
    /// Objects and shader groups
    pub graph: SceneGraph,
    /// Directional and spot lights
    pub lighting: SceneLighting,
    /// Object the spot light is attached to
    pub spot_emitter: Option<ObjectId>,
    /// Background pass, drawn after all objects
    pub skybox: Option<SkyboxPass>,
    /// Object whose position/scale the overlay edits
    pub overlay_target: Option<ObjectId>,
}

impl Scene {
    /// Scene with the given graph and lights, no skybox and no attachments
    pub fn new(graph: SceneGraph, lighting: SceneLighting) -> Self {
        Self {
            graph,
            lighting,
            spot_emitter: None,
            skybox: None,
            overlay_target: None,
        }
    }

    /// Move the tracked spot light to its emitter and re-aim it
    pub fn update_lights(&mut self, elapsed: f64) {
        let emitter = self
            .spot_emitter
            .and_then(|id| self.graph.object(id))
            .map(|object| object.transform.translation);

        if let (Some(spot), Some(position)) = (self.lighting.spot.as_mut(), emitter) {
            spot.update(position, elapsed);
        }
    }
}
