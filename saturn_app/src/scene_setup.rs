//! The Saturn scene
//!
//! Saturn with a house and a mushroom perched on top, a UFO hovering above
//! and spinning slowly, a sun, and a spot light hanging under the UFO that
//! sweeps across Saturn's surface.

use std::path::Path;

use nalgebra::Vector3;
use scene_engine::core::ApplicationConfig;
use scene_engine::render::api::ShadingBackend;
use scene_engine::render::lighting::{
    DirectionalLight, GroupLighting, MaterialParams, OrbitTarget, SceneLighting, SpotLight,
    TrackedSpotLight,
};
use scene_engine::render::skybox::SkyboxPass;
use scene_engine::scene::{
    GroupId, LocalTransform, ObjectId, Rotation, Scene, SceneGraph, SceneObject, ShaderGroup,
};
use scene_engine::{AppError, Application};

const TEXTURE_PREFIX: &str = "material.";

const UFO_MODEL: &str = "objects/ufo/UFO.obj";
const SATURN_MODEL: &str = "objects/saturn/Stylized_Planets.obj";
const HOUSE_MODEL: &str = "objects/house/uploads_files_4118883_Orange_Hause.obj";
const MUSHROOM_MODEL: &str = "objects/mushroom/Mushrooms1.obj";

/// Builds the Saturn scene
pub struct SaturnScene;

impl SaturnScene {
    fn lighting() -> SceneLighting {
        let sun = DirectionalLight {
            direction: Vector3::new(-10.0, -5.0, -2.0),
            ambient: Vector3::new(0.2, 0.2, 0.2),
            diffuse: Vector3::new(0.6, 0.6, 0.6),
            specular: Vector3::new(1.0, 1.0, 1.0),
        };

        let target = OrbitTarget { radius_x: 1.2, height: -1.0, radius_z: 1.5 };
        let mut spot = SpotLight::new(Vector3::zeros(), -Vector3::y(), 8.5, 10.5);
        spot.ambient = Vector3::new(0.1, 0.1, 0.1);
        spot.diffuse = Vector3::new(5.0, 5.0, 5.0);
        spot.specular = Vector3::new(1.0, 1.0, 1.0);
        spot.constant = 1.0;
        spot.linear = 0.35;
        spot.quadratic = 0.44;

        SceneLighting {
            directional: sun,
            spot: Some(TrackedSpotLight { light: spot, target }),
        }
    }
}

fn place_object(
    backend: &mut dyn ShadingBackend,
    graph: &mut SceneGraph,
    assets_root: &Path,
    name: &str,
    model_path: &str,
    group: GroupId,
    transform: LocalTransform,
) -> Result<ObjectId, AppError> {
    log::info!("Loading model '{}'", name);
    let model = backend.create_model(&assets_root.join(model_path), TEXTURE_PREFIX)?;
    graph
        .add_object(SceneObject { name: name.to_string(), model, group, transform })
        .ok_or_else(|| AppError::Scene(format!("unknown shader group for '{}'", name)))
}

impl Application for SaturnScene {
    fn build_scene(
        &mut self,
        backend: &mut dyn ShadingBackend,
        config: &ApplicationConfig,
    ) -> Result<Scene, AppError> {
        let paths = &config.paths;

        log::info!("Compiling shaders from {:?}", paths.shader_dir);
        let ufo_shader = backend.create_shader(&paths.shader_dir, "ufo")?;
        let saturn_shader = backend.create_shader(&paths.shader_dir, "saturn")?;
        let skybox_shader = backend.create_shader(&paths.shader_dir, "skybox")?;

        let mut graph = SceneGraph::new();

        // The UFO is lit by the sun only, with full ambient so it never
        // falls into shadow
        let ufo_group = graph.add_group(ShaderGroup {
            name: "ufo".to_string(),
            shader: ufo_shader,
            lighting: GroupLighting {
                ambient_override: Some(Vector3::new(1.0, 1.0, 1.0)),
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

        let ufo = place_object(
            backend,
            &mut graph,
            &paths.assets_root,
            "UFO",
            UFO_MODEL,
            ufo_group,
            LocalTransform::at(Vector3::new(-1.2, 8.0, -1.0))
                .with_uniform_scale(0.5)
                .with_rotation(Rotation::fixed(Vector3::z(), 10.0))
                .with_rotation(Rotation::spinning(Vector3::y(), 0.0, 20.0)),
        )?;
        let saturn = place_object(
            backend,
            &mut graph,
            &paths.assets_root,
            "Saturn",
            SATURN_MODEL,
            saturn_group,
            LocalTransform::at(Vector3::zeros()).with_uniform_scale(3.0),
        )?;
        place_object(
            backend,
            &mut graph,
            &paths.assets_root,
            "House",
            HOUSE_MODEL,
            saturn_group,
            LocalTransform::at(Vector3::new(0.8, 4.0, 0.0))
                .with_uniform_scale(0.4)
                .with_rotation(Rotation::fixed(Vector3::z(), -12.0))
                .with_rotation(Rotation::fixed(Vector3::y(), -45.0)),
        )?;
        place_object(
            backend,
            &mut graph,
            &paths.assets_root,
            "Mushroom",
            MUSHROOM_MODEL,
            saturn_group,
            LocalTransform::at(Vector3::new(-0.4, 3.3, -0.4))
                .with_uniform_scale(0.008)
                .with_rotation(Rotation::fixed(Vector3::z(), 10.0)),
        )?;

        log::info!("Loading skybox");
        let skybox = backend.create_skybox(&paths.skybox_faces)?;

        let mut scene = Scene::new(graph, Self::lighting());
        scene.spot_emitter = Some(ufo);
        scene.overlay_target = Some(saturn);
        scene.skybox = Some(SkyboxPass { shader: skybox_shader, skybox });
        scene.update_lights(0.0);
        Ok(scene)
    }
}
