//! Lighting model and shading contract
//!
//! One directional light and at most one spot light per shader group. The
//! light structs are plain data; `bind` methods write them to a shader using
//! the uniform names the GLSL sources declare:
//!
//! | uniform                         | source                         |
//! |---------------------------------|--------------------------------|
//! | `directionalLight.{direction, ambient, diffuse, specular}` | [`DirectionalLight`] |
//! | `spotLight.{position, direction, cutOff, outerCutOff, constant, linear, quadratic, ambient, diffuse, specular}` | [`SpotLight`] |
//! | `material.{shininess, specular}` | [`MaterialParams`]            |
//! | `viewPosition`, `projection`, `view`, `model` | frame/object transforms |
//!
//! Attenuation and cone falloff are evaluated by the fragment shader; the
//! CPU-side versions here mirror the GLSL so the parameters can be checked.

use crate::foundation::math::{utils, Vec3};
use crate::render::api::UniformSink;

/// Uniform names shared by the shaders
pub mod uniforms {
    /// Camera world position, for specular highlights
    pub const VIEW_POSITION: &str = "viewPosition";
    /// Projection matrix
    pub const PROJECTION: &str = "projection";
    /// View matrix
    pub const VIEW: &str = "view";
    /// Model (world) matrix
    pub const MODEL: &str = "model";
    /// Directional light struct
    pub const DIRECTIONAL_LIGHT: &str = "directionalLight.";
    /// Spot light struct
    pub const SPOT_LIGHT: &str = "spotLight.";
    /// Material struct; also the sampler prefix models bind textures under
    pub const MATERIAL: &str = "material.";
}

/// Sun-like light with parallel rays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels; normalized by the shader
    pub direction: Vec3,
    /// Ambient term
    pub ambient: Vec3,
    /// Diffuse term
    pub diffuse: Vec3,
    /// Specular term
    pub specular: Vec3,
}

impl DirectionalLight {
    /// Same light with a different ambient term
    pub fn with_ambient(mut self, ambient: Vec3) -> Self {
        self.ambient = ambient;
        self
    }

    /// Upload under `prefix` (e.g. `directionalLight.`)
    pub fn bind<S: UniformSink + ?Sized>(&self, sink: &mut S, prefix: &str) {
        sink.set_vec3(&format!("{prefix}direction"), &self.direction);
        sink.set_vec3(&format!("{prefix}ambient"), &self.ambient);
        sink.set_vec3(&format!("{prefix}diffuse"), &self.diffuse);
        sink.set_vec3(&format!("{prefix}specular"), &self.specular);
    }
}

/// Cone-shaped light with distance attenuation
///
/// `cut_off` and `outer_cut_off` are cosines, so the inner cone angle being
/// smaller than the outer one means `cut_off >= outer_cut_off`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    /// World position
    pub position: Vec3,
    /// Cone axis; normalized by the shader
    pub direction: Vec3,
    /// Cosine of the inner (full intensity) half-angle
    pub cut_off: f32,
    /// Cosine of the outer (zero intensity) half-angle
    pub outer_cut_off: f32,
    /// Ambient term
    pub ambient: Vec3,
    /// Diffuse term
    pub diffuse: Vec3,
    /// Specular term
    pub specular: Vec3,
    /// Constant attenuation coefficient
    pub constant: f32,
    /// Linear attenuation coefficient
    pub linear: f32,
    /// Quadratic attenuation coefficient
    pub quadratic: f32,
}

impl SpotLight {
    /// Spot light at `position` aimed along `direction` with cone half-angles
    /// in degrees
    ///
    /// Colors default to white diffuse/specular with no ambient, and
    /// attenuation to none; set the public fields for anything else.
    pub fn new(position: Vec3, direction: Vec3, inner_degrees: f32, outer_degrees: f32) -> Self {
        Self {
            position,
            direction,
            cut_off: utils::deg_to_rad(inner_degrees).cos(),
            outer_cut_off: utils::deg_to_rad(outer_degrees).cos(),
            ambient: Vec3::zeros(),
            diffuse: Vec3::new(1.0, 1.0, 1.0),
            specular: Vec3::new(1.0, 1.0, 1.0),
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }

    /// Move the light and aim it at `target`
    pub fn aim(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.direction = target - position;
    }

    /// Smoothstep cone falloff for a fragment, 1 inside the inner cone and
    /// 0 outside the outer cone
    pub fn cone_intensity(&self, fragment: Vec3) -> f32 {
        let to_light = self.position - fragment;
        let (Some(to_light), Some(axis)) =
            (to_light.try_normalize(f32::EPSILON), self.direction.try_normalize(f32::EPSILON))
        else {
            return 0.0;
        };
        let theta = to_light.dot(&-axis);
        utils::smoothstep(self.outer_cut_off, self.cut_off, theta)
    }

    /// Inverse-quadratic distance falloff
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    /// Combined cone and distance factor for a fragment
    pub fn intensity_at(&self, fragment: Vec3) -> f32 {
        self.cone_intensity(fragment) * self.attenuation((self.position - fragment).norm())
    }

    /// Upload under `prefix` (e.g. `spotLight.`)
    pub fn bind<S: UniformSink + ?Sized>(&self, sink: &mut S, prefix: &str) {
        sink.set_vec3(&format!("{prefix}position"), &self.position);
        sink.set_vec3(&format!("{prefix}direction"), &self.direction);
        sink.set_float(&format!("{prefix}cutOff"), self.cut_off);
        sink.set_float(&format!("{prefix}outerCutOff"), self.outer_cut_off);
        sink.set_float(&format!("{prefix}constant"), self.constant);
        sink.set_float(&format!("{prefix}linear"), self.linear);
        sink.set_float(&format!("{prefix}quadratic"), self.quadratic);
        sink.set_vec3(&format!("{prefix}ambient"), &self.ambient);
        sink.set_vec3(&format!("{prefix}diffuse"), &self.diffuse);
        sink.set_vec3(&format!("{prefix}specular"), &self.specular);
    }
}

/// Per-group material constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    /// Specular exponent
    pub shininess: f32,
    /// Scalar applied to the specular map sample
    pub specular: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self { shininess: 32.0, specular: 0.05 }
    }
}

impl MaterialParams {
    /// Upload as `material.shininess` / `material.specular`
    pub fn bind<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_float(&format!("{}shininess", uniforms::MATERIAL), self.shininess);
        sink.set_float(&format!("{}specular", uniforms::MATERIAL), self.specular);
    }
}

/// Point circling below a spot light's emitter, the light's aim point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitTarget {
    /// X amplitude (sine)
    pub radius_x: f32,
    /// Fixed world-space height
    pub height: f32,
    /// Z amplitude (cosine)
    pub radius_z: f32,
}

impl OrbitTarget {
    /// Target position at `elapsed` seconds
    pub fn position_at(&self, elapsed: f64) -> Vec3 {
        Vec3::new(
            (elapsed.sin() * self.radius_x as f64) as f32,
            self.height,
            (elapsed.cos() * self.radius_z as f64) as f32,
        )
    }
}

/// Lighting choices for one shader group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupLighting {
    /// Replaces the directional light's ambient term for this group
    pub ambient_override: Option<Vec3>,
    /// Whether the group's shader declares and receives the spot light
    pub receives_spot_light: bool,
    /// Material constants
    pub material: MaterialParams,
}

/// Spot light that moves with an emitter and sweeps an orbiting target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedSpotLight {
    /// Current light parameters
    pub light: SpotLight,
    /// Where the light is aimed over time
    pub target: OrbitTarget,
}

impl TrackedSpotLight {
    /// Re-derive position and direction for this frame
    pub fn update(&mut self, emitter_position: Vec3, elapsed: f64) {
        self.light.aim(emitter_position, self.target.position_at(elapsed));
    }
}

/// All lights in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLighting {
    /// The single directional light
    pub directional: DirectionalLight,
    /// Optional object-tracking spot light
    pub spot: Option<TrackedSpotLight>,
}

impl SceneLighting {
    /// Upload every light uniform a group needs
    ///
    /// The full set is written on each call so no group relies on values
    /// left bound by a previous draw.
    pub fn bind_group<S: UniformSink + ?Sized>(&self, sink: &mut S, group: &GroupLighting) {
        let directional = match group.ambient_override {
            Some(ambient) => self.directional.with_ambient(ambient),
            None => self.directional,
        };
        directional.bind(sink, uniforms::DIRECTIONAL_LIGHT);

        if group.receives_spot_light {
            if let Some(spot) = &self.spot {
                spot.light.bind(sink, uniforms::SPOT_LIGHT);
            }
        }

        group.material.bind(sink);
    }
}
