//! Scene graph of statically placed objects
//!
//! A flat, fixed list: objects are added during setup and never removed.
//! Each object belongs to one shader group and carries a local transform
//! whose only time dependence is an optional spin on its rotations.

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::render::api::{ModelHandle, ShaderHandle};
use crate::render::lighting::GroupLighting;

/// Index of an object in its [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Index of a shader group in its [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupId(pub usize);

/// Axis-angle rotation, optionally spinning at a constant rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Rotation axis (need not be normalized)
    pub axis: Vec3,
    /// Angle at time zero, degrees
    pub base_degrees: f32,
    /// Spin rate, degrees per second
    pub degrees_per_second: f32,
}

impl Rotation {
    /// Constant rotation
    pub fn fixed(axis: Vec3, degrees: f32) -> Self {
        Self { axis, base_degrees: degrees, degrees_per_second: 0.0 }
    }

    /// Rotation whose angle grows linearly with time
    pub fn spinning(axis: Vec3, base_degrees: f32, degrees_per_second: f32) -> Self {
        Self { axis, base_degrees, degrees_per_second }
    }

    /// Angle in degrees after `elapsed` seconds
    ///
    /// Computed in f64 so long sessions do not lose precision before the
    /// final cast.
    pub fn degrees_at(&self, elapsed: f64) -> f32 {
        (self.base_degrees as f64 + self.degrees_per_second as f64 * elapsed) as f32
    }
}

/// Translate, rotate, scale
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTransform {
    /// Position in world space
    pub translation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
    /// Rotations applied in list order (first is outermost)
    pub rotations: Vec<Rotation>,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            rotations: Vec::new(),
        }
    }
}

impl LocalTransform {
    /// Identity rotation and scale at `translation`
    pub fn at(translation: Vec3) -> Self {
        Self { translation, ..Self::default() }
    }

    /// Builder: same scale on every axis
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder: append a rotation
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotations.push(rotation);
        self
    }

    /// True when any rotation spins
    pub fn is_animated(&self) -> bool {
        self.rotations.iter().any(|r| r.degrees_per_second != 0.0)
    }

    /// World matrix `T · R₁ · R₂ · … · S` at `elapsed` seconds
    ///
    /// Pure function of the transform and the time, so the same inputs
    /// always give a bit-identical matrix.
    pub fn world_matrix(&self, elapsed: f64) -> Mat4 {
        let mut matrix = Mat4::new_translation(&self.translation);
        for rotation in &self.rotations {
            matrix *= Mat4::rotation_axis_degrees(rotation.axis, rotation.degrees_at(elapsed));
        }
        matrix * Mat4::new_nonuniform_scaling(&self.scale)
    }
}

/// A drawable placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Display name (used by the overlay and logs)
    pub name: String,
    /// Model to draw
    pub model: ModelHandle,
    /// Shader group the object is drawn with
    pub group: GroupId,
    /// Placement
    pub transform: LocalTransform,
}

/// Objects sharing one shader program and lighting setup
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderGroup {
    /// Display name
    pub name: String,
    /// Program used for every object in the group
    pub shader: ShaderHandle,
    /// Lights and material constants the group receives
    pub lighting: GroupLighting,
}

/// Fixed list of shader groups and objects
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    groups: Vec<ShaderGroup>,
    objects: Vec<SceneObject>,
}

impl SceneGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shader group; groups are drawn in registration order
    pub fn add_group(&mut self, group: ShaderGroup) -> GroupId {
        self.groups.push(group);
        GroupId(self.groups.len() - 1)
    }

    /// Add an object; objects draw in insertion order within their group
    ///
    /// Returns `None` if the object names a group that does not exist.
    pub fn add_object(&mut self, object: SceneObject) -> Option<ObjectId> {
        if object.group.0 >= self.groups.len() {
            log::warn!("Object '{}' references unknown group {:?}", object.name, object.group);
            return None;
        }
        self.objects.push(object);
        Some(ObjectId(self.objects.len() - 1))
    }

    /// All groups in draw order
    pub fn groups(&self) -> &[ShaderGroup] {
        &self.groups
    }

    /// All objects in insertion order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Look up an object
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    /// Look up an object for editing
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    /// Find an object by name
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().position(|o| o.name == name).map(ObjectId)
    }

    /// Objects drawn with `group`, in insertion order
    pub fn objects_in_group(&self, group: GroupId) -> impl Iterator<Item = &SceneObject> + '_ {
        self.objects.iter().filter(move |o| o.group == group)
    }

    /// World matrix of an object at `elapsed` seconds
    pub fn world_matrix(&self, id: ObjectId, elapsed: f64) -> Option<Mat4> {
        self.object(id).map(|o| o.transform.world_matrix(elapsed))
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when there are no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
