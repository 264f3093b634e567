// object.rs - Scene objects
//
// Plain data mirrored into the host renderer each frame.

use glam::{Mat4, Quat, Vec3};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Sphere { radius: f32 },
    /// Base sits on the origin, extends up `height`.
    Cylinder { radius: f32, height: f32 },
    /// Geometry comes from the heatmap buffers.
    DepthMesh,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Material {
    Basic { vertex_colors: bool },
    Standard { metalness: f32, roughness: f32 },
    Phong,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Material,
    pub position: Vec3,
    pub rotation: Quat,
    pub color: u32,
    pub visible: bool,
}

impl SceneObject {
    pub fn new(shape: Shape, material: Material, color: u32) -> Self {
        Self {
            shape,
            material,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            color,
            visible: true,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Take translation and rotation from a pose matrix. Scale is dropped.
    pub fn set_pose(&mut self, m: Mat4) {
        let (_, rotation, translation) = m.to_scale_rotation_translation();
        self.position = translation;
        self.rotation = rotation;
    }
}
