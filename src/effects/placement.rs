// placement.rs - Hit-test driven placement
//
// The first hit-test result is authoritative; results are not ranked.

use glam::Mat4;

use crate::scene::SceneObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Remember the pose for a later select event.
    Cache,
    /// Move the tracked object to the pose every frame.
    Follow,
}

pub struct HitTestPlacement {
    mode: PlacementMode,
    matrix: Mat4,
}

impl HitTestPlacement {
    pub fn new(mode: PlacementMode) -> Self {
        Self { mode, matrix: Mat4::IDENTITY }
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Last placement pose; identity until the first hit.
    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }

    /// Take the first result, if any. Zero results leave the cache alone.
    pub fn update(&mut self, results: &[Mat4]) -> Option<Mat4> {
        let pose = *results.first()?;
        self.matrix = pose;
        Some(pose)
    }

    /// `update`, then in follow mode move `object` unless `blocked`.
    pub fn track(&mut self, results: &[Mat4], object: &mut SceneObject, blocked: bool) -> bool {
        let Some(pose) = self.update(results) else {
            return false;
        };
        if self.mode != PlacementMode::Follow || blocked {
            return false;
        }
        object.set_pose(pose);
        true
    }
}
