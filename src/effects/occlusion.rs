// occlusion.rs - Hide virtual objects behind real surfaces

use crate::config::OcclusionConfig;
use crate::depth::{DepthSource, sample};
use crate::project::Camera;
use crate::scene::SceneObject;

pub struct OcclusionTest {
    cfg: OcclusionConfig,
}

impl OcclusionTest {
    pub fn new(cfg: OcclusionConfig) -> Self {
        Self { cfg }
    }

    /// Visible iff the object is no farther than the real surface along its
    /// line of sight. Returns the new visibility, or `None` when there was no
    /// depth to compare against (visibility left unchanged).
    pub fn apply(&self, depth: &dyn DepthSource, object: &mut SceneObject, camera: &Camera) -> Option<bool> {
        let uv = camera.depth_uv(object.position);
        let Some(real) = sample(depth, uv.x, uv.y, self.cfg.fallback, 0.0) else {
            log::debug!("occlusion check skipped at {uv}");
            return None;
        };

        object.visible = is_visible(camera.distance_to(object.position), real);
        Some(object.visible)
    }
}

/// Boundary inclusive: an object exactly on the surface stays visible.
#[inline]
pub fn is_visible(object_distance: f32, surface_depth: f32) -> bool {
    object_distance <= surface_depth
}
