// collision.rs - Keep virtual objects out of real geometry
//
// Like occlusion, but with slack: an object may sit a little behind the
// measured surface before it counts as inside it.

use crate::config::CollisionConfig;
use crate::depth::{DepthSource, sample};
use crate::project::Camera;
use crate::scene::SceneObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Colliding,
    Clear,
    /// No depth at the object's screen position this frame.
    Unknown,
}

impl Collision {
    /// Placement updates are only held back on a confirmed collision.
    pub fn blocks_placement(self) -> bool {
        self == Collision::Colliding
    }
}

pub struct CollisionCheck {
    cfg: CollisionConfig,
}

impl CollisionCheck {
    pub fn new(cfg: CollisionConfig) -> Self {
        Self { cfg }
    }

    /// Classify the object against real-world depth and recolor it.
    pub fn apply(&self, depth: &dyn DepthSource, object: &mut SceneObject, camera: &Camera) -> Collision {
        let uv = camera.depth_uv(object.position);
        let Some(real) = sample(depth, uv.x, uv.y, self.cfg.fallback, 0.0) else {
            return Collision::Unknown;
        };

        if collides(camera.distance_to(object.position), real, self.cfg.slack) {
            log::info!("collision detected");
            object.color = self.cfg.collision_color;
            Collision::Colliding
        } else {
            object.color = self.cfg.clear_color;
            Collision::Clear
        }
    }
}

#[inline]
pub fn collides(object_distance: f32, surface_depth: f32, slack: f32) -> bool {
    object_distance > surface_depth + slack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;
    use crate::depth::DepthBuffer;
    use crate::scene::{Material, Shape};
    use glam::Vec3;

    fn cylinder_at(z: f32) -> SceneObject {
        SceneObject::new(Shape::Cylinder { radius: 0.1, height: 0.2 }, Material::Phong, 0x123456)
            .at(Vec3::new(0.0, 0.0, z))
    }

    #[test]
    fn slack_allows_small_overlap() {
        assert!(!collides(1.05, 1.0, 0.1));
        assert!(!collides(1.1, 1.0, 0.1));
        assert!(collides(1.2, 1.0, 0.1));
    }

    #[test]
    fn recolors_by_outcome() {
        let check = CollisionCheck::new(CollisionConfig::default());
        let cam = Camera::new(CameraConfig::default());
        let wall = DepthBuffer::filled(8, 8, 1.0).unwrap();

        let mut inside = cylinder_at(-1.5);
        assert_eq!(check.apply(&wall, &mut inside, &cam), Collision::Colliding);
        assert_eq!(inside.color, 0xff0000);

        let mut touching = cylinder_at(-1.05);
        assert_eq!(check.apply(&wall, &mut touching, &cam), Collision::Clear);
        assert_eq!(touching.color, 0x00ff00);
    }

    #[test]
    fn custom_slack_and_colors() {
        let check = CollisionCheck::new(CollisionConfig {
            slack: 0.0,
            collision_color: 0x0000ff,
            clear_color: 0xffffff,
            ..Default::default()
        });
        let cam = Camera::new(CameraConfig::default());
        let wall = DepthBuffer::filled(8, 8, 1.0).unwrap();

        let mut obj = cylinder_at(-1.05);
        assert_eq!(check.apply(&wall, &mut obj, &cam), Collision::Colliding);
        assert_eq!(obj.color, 0x0000ff);
    }

    #[test]
    fn unknown_keeps_color_and_allows_placement() {
        let check = CollisionCheck::new(CollisionConfig::default());
        let cam = Camera::new(CameraConfig::default());
        // Zero-sized frame: every query fails
        let empty = DepthBuffer::new(0, 0, Vec::new()).unwrap();

        let mut obj = cylinder_at(-1.0);
        let outcome = check.apply(&empty, &mut obj, &cam);
        assert_eq!(outcome, Collision::Unknown);
        assert_eq!(obj.color, 0x123456);
        assert!(!outcome.blocks_placement());
        assert!(Collision::Colliding.blocks_placement());
    }
}
