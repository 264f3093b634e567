// collision.rs - A cylinder that follows hit-tests but won't enter walls
//
// The cylinder tracks where the device points; while it would sit inside
// real geometry it stays put.

use super::{Demo, DemoKind, random_color};
use crate::config::EngineConfig;
use crate::effects::{CollisionCheck, HitTestPlacement, PlacementMode};
use crate::error::FrameError;
use crate::scene::{Light, Material, ObjectId, Scene, SceneObject, Shape};
use crate::session::{DepthSensing, Feature, FrameInput, SessionContext, SessionInit};

pub struct EnvironmentCollision {
    scene: Scene,
    cylinder: ObjectId,
    check: CollisionCheck,
    placement: HitTestPlacement,
}

impl EnvironmentCollision {
    pub fn new(cfg: &EngineConfig, mut rng: u32) -> Self {
        let mut scene = Scene::new();
        scene.add_light(Light::hemisphere(3.0));
        let cylinder = scene.add(SceneObject::new(
            Shape::Cylinder { radius: 0.1, height: 0.2 },
            Material::Phong,
            random_color(&mut rng),
        ));
        Self {
            scene,
            cylinder,
            check: CollisionCheck::new(cfg.collision.clone()),
            placement: HitTestPlacement::new(PlacementMode::Follow),
        }
    }
}

impl Demo for EnvironmentCollision {
    fn kind(&self) -> DemoKind {
        DemoKind::Collision
    }

    fn session_init(&self) -> SessionInit {
        SessionInit::default()
            .require(Feature::HitTest)
            .require(Feature::DepthSensing)
            .with_depth(DepthSensing::cpu_then_gpu())
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn on_frame(&mut self, ctx: &mut SessionContext, input: &FrameInput<'_>) -> Result<(), FrameError> {
        ctx.require_reference_space()?;
        ctx.require_hit_test_source()?;
        ctx.require_viewer(input)?;
        let depth = input.depth.ok_or(FrameError::NoDepth)?;

        if input.hit_results.is_empty() {
            return Ok(());
        }
        let Some(cylinder) = self.scene.get_mut(self.cylinder) else {
            return Ok(());
        };

        let outcome = self.check.apply(depth, cylinder, &ctx.camera);
        self.placement.track(input.hit_results, cylinder, outcome.blocks_placement());
        Ok(())
    }
}
