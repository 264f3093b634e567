// occlusion.rs - A sphere that hides behind real objects

use glam::Vec3;

use super::{Demo, DemoKind};
use crate::config::EngineConfig;
use crate::effects::OcclusionTest;
use crate::error::FrameError;
use crate::scene::{Light, Material, ObjectId, Scene, SceneObject, Shape};
use crate::session::{DepthSensing, Feature, FrameInput, SessionContext, SessionInit};

pub struct Occlusion {
    scene: Scene,
    sphere: ObjectId,
    test: OcclusionTest,
}

impl Occlusion {
    pub fn new(cfg: &EngineConfig) -> Self {
        let mut scene = Scene::new();
        let sphere = scene.add(
            SceneObject::new(
                Shape::Sphere { radius: 0.1 },
                Material::Standard { metalness: 0.0, roughness: 1.0 },
                0xff0000,
            )
            .at(Vec3::new(0.0, 0.0, -1.0)),
        );
        scene.add_light(Light::ambient());
        Self {
            scene,
            sphere,
            test: OcclusionTest::new(cfg.occlusion.clone()),
        }
    }
}

impl Demo for Occlusion {
    fn kind(&self) -> DemoKind {
        DemoKind::Occlusion
    }

    fn session_init(&self) -> SessionInit {
        SessionInit::default()
            .require(Feature::DepthSensing)
            .optional(Feature::HitTest)
            .with_depth(DepthSensing::cpu_then_gpu())
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn on_frame(&mut self, ctx: &mut SessionContext, input: &FrameInput<'_>) -> Result<(), FrameError> {
        ctx.require_reference_space()?;
        ctx.require_viewer(input)?;
        let Some(depth) = input.depth else {
            log::warn!("depth data not available yet");
            return Err(FrameError::NoDepth);
        };

        if let Some(sphere) = self.scene.get_mut(self.sphere) {
            self.test.apply(depth, sphere, &ctx.camera);
        }
        Ok(())
    }
}
