// light.rs - Light estimation
//
// A reflective ball lit by the default hemisphere light until the platform
// starts estimating real-world lighting, then by the estimate.

use glam::Vec3;

use super::{Demo, DemoKind};
use crate::effects::LightEstimation;
use crate::error::FrameError;
use crate::scene::{Light, Material, ObjectId, Scene, SceneObject, Shape};
use crate::session::{Feature, FrameInput, SessionContext, SessionEvent, SessionInit};

const BALL_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -2.0);

pub struct LightEstimationDemo {
    scene: Scene,
    ball: ObjectId,
    lighting: LightEstimation,
    // Select asks for the viewer pose of the following frame
    pose_requested: bool,
}

impl LightEstimationDemo {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let lighting = LightEstimation::new(Light::hemisphere(1.0), &mut scene);
        let ball = scene.add(
            SceneObject::new(
                Shape::Sphere { radius: 0.3 },
                Material::Standard { metalness: 1.0, roughness: 0.1 },
                0xff0000,
            )
            .at(BALL_OFFSET),
        );
        Self {
            scene,
            ball,
            lighting,
            pose_requested: false,
        }
    }
}

impl Default for LightEstimationDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for LightEstimationDemo {
    fn kind(&self) -> DemoKind {
        DemoKind::LightEstimation
    }

    fn session_init(&self) -> SessionInit {
        SessionInit::default()
            .optional(Feature::LightEstimation)
            .optional(Feature::HitTest)
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn on_event(&mut self, ctx: &mut SessionContext, event: &SessionEvent) {
        match event {
            SessionEvent::EstimationStarted { environment } => {
                self.lighting.start(*environment, &mut self.scene);
            }
            SessionEvent::EstimationEnded => {
                self.lighting.end(&mut self.scene);
            }
            SessionEvent::DefaultEnvironmentLoaded(env) => {
                self.lighting.set_default_environment(*env, &mut self.scene);
            }
            SessionEvent::Select { controller } => {
                if ctx.require_session().is_err() {
                    return;
                }
                if let Some(ball) = self.scene.get_mut(self.ball) {
                    ball.position = controller.transform_point3(BALL_OFFSET);
                }
                self.pose_requested = true;
            }
            _ => {}
        }
    }

    fn on_frame(&mut self, _ctx: &mut SessionContext, input: &FrameInput<'_>) -> Result<(), FrameError> {
        if std::mem::take(&mut self.pose_requested) {
            match input.viewer {
                Some(pose) => log::info!("viewer position: {}", pose.transform.w_axis.truncate()),
                None => log::warn!("viewer pose not available"),
            }
        }
        Ok(())
    }
}
