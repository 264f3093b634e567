// depth_view.rs - Live depth heatmap
//
// The whole depth frame rendered as a displaced, colorized plane.

use super::{Demo, DemoKind};
use crate::config::EngineConfig;
use crate::error::FrameError;
use crate::heatmap::DepthHeatmap;
use crate::scene::{Light, Material, Scene, SceneObject, Shape};
use crate::session::{DepthSensing, Feature, FrameInput, SessionContext, SessionInit};

pub struct DepthView {
    scene: Scene,
    heatmap: DepthHeatmap,
}

impl DepthView {
    pub fn new(cfg: &EngineConfig) -> Self {
        let mut scene = Scene::new();
        scene.add_light(Light::ambient());
        scene.add(SceneObject::new(
            Shape::DepthMesh,
            Material::Basic { vertex_colors: true },
            0xffffff,
        ));
        Self {
            scene,
            heatmap: DepthHeatmap::new(cfg.heatmap.clone()),
        }
    }
}

impl Demo for DepthView {
    fn kind(&self) -> DemoKind {
        DemoKind::DepthView
    }

    fn session_init(&self) -> SessionInit {
        SessionInit::default()
            .require(Feature::DepthSensing)
            .optional(Feature::HitTest)
            .optional(Feature::HandTracking)
            .with_depth(DepthSensing::cpu_then_gpu())
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn on_frame(&mut self, ctx: &mut SessionContext, input: &FrameInput<'_>) -> Result<(), FrameError> {
        ctx.require_reference_space()?;
        ctx.require_viewer(input)?;
        let depth = input.depth.ok_or(FrameError::NoDepth)?;

        self.heatmap.rebuild(depth);
        Ok(())
    }

    fn heatmap(&self) -> Option<&DepthHeatmap> {
        Some(&self.heatmap)
    }
}
