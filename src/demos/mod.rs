// demos/ - The individual AR demos
//
// Each demo owns its scene and effect state. `Engine` feeds it queued
// platform events and per-frame input through the session context.

mod collision;
mod depth_view;
mod light;
mod occlusion;

pub use collision::EnvironmentCollision;
pub use depth_view::DepthView;
pub use hit_test::HitTestPlacer;
pub use light::LightEstimationDemo;
pub use occlusion::Occlusion;

use std::fmt;
use std::str::FromStr;

use crate::config::EngineConfig;
use crate::error::{ConfigError, FrameError};
use crate::heatmap::DepthHeatmap;
use crate::scene::Scene;
use crate::session::{FrameInput, SessionContext, SessionEvent, SessionInit};

const DEFAULT_SEED: u32 = 0xDEADBEEF;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoKind {
    DepthView,
    Occlusion,
    Collision,
    HitTest,
    LightEstimation,
}

impl FromStr for DemoKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "depth" | "depth-estimation" => Ok(DemoKind::DepthView),
            "occlusion" => Ok(DemoKind::Occlusion),
            "collision" | "environment-collision" => Ok(DemoKind::Collision),
            "hit-test" => Ok(DemoKind::HitTest),
            "light" | "light-estimation" => Ok(DemoKind::LightEstimation),
            other => Err(ConfigError::UnknownDemo(other.to_string())),
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DemoKind::DepthView => "depth",
            DemoKind::Occlusion => "occlusion",
            DemoKind::Collision => "collision",
            DemoKind::HitTest => "hit-test",
            DemoKind::LightEstimation => "light-estimation",
        })
    }
}

pub trait Demo {
    fn kind(&self) -> DemoKind;

    /// Features to request when the session starts.
    fn session_init(&self) -> SessionInit;

    fn scene(&self) -> &Scene;

    /// Demo-specific reaction to a platform event. Lifecycle bookkeeping has
    /// already been applied to `ctx`.
    fn on_event(&mut self, _ctx: &mut SessionContext, _event: &SessionEvent) {}

    fn on_frame(&mut self, ctx: &mut SessionContext, input: &FrameInput<'_>) -> Result<(), FrameError>;

    fn heatmap(&self) -> Option<&DepthHeatmap> {
        None
    }
}

pub struct Engine {
    ctx: SessionContext,
    demo: Box<dyn Demo>,
}

impl Engine {
    pub fn new(kind: DemoKind, cfg: EngineConfig) -> Self {
        let seed = if cfg.seed == 0 { DEFAULT_SEED } else { cfg.seed };
        let demo: Box<dyn Demo> = match kind {
            DemoKind::DepthView => Box::new(DepthView::new(&cfg)),
            DemoKind::Occlusion => Box::new(Occlusion::new(&cfg)),
            DemoKind::Collision => Box::new(EnvironmentCollision::new(&cfg, seed)),
            DemoKind::HitTest => Box::new(HitTestPlacer::new(seed)),
            DemoKind::LightEstimation => Box::new(LightEstimationDemo::new()),
        };
        log::info!("{kind} demo ready");
        Self { ctx: SessionContext::new(&cfg), demo }
    }

    pub fn post(&mut self, event: SessionEvent) {
        self.ctx.post(event);
    }

    /// Drain queued events, then run the demo's frame. An `Err` means the
    /// frame was skipped; the next one tries again.
    pub fn frame(&mut self, input: &FrameInput<'_>) -> Result<(), FrameError> {
        while let Some(event) = self.ctx.next_event() {
            self.ctx.apply(&event);
            self.demo.on_event(&mut self.ctx, &event);
        }
        self.ctx.count_frame();
        self.demo.on_frame(&mut self.ctx, input)
    }

    pub fn kind(&self) -> DemoKind {
        self.demo.kind()
    }

    pub fn session_init(&self) -> SessionInit {
        self.demo.session_init()
    }

    pub fn scene(&self) -> &Scene {
        self.demo.scene()
    }

    pub fn heatmap(&self) -> Option<&DepthHeatmap> {
        self.demo.heatmap()
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }
}

// xorshift32
#[inline]
pub(crate) fn rand(rng: &mut u32) -> f32 {
    *rng ^= *rng << 13;
    *rng ^= *rng >> 17;
    *rng ^= *rng << 5;
    (*rng >> 8) as f32 * (1.0 / 16777216.0)
}

/// Random 0xRRGGBB color.
#[inline]
pub(crate) fn random_color(rng: &mut u32) -> u32 {
    (rand(rng) * 0xffffff as f32) as u32
}
