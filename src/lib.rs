use glam::Mat4;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod demos;
pub mod depth;
pub mod effects;
pub mod error;
pub mod heatmap;
pub mod project;
pub mod scene;
pub mod session;
pub mod web;

use config::EngineConfig;
use demos::{DemoKind, Engine};
use depth::{DepthBuffer, DepthSource};
use scene::EnvironmentId;
use session::{FrameInput, HitTestSource, SessionEvent, ViewerPose};
use web::JsDepthInformation;

// ============================================================================
// AR DEMO - wasm entry point driven by the host page's XR animation loop
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

#[wasm_bindgen]
pub struct ArDemo {
    engine: Engine,
}

#[wasm_bindgen]
impl ArDemo {
    /// `kind`: depth | occlusion | collision | hit-test | light-estimation.
    /// `config`: optional JSON overriding engine defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, config: Option<String>) -> Result<ArDemo, JsValue> {
        let kind: DemoKind = kind.parse().map_err(to_js)?;
        let cfg = match config {
            Some(json) => EngineConfig::from_json(&json).map_err(to_js)?,
            None => EngineConfig::default(),
        };
        Ok(Self { engine: Engine::new(kind, cfg) })
    }

    pub fn kind(&self) -> String {
        self.engine.kind().to_string()
    }

    /// Session request options as JSON (`requiredFeatures`, ...).
    pub fn session_init(&self) -> String {
        self.engine.session_init().to_json()
    }

    // Platform events, applied at the start of the next frame

    pub fn session_started(&mut self) {
        self.engine.post(SessionEvent::SessionStarted);
    }

    pub fn session_ended(&mut self) {
        self.engine.post(SessionEvent::SessionEnded);
    }

    pub fn reference_space_ready(&mut self) {
        self.engine.post(SessionEvent::ReferenceSpaceReady);
    }

    pub fn hit_test_source_ready(&mut self, id: u32) {
        self.engine.post(SessionEvent::HitTestSourceReady(HitTestSource(id)));
    }

    pub fn select(&mut self, controller: &[f32]) {
        let Some(controller) = mat4(controller) else {
            log::warn!("dropping select with a {}-float controller matrix", controller.len());
            return;
        };
        self.engine.post(SessionEvent::Select { controller });
    }

    pub fn estimation_started(&mut self, environment: Option<u32>) {
        self.engine.post(SessionEvent::EstimationStarted {
            environment: environment.map(EnvironmentId),
        });
    }

    pub fn estimation_ended(&mut self) {
        self.engine.post(SessionEvent::EstimationEnded);
    }

    pub fn default_environment_loaded(&mut self, id: u32) {
        self.engine.post(SessionEvent::DefaultEnvironmentLoaded(EnvironmentId(id)));
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.post(SessionEvent::Resize { width, height });
    }

    /// One XR frame. `depth` is the platform depth object (or null);
    /// matrices are column-major 16-float arrays, `hit_results` packs any
    /// number of them. Returns false if the frame was skipped.
    pub fn frame(&mut self, depth: JsValue, viewer: &[f32], projection: &[f32], hit_results: &[f32]) -> bool {
        let depth = JsDepthInformation::from_js(depth);
        self.run(depth.as_ref().map(|d| d as &dyn DepthSource), viewer, projection, hit_results)
    }

    /// Like `frame`, with depth as a row-major buffer of meters.
    pub fn frame_with_buffer(
        &mut self,
        meters: Vec<f32>,
        width: u32,
        height: u32,
        viewer: &[f32],
        projection: &[f32],
        hit_results: &[f32],
    ) -> bool {
        let depth = DepthBuffer::new(width, height, meters)
            .map_err(|err| log::error!("rejected depth buffer: {err}"))
            .ok();
        self.run(depth.as_ref().map(|d| d as &dyn DepthSource), viewer, projection, hit_results)
    }

    /// Like `frame`, with the platform's raw luminance-alpha depth data
    /// (one u16 per pixel) and its `rawValueToMeters`.
    #[allow(clippy::too_many_arguments)]
    pub fn frame_with_luminance_alpha(
        &mut self,
        raw: Vec<u8>,
        width: u32,
        height: u32,
        raw_value_to_meters: f32,
        viewer: &[f32],
        projection: &[f32],
        hit_results: &[f32],
    ) -> bool {
        let depth = DepthBuffer::from_luminance_alpha(width, height, &raw, raw_value_to_meters)
            .map_err(|err| log::error!("rejected luminance-alpha depth: {err}"))
            .ok();
        self.run(depth.as_ref().map(|d| d as &dyn DepthSource), viewer, projection, hit_results)
    }

    pub fn scene_json(&self) -> String {
        self.engine.scene().to_json()
    }

    pub fn frames(&self) -> u64 {
        self.engine.context().frames()
    }

    // Heatmap buffers (depth demo only; null/0 otherwise)

    pub fn positions_ptr(&self) -> *const f32 {
        self.engine.heatmap().map_or(std::ptr::null(), |h| h.positions().as_ptr())
    }
    pub fn positions_len(&self) -> usize {
        self.engine.heatmap().map_or(0, |h| h.positions().len())
    }
    pub fn colors_ptr(&self) -> *const f32 {
        self.engine.heatmap().map_or(std::ptr::null(), |h| h.colors().as_ptr())
    }
    pub fn colors_len(&self) -> usize {
        self.engine.heatmap().map_or(0, |h| h.colors().len())
    }
    pub fn normals_ptr(&self) -> *const f32 {
        self.engine.heatmap().map_or(std::ptr::null(), |h| h.normals().as_ptr())
    }
    pub fn normals_len(&self) -> usize {
        self.engine.heatmap().map_or(0, |h| h.normals().len())
    }
    pub fn grid_width(&self) -> u32 {
        self.engine.heatmap().map_or(0, |h| h.width())
    }
    pub fn grid_height(&self) -> u32 {
        self.engine.heatmap().map_or(0, |h| h.height())
    }
    pub fn generation(&self) -> u32 {
        self.engine.heatmap().map_or(0, |h| h.generation())
    }
}

impl ArDemo {
    fn run(
        &mut self,
        depth: Option<&dyn DepthSource>,
        viewer: &[f32],
        projection: &[f32],
        hit_results: &[f32],
    ) -> bool {
        let hits = matrices(hit_results);
        let input = FrameInput {
            depth,
            viewer: mat4(viewer).map(|transform| ViewerPose {
                transform,
                projection: mat4(projection),
            }),
            hit_results: &hits,
        };

        match self.engine.frame(&input) {
            Ok(()) => true,
            Err(err) => {
                log::debug!("frame skipped: {err}");
                false
            }
        }
    }
}

fn to_js(err: error::ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Column-major 4x4 from exactly 16 floats.
fn mat4(m: &[f32]) -> Option<Mat4> {
    <&[f32; 16]>::try_from(m).ok().map(Mat4::from_cols_array)
}

/// Packed column-major matrices; a trailing partial matrix is dropped.
fn matrices(packed: &[f32]) -> Vec<Mat4> {
    let chunks = packed.chunks_exact(16);
    if !chunks.remainder().is_empty() {
        log::warn!("ignoring {} trailing floats in matrix list", chunks.remainder().len());
    }
    chunks.map(Mat4::from_cols_slice).collect()
}
