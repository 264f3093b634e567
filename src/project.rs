// project.rs - Camera and world -> depth-image projection
//
// Same conventions as the host renderer: right-handed, OpenGL clip space,
// camera looking down -Z.

use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;

#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera-to-world transform.
    pub world: Mat4,
    pub projection: Mat4,
    cfg: CameraConfig,
}

impl Camera {
    pub fn new(cfg: CameraConfig) -> Self {
        Self {
            world: Mat4::IDENTITY,
            projection: perspective(&cfg),
            cfg,
        }
    }

    /// Window resize. Only affects the default projection; a viewer pose
    /// replaces it with the platform's.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.cfg.aspect = aspect;
        self.projection = perspective(&self.cfg);
    }

    pub fn aspect(&self) -> f32 {
        self.cfg.aspect
    }

    /// Adopt the viewer pose for this frame.
    pub fn update_from_viewer(&mut self, transform: Mat4, projection: Option<Mat4>) {
        self.world = transform;
        if let Some(p) = projection {
            self.projection = p;
        }
    }

    pub fn position(&self) -> Vec3 {
        self.world.w_axis.truncate()
    }

    /// World point to normalized device coordinates (perspective divide).
    pub fn project(&self, point: Vec3) -> Vec3 {
        (self.projection * self.world.inverse()).project_point3(point)
    }

    /// World point to normalized depth-image coordinates, Y flipped and
    /// clamped to [0, 1].
    pub fn depth_uv(&self, point: Vec3) -> Vec2 {
        ndc_to_uv(self.project(point))
    }

    /// Straight-line distance from the camera.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position().distance(point)
    }
}

#[inline]
pub fn ndc_to_uv(ndc: Vec3) -> Vec2 {
    let u = (ndc.x + 1.0) / 2.0;
    let v = 1.0 - (ndc.y + 1.0) / 2.0;
    // NaN-safe clamp: a point at the camera origin projects to NaN
    Vec2::new(clamp01(u), clamp01(v))
}

#[inline]
fn clamp01(x: f32) -> f32 {
    if x.is_nan() { 0.5 } else { x.clamp(0.0, 1.0) }
}

fn perspective(cfg: &CameraConfig) -> Mat4 {
    Mat4::perspective_rh_gl(cfg.fov_deg.to_radians(), cfg.aspect, cfg.near, cfg.far)
}
