// light.rs - Scene lighting

use glam::Vec3;
use serde::Serialize;

/// Host-side handle of an environment map (HDR texture or estimated cubemap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnvironmentId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Light {
    Ambient { color: u32, intensity: f32 },
    Hemisphere { sky: u32, ground: u32, intensity: f32, position: Vec3 },
    /// Platform-estimated light; parameters live on the host.
    Estimated,
}

impl Light {
    pub fn ambient() -> Self {
        Light::Ambient { color: 0xffffff, intensity: 1.0 }
    }

    pub fn hemisphere(intensity: f32) -> Self {
        Light::Hemisphere {
            sky: 0xffffff,
            ground: 0xbbbbff,
            intensity,
            position: Vec3::new(0.5, 1.0, 0.25),
        }
    }
}
