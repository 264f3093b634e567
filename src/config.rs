// config.rs - Engine configuration
//
// Deserialized from an optional JSON string handed over by the host page.
// Every field has a default, so `{}` (or no config at all) is valid.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to substitute when the platform reports an invalid depth
/// (non-finite, or 0 which the platform uses for "unknown").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Pass the raw value through.
    None,
    /// Substitute a fixed distance in meters.
    Fixed(f32),
    /// Substitute the largest depth observed so far in the frame.
    RunningMax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 70.0,
            near: 0.01,
            far: 20.0,
            aspect: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Initial minimum for the first pass, meters.
    pub min_seed: f32,
    /// Initial maximum for the first pass, meters.
    pub max_seed: f32,
    /// Z displacement per meter of depth.
    pub scale: f32,
    pub range_fallback: FallbackPolicy,
    pub color_fallback: FallbackPolicy,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            min_seed: 0.01,
            max_seed: 5.0,
            scale: 1.0,
            range_fallback: FallbackPolicy::Fixed(2.0),
            color_fallback: FallbackPolicy::RunningMax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcclusionConfig {
    pub fallback: FallbackPolicy,
}

impl Default for OcclusionConfig {
    fn default() -> Self {
        Self { fallback: FallbackPolicy::None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Margin in meters an object may sit behind a real surface.
    pub slack: f32,
    pub collision_color: u32,
    pub clear_color: u32,
    pub fallback: FallbackPolicy,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            slack: 0.1,
            collision_color: 0xff0000,
            clear_color: 0x00ff00,
            fallback: FallbackPolicy::None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub camera: CameraConfig,
    pub heatmap: HeatmapConfig,
    pub occlusion: OcclusionConfig,
    pub collision: CollisionConfig,
    /// Seed for random object colors; 0 picks the built-in seed.
    pub seed: u32,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let (min, max) = (self.heatmap.min_seed, self.heatmap.max_seed);
        if min.is_nan() || max.is_nan() || min >= max {
            return Err(ConfigError::DepthSeeds { min, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = EngineConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.collision.slack, 0.1);
        assert_eq!(cfg.heatmap.range_fallback, FallbackPolicy::Fixed(2.0));
        assert_eq!(cfg.heatmap.color_fallback, FallbackPolicy::RunningMax);
    }

    #[test]
    fn partial_override() {
        let cfg = EngineConfig::from_json(
            r#"{ "collision": { "slack": 0.25 }, "heatmap": { "range_fallback": { "fixed": 3.0 } } }"#,
        )
        .unwrap();
        assert_eq!(cfg.collision.slack, 0.25);
        assert_eq!(cfg.collision.clear_color, 0x00ff00);
        assert_eq!(cfg.heatmap.range_fallback, FallbackPolicy::Fixed(3.0));
        assert_eq!(cfg.heatmap.max_seed, 5.0);
    }

    #[test]
    fn unit_policy_parses() {
        let cfg = EngineConfig::from_json(r#"{ "occlusion": { "fallback": "running_max" } }"#).unwrap();
        assert_eq!(cfg.occlusion.fallback, FallbackPolicy::RunningMax);
    }

    #[test]
    fn depth_seeds_must_be_ordered() {
        for json in [
            r#"{ "heatmap": { "min_seed": 2.0, "max_seed": 2.0 } }"#,
            r#"{ "heatmap": { "min_seed": 6.0 } }"#,
        ] {
            assert!(matches!(EngineConfig::from_json(json), Err(ConfigError::DepthSeeds { .. })));
        }
        assert!(EngineConfig::from_json(r#"{ "heatmap": { "min_seed": 0.5, "max_seed": 1.0 } }"#).is_ok());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            EngineConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }
}
