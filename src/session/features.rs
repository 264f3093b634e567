// features.rs - Session feature descriptors
//
// What each demo asks the platform for. The host passes the JSON form
// straight to its session request; the engine never negotiates.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    DepthSensing,
    HitTest,
    LightEstimation,
    HandTracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthUsage {
    CpuOptimized,
    GpuOptimized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthFormat {
    LuminanceAlpha,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthSensing {
    pub usage_preference: Vec<DepthUsage>,
    pub data_format_preference: Vec<DepthFormat>,
}

impl DepthSensing {
    /// CPU access first, GPU as a second choice.
    pub fn cpu_then_gpu() -> Self {
        Self {
            usage_preference: vec![DepthUsage::CpuOptimized, DepthUsage::GpuOptimized],
            data_format_preference: vec![DepthFormat::LuminanceAlpha],
        }
    }

    pub fn cpu_only() -> Self {
        Self {
            usage_preference: vec![DepthUsage::CpuOptimized],
            data_format_preference: vec![DepthFormat::LuminanceAlpha],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInit {
    pub required_features: Vec<Feature>,
    pub optional_features: Vec<Feature>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_sensing: Option<DepthSensing>,
}

impl SessionInit {
    pub fn require(mut self, f: Feature) -> Self {
        self.required_features.push(f);
        self
    }

    pub fn optional(mut self, f: Feature) -> Self {
        self.optional_features.push(f);
        self
    }

    pub fn with_depth(mut self, depth: DepthSensing) -> Self {
        self.depth_sensing = Some(depth);
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            log::error!("session init serialization failed: {err}");
            String::from("{}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_webxr_shape() {
        let init = SessionInit::default()
            .require(Feature::DepthSensing)
            .optional(Feature::HitTest)
            .with_depth(DepthSensing::cpu_then_gpu());
        let v: serde_json::Value = serde_json::from_str(&init.to_json()).unwrap();

        assert_eq!(v["requiredFeatures"][0], "depth-sensing");
        assert_eq!(v["optionalFeatures"][0], "hit-test");
        assert_eq!(v["depthSensing"]["usagePreference"][1], "gpu-optimized");
        assert_eq!(v["depthSensing"]["dataFormatPreference"][0], "luminance-alpha");
    }

    #[test]
    fn depth_block_omitted_when_unused() {
        let init = SessionInit::default().optional(Feature::LightEstimation);
        let v: serde_json::Value = serde_json::from_str(&init.to_json()).unwrap();
        assert!(v.get("depthSensing").is_none());
        assert!(init.optional_features.contains(&Feature::LightEstimation));
        assert!(!init.required_features.contains(&Feature::DepthSensing));
    }
}
