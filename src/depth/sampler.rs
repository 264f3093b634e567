// sampler.rs - Depth sampling with fallback
//
// Query errors are logged here and reported as `None`; they never leave a
// frame. Invalid values are replaced per call-site policy.

use super::DepthSource;
use crate::config::FallbackPolicy;

/// The platform reports 0 for pixels it has no estimate for.
#[inline]
pub fn is_valid_depth(d: f32) -> bool {
    d.is_finite() && d != 0.0
}

/// Apply a fallback policy to a raw depth value.
#[inline]
pub fn resolve(raw: f32, policy: FallbackPolicy, running_max: f32) -> f32 {
    if is_valid_depth(raw) {
        return raw;
    }
    match policy {
        FallbackPolicy::None => raw,
        FallbackPolicy::Fixed(d) => d,
        FallbackPolicy::RunningMax => running_max,
    }
}

/// Sample depth at normalized coordinates. `None` means no data at this point.
pub fn sample(
    source: &dyn DepthSource,
    u: f32,
    v: f32,
    policy: FallbackPolicy,
    running_max: f32,
) -> Option<f32> {
    match source.depth_at(u, v) {
        Ok(raw) => Some(resolve(raw, policy, running_max)),
        Err(err) => {
            log::error!("depth query at ({u}, {v}) failed: {err}");
            None
        }
    }
}
