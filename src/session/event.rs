// event.rs - Platform callbacks as queued events
//
// The host posts these as the platform fires them; the frame loop drains
// the queue before doing per-frame work.

use glam::Mat4;

use crate::scene::EnvironmentId;

/// Host-side id of a standing hit-test query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestSource(pub u32);

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SessionStarted,
    SessionEnded,
    /// The reference space requested at session start resolved.
    ReferenceSpaceReady,
    HitTestSourceReady(HitTestSource),
    /// Primary input "select", with the controller's world transform.
    Select { controller: Mat4 },
    EstimationStarted { environment: Option<EnvironmentId> },
    EstimationEnded,
    DefaultEnvironmentLoaded(EnvironmentId),
    Resize { width: u32, height: u32 },
}
