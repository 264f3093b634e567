// effects/ - Per-frame effects derived from depth and pose data
//
// Each effect mutates scene objects directly; none of them keeps a depth
// frame past the call.

mod collision;
mod lighting;
mod occlusion;
mod placement;

pub use collision::{Collision, CollisionCheck};
pub use lighting::{LightEstimation, LightingState};
pub use occlusion::OcclusionTest;
pub use placement::{HitTestPlacement, PlacementMode};
