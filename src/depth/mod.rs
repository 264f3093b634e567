// depth/ - Depth frame queries
//
// A depth frame is only valid for the frame callback that produced it.
// Nothing here stores one.

mod buffer;
mod sampler;

pub use buffer::*;
pub use sampler::*;
