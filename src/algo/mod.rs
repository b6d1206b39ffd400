//! Mesh processing algorithms.
//!
//! - **Subdivision**: Catmull-Clark and Loop, plus the driver that applies
//!   them in batches and tracks the cumulative depth
//! - **Progress**: callback used by long-running operations

pub mod progress;
pub mod subdivide;

pub use progress::Progress;
