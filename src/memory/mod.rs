/*!
 * Memory Module
 * Allocation tracking, location attribution and device backends
 */

pub mod device;
pub mod interner;
pub mod location;
pub mod tracing_allocator;
pub mod tracker;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use device::{DefaultDeviceAllocator, HostAllocator};
#[cfg(feature = "cuda")]
pub use device::CudaAllocator;
pub use interner::LocationInterner;
pub use location::{caller_label, source_label, CurrentLocation, LocationFilter};
pub use tracing_allocator::TracingAllocator;
pub use tracker::AllocationTracker;
pub use traits::*;
pub use types::*;
