/*!
 * GPU Memory Tracer Library
 * Pluggable allocator backend that attributes peak device memory to call sites
 */

pub mod core;
pub mod ffi;
pub mod memory;
pub mod monitoring;
pub mod report;

// Re-exports
pub use crate::core::{TracerConfig, TracerError, TracerResult};
pub use crate::core::types::{Address, DeviceId, LocationHandle, Size, Stream};
pub use memory::{
    AllocationStats, AllocationTracker, DeviceAllocator, HostAllocator, LocationInterner,
    PeakCheck, TracingAllocator,
};
pub use monitoring::init_tracing;
pub use report::{format_bytes, Report, ReportFormat};
