/*!
 * Memory Traits
 * Device allocator abstraction
 */

use crate::core::types::{Address, DeviceId, Size, Stream, TracerResult};

/// The allocator that actually owns device memory
///
/// The tracer only observes; every real allocation and deallocation is
/// delegated here. Failures are returned as-is and never retried.
pub trait DeviceAllocator {
    /// Allocate `size` bytes on `device`, returning the device pointer value
    fn malloc(&self, size: Size, device: DeviceId, stream: Stream) -> TracerResult<Address>;

    /// Release an allocation previously returned by `malloc`
    fn free(&self, address: Address, size: Size, device: DeviceId, stream: Stream)
        -> TracerResult<()>;

    /// Short name used in log output
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<A: DeviceAllocator + ?Sized> DeviceAllocator for &A {
    fn malloc(&self, size: Size, device: DeviceId, stream: Stream) -> TracerResult<Address> {
        (**self).malloc(size, device, stream)
    }

    fn free(
        &self,
        address: Address,
        size: Size,
        device: DeviceId,
        stream: Stream,
    ) -> TracerResult<()> {
        (**self).free(address, size, device, stream)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
