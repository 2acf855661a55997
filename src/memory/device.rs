/*!
 * Device Allocators
 * Backends that perform the real allocation behind the tracer
 */

use super::traits::DeviceAllocator;
use crate::core::errors::TracerError;
use crate::core::limits::HOST_ALLOCATION_ALIGNMENT;
use crate::core::types::{Address, DeviceId, Size, Stream, TracerResult};
use std::alloc::Layout;

/// Host-memory backend
///
/// Hands out host allocations with CUDA's 256-byte alignment so the shim can
/// run (and be tested) on machines without a GPU. Device and stream are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostAllocator;

impl HostAllocator {
    pub fn new() -> Self {
        Self
    }

    fn layout(size: Size, device: DeviceId) -> TracerResult<Layout> {
        // Zero-sized requests still need a unique address
        Layout::from_size_align(size.max(1), HOST_ALLOCATION_ALIGNMENT).map_err(|e| {
            TracerError::AllocationFailed {
                size,
                device,
                reason: e.to_string(),
            }
        })
    }
}

impl DeviceAllocator for HostAllocator {
    fn malloc(&self, size: Size, device: DeviceId, _stream: Stream) -> TracerResult<Address> {
        let layout = Self::layout(size, device)?;
        // SAFETY: layout has non-zero size
        let ptr = unsafe { std::alloc::alloc(layout) };
        if ptr.is_null() {
            return Err(TracerError::AllocationFailed {
                size,
                device,
                reason: "host allocator returned null".to_string(),
            });
        }
        Ok(ptr as Address)
    }

    fn free(
        &self,
        address: Address,
        size: Size,
        device: DeviceId,
        _stream: Stream,
    ) -> TracerResult<()> {
        if address == 0 {
            return Ok(());
        }
        let layout = Self::layout(size, device).map_err(|e| TracerError::DeallocationFailed {
            address,
            device,
            reason: e.to_string(),
        })?;
        // SAFETY: the caller hands back an address from `malloc` with its original size
        unsafe { std::alloc::dealloc(address as *mut u8, layout) };
        Ok(())
    }

    fn name(&self) -> &'static str {
        "host"
    }
}

#[cfg(feature = "cuda")]
pub use cuda::CudaAllocator;

#[cfg(feature = "cuda")]
mod cuda {
    use super::*;
    use std::ffi::{c_char, c_int, c_void, CStr};

    /// CUDA runtime error code. 0 = success.
    #[allow(non_camel_case_types)]
    type cudaError_t = c_int;

    const CUDA_SUCCESS: cudaError_t = 0;

    #[link(name = "cudart")]
    extern "C" {
        fn cudaMalloc(dev_ptr: *mut *mut c_void, size: usize) -> cudaError_t;
        fn cudaFree(dev_ptr: *mut c_void) -> cudaError_t;
        fn cudaGetErrorString(error: cudaError_t) -> *const c_char;
    }

    fn error_string(code: cudaError_t) -> String {
        // SAFETY: cudaGetErrorString returns a static NUL-terminated string
        let ptr = unsafe { cudaGetErrorString(code) };
        if ptr.is_null() {
            return format!("CUDA error {}", code);
        }
        unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
    }

    /// CUDA runtime backend (`cudaMalloc` / `cudaFree`)
    ///
    /// Allocates on the calling thread's current device; the stream is not
    /// used by the synchronous runtime calls.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct CudaAllocator;

    impl CudaAllocator {
        pub fn new() -> Self {
            Self
        }
    }

    impl DeviceAllocator for CudaAllocator {
        fn malloc(&self, size: Size, device: DeviceId, _stream: Stream) -> TracerResult<Address> {
            let mut ptr: *mut c_void = std::ptr::null_mut();
            // SAFETY: ptr is a valid out-parameter
            let code = unsafe { cudaMalloc(&mut ptr, size) };
            if code != CUDA_SUCCESS {
                return Err(TracerError::AllocationFailed {
                    size,
                    device,
                    reason: error_string(code),
                });
            }
            Ok(ptr as Address)
        }

        fn free(
            &self,
            address: Address,
            _size: Size,
            device: DeviceId,
            _stream: Stream,
        ) -> TracerResult<()> {
            // SAFETY: address came from cudaMalloc
            let code = unsafe { cudaFree(address as *mut c_void) };
            if code != CUDA_SUCCESS {
                return Err(TracerError::DeallocationFailed {
                    address,
                    device,
                    reason: error_string(code),
                });
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "cuda"
        }
    }
}

/// Backend used by the C ABI shims
#[cfg(feature = "cuda")]
pub type DefaultDeviceAllocator = CudaAllocator;

/// Backend used by the C ABI shims
#[cfg(not(feature = "cuda"))]
pub type DefaultDeviceAllocator = HostAllocator;
