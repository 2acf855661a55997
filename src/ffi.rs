/*!
 * C ABI
 * Pluggable-allocator entry points over one process-wide tracing allocator
 *
 * Symbol names follow the hosting framework's allocator contract:
 * `malloc_impl` / `free_impl` are registered as the allocator pair,
 * `push_line` and `report_stats` are called from the host language.
 */

use crate::core::config::TracerConfig;
use crate::core::types::Stream;
use crate::memory::{DefaultDeviceAllocator, TracingAllocator};
use crate::monitoring::init_tracing;
use crate::report::Report;
use parking_lot::{const_mutex, Mutex};
use std::ffi::{c_char, c_int, c_void, CStr};
use tracing::{error, warn};

type GlobalTracer = TracingAllocator<DefaultDeviceAllocator>;

// Lock exists only to make the static sound; the host serializes calls
static TRACER: Mutex<Option<GlobalTracer>> = const_mutex(None);

fn create_tracer() -> GlobalTracer {
    let config = TracerConfig::from_env();
    init_tracing(config.as_ref().map_or(false, |c| c.trace_json));

    let config = config.unwrap_or_else(|e| {
        warn!(error = %e, "Invalid tracer configuration, using defaults");
        TracerConfig::default()
    });

    TracingAllocator::with_config(DefaultDeviceAllocator::default(), &config).unwrap_or_else(|e| {
        warn!(error = %e, "Invalid location patterns, accepting all locations");
        TracingAllocator::new(DefaultDeviceAllocator::default())
    })
}

fn with_tracer<R>(f: impl FnOnce(&mut GlobalTracer) -> R) -> R {
    let mut guard = TRACER.lock();
    f(guard.get_or_insert_with(create_tracer))
}

/// Peak report of the process-wide tracer
pub fn global_report() -> Report {
    with_tracer(|tracer| tracer.report())
}

/// Set the current location label. Null is a no-op.
///
/// # Safety
/// `line` must be null or point to a NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn push_line(line: *const c_char) {
    if line.is_null() {
        return;
    }
    let label = CStr::from_ptr(line).to_string_lossy();
    with_tracer(|tracer| tracer.set_location(Some(&*label)));
}

/// Allocate through the device backend and track it. Returns null on failure.
#[no_mangle]
pub extern "C" fn malloc_impl(size: usize, device: c_int, stream: *mut c_void) -> *mut c_void {
    with_tracer(|tracer| tracer.allocate(size, device, Stream::from_raw(stream)))
        .map_or(std::ptr::null_mut(), |address| address as *mut c_void)
}

/// Stop tracking `ptr` and release it through the device backend
#[no_mangle]
pub extern "C" fn free_impl(ptr: *mut c_void, size: usize, device: c_int, stream: *mut c_void) {
    // Failures are logged by the tracer; the host has no error channel here
    let _ = with_tracer(|tracer| {
        tracer.deallocate(ptr as usize, size, device, Stream::from_raw(stream))
    });
}

/// Print the peak report to stdout
#[no_mangle]
pub extern "C" fn report_stats() {
    if let Err(e) = with_tracer(|tracer| tracer.print_report()) {
        error!(error = %e, "Failed to print report");
    }
}

/// Clear live and peak statistics, keeping the current location
#[no_mangle]
pub extern "C" fn reset_stats() {
    with_tracer(|tracer| tracer.reset());
}
