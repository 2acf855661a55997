/*!
 * Tracing Allocator
 * Delegates to a device allocator and attributes every call to a location
 */

use super::location::{caller_label, CurrentLocation, LocationFilter};
use super::tracker::AllocationTracker;
use super::traits::DeviceAllocator;
use crate::core::config::TracerConfig;
use crate::core::types::{Address, DeviceId, Size, Stream, TracerResult};
use crate::report::{Report, ReportFormat};
use std::io::Write;
use tracing::{error, info};

/// Allocation front-end composing the location marker, tracker and backend
///
/// Not synchronized: callers serialize access (the C ABI does so with a lock).
pub struct TracingAllocator<A: DeviceAllocator> {
    device: A,
    tracker: AllocationTracker,
    location: CurrentLocation,
    report_format: ReportFormat,
}

impl<A: DeviceAllocator> TracingAllocator<A> {
    /// Create with default configuration
    pub fn new(device: A) -> Self {
        Self {
            device,
            tracker: AllocationTracker::new(),
            location: CurrentLocation::new(),
            report_format: ReportFormat::default(),
        }
    }

    /// Create from a configuration; fails only on invalid location patterns
    pub fn with_config(device: A, config: &TracerConfig) -> TracerResult<Self> {
        let filter = LocationFilter::new(&config.location_patterns)?;
        info!(
            backend = device.name(),
            peak_check = %config.peak_check,
            report_format = ?config.report_format,
            patterns = config.location_patterns.len(),
            "Tracing allocator initialized"
        );
        Ok(Self {
            device,
            tracker: AllocationTracker::with_peak_check(config.peak_check),
            location: CurrentLocation::with_filter(filter),
            report_format: config.report_format,
        })
    }

    /// Set the current call-site hint; `None`, empty and filtered labels are ignored
    pub fn set_location(&mut self, label: Option<&str>) -> bool {
        self.location.set(label)
    }

    pub fn current_location(&self) -> &str {
        self.location.get()
    }

    /// Allocate attributed to the current location
    pub fn allocate(&mut self, size: Size, device: DeviceId, stream: Stream) -> TracerResult<Address> {
        let address = self.malloc(size, device, stream)?;
        self.tracker.track_alloc(address, size, self.location.get());
        Ok(address)
    }

    /// Allocate attributed to an explicit location, leaving the marker untouched
    pub fn allocate_at(
        &mut self,
        location: &str,
        size: Size,
        device: DeviceId,
        stream: Stream,
    ) -> TracerResult<Address> {
        let address = self.malloc(size, device, stream)?;
        self.tracker.track_alloc(address, size, location);
        Ok(address)
    }

    /// Allocate attributed to the calling Rust source line
    #[track_caller]
    pub fn allocate_here(
        &mut self,
        size: Size,
        device: DeviceId,
        stream: Stream,
    ) -> TracerResult<Address> {
        let label = caller_label(std::panic::Location::caller());
        self.allocate_at(&label, size, device, stream)
    }

    /// Stop tracking `address`, then release it on the device
    pub fn deallocate(
        &mut self,
        address: Address,
        size: Size,
        device: DeviceId,
        stream: Stream,
    ) -> TracerResult<()> {
        self.tracker.track_free(address, size);
        self.device
            .free(address, size, device, stream)
            .inspect_err(|e| error!(address, size, device, error = %e, "Device free failed"))
    }

    /// Build the peak report
    pub fn report(&mut self) -> Report {
        self.tracker.report()
    }

    /// Write the peak report in the configured format
    pub fn write_report<W: Write>(&mut self, writer: &mut W) -> TracerResult<()> {
        let format = self.report_format;
        self.report().write_to(writer, format)
    }

    /// Print the peak report to stdout in the configured format
    pub fn print_report(&mut self) -> TracerResult<()> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.write_report(&mut handle)
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn tracker(&self) -> &AllocationTracker {
        &self.tracker
    }

    pub fn device(&self) -> &A {
        &self.device
    }

    pub fn report_format(&self) -> ReportFormat {
        self.report_format
    }

    fn malloc(&self, size: Size, device: DeviceId, stream: Stream) -> TracerResult<Address> {
        self.device
            .malloc(size, device, stream)
            .inspect_err(|e| error!(size, device, error = %e, "Device allocation failed"))
    }
}

impl<A: DeviceAllocator + Default> Default for TracingAllocator<A> {
    fn default() -> Self {
        Self::new(A::default())
    }
}
