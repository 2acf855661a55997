/*!
 * Allocation Tracker
 * Live bookkeeping and peak snapshots
 */

use super::interner::LocationInterner;
use super::types::{Allocation, AllocationStats, PeakCheck};
use crate::core::types::{Address, LocationHandle, Size};
use crate::report::{format_bytes, Report};
use tracing::{debug, info, warn};

/// Tracks live allocations and keeps a copy of the state at peak usage
///
/// The peak snapshot is a deep copy of the live table taken at the moment
/// live bytes exceeded the previous peak, never a merge of later state.
#[derive(Debug, Clone, Default)]
pub struct AllocationTracker {
    live: AllocationStats,
    peak: AllocationStats,
    interner: LocationInterner,
    peak_check: PeakCheck,
}

impl AllocationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_peak_check(peak_check: PeakCheck) -> Self {
        Self {
            peak_check,
            ..Self::default()
        }
    }

    /// Record an allocation attributed to `location`
    pub fn track_alloc(&mut self, address: Address, size: Size, location: &str) -> LocationHandle {
        let handle = self.interner.intern(location);

        self.live.current_bytes += size;
        self.live.total_bytes += size;
        self.live.current_allocs += 1;
        self.live.total_allocs += 1;

        if let Some(previous) = self
            .live
            .live_allocations
            .insert(address, Allocation::new(size, handle))
        {
            warn!(
                address,
                previous_size = previous.size,
                size,
                "Address tracked twice without a free; overwriting"
            );
        }

        debug!(
            address,
            size,
            location,
            current_bytes = self.live.current_bytes,
            "Tracked allocation"
        );

        if self.peak_check.checks_on_alloc() {
            self.check_peak();
        }

        handle
    }

    /// Record a free; untracked addresses only adjust the counters
    pub fn track_free(&mut self, address: Address, size: Size) {
        self.live.current_bytes = self.live.current_bytes.saturating_sub(size);
        self.live.current_allocs = self.live.current_allocs.saturating_sub(1);

        if self.live.live_allocations.remove(&address).is_none() {
            warn!(address, size, "Freed an address that was not tracked");
        } else {
            debug!(
                address,
                size,
                current_bytes = self.live.current_bytes,
                "Tracked free"
            );
        }

        self.check_peak();
    }

    /// Snapshot live state if it exceeds the recorded peak
    pub fn check_peak(&mut self) -> bool {
        if self.live.current_bytes <= self.peak.current_bytes {
            return false;
        }

        self.peak = self.live.clone();
        info!(
            peak_bytes = self.peak.current_bytes,
            peak = %format_bytes(self.peak.current_bytes),
            live_allocs = self.peak.current_allocs,
            "New peak memory usage"
        );
        true
    }

    /// Run a final peak check and build the report from the peak snapshot
    pub fn report(&mut self) -> Report {
        self.check_peak();
        Report::from_stats(&self.peak, &self.interner)
    }

    /// Forget live and peak statistics; interned labels are kept
    pub fn reset(&mut self) {
        self.live = AllocationStats::default();
        self.peak = AllocationStats::default();
        info!("Allocation statistics reset");
    }

    pub fn live_stats(&self) -> &AllocationStats {
        &self.live
    }

    pub fn peak_stats(&self) -> &AllocationStats {
        &self.peak
    }

    pub fn interner(&self) -> &LocationInterner {
        &self.interner
    }

    pub fn peak_check(&self) -> PeakCheck {
        self.peak_check
    }
}
