/*!
 * Memory Types
 * Allocation records and aggregate statistics
 */

use crate::core::types::{Address, LocationHandle, Size};
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Live allocation table keyed by device pointer value
pub type LiveAllocations = HashMap<Address, Allocation, RandomState>;

/// One currently-live allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub size: Size,
    pub location: LocationHandle,
}

impl Allocation {
    pub fn new(size: Size, location: LocationHandle) -> Self {
        Self { size, location }
    }
}

/// Aggregate allocation state at one point in time
///
/// `total_bytes` and `total_allocs` only ever grow; the `current_*` fields
/// describe live state and return to zero once everything is freed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllocationStats {
    pub current_bytes: Size,
    pub total_bytes: Size,
    pub current_allocs: usize,
    pub total_allocs: usize,
    pub live_allocations: LiveAllocations,
}

impl AllocationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.live_allocations.is_empty()
    }

    /// Look up a live allocation by address
    pub fn get(&self, address: Address) -> Option<&Allocation> {
        self.live_allocations.get(&address)
    }
}

/// When the tracker compares live usage against the recorded peak
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakCheck {
    /// Check after every allocation and every free
    #[default]
    AllocAndFree,
    /// Check only after frees (and when reporting); a peak reached by an
    /// allocation is captured by the next free
    FreeOnly,
}

impl PeakCheck {
    pub fn checks_on_alloc(self) -> bool {
        matches!(self, PeakCheck::AllocAndFree)
    }
}

impl FromStr for PeakCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alloc_and_free" | "alloc-and-free" | "always" => Ok(PeakCheck::AllocAndFree),
            "free_only" | "free-only" | "free" => Ok(PeakCheck::FreeOnly),
            other => Err(format!("unknown peak check policy: {}", other)),
        }
    }
}

impl std::fmt::Display for PeakCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PeakCheck::AllocAndFree => write!(f, "alloc_and_free"),
            PeakCheck::FreeOnly => write!(f, "free_only"),
        }
    }
}
