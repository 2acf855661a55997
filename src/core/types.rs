/*!
 * Core Types
 * Common types used across the tracer
 */

use serde::{Deserialize, Serialize};

/// Address type for tracked allocations (raw device pointer value)
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Device ordinal as passed by the hosting framework
pub type DeviceId = i32;

/// Opaque stream handle passed through to the device allocator
///
/// Carries no tracking semantics; the raw value is handed back unchanged
/// to whichever device allocator performs the real work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stream(pub usize);

impl Stream {
    /// The framework's default (null) stream
    pub const DEFAULT: Stream = Stream(0);

    pub fn from_raw(raw: *mut std::ffi::c_void) -> Self {
        Self(raw as usize)
    }

    pub fn as_raw(self) -> *mut std::ffi::c_void {
        self.0 as *mut std::ffi::c_void
    }
}

/// Interned handle for a location label
///
/// Handles are issued in first-seen order starting at 0 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationHandle(usize);

impl LocationHandle {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the label in first-seen order
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for LocationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "loc#{}", self.0)
    }
}

/// Common result type for tracer operations
pub type TracerResult<T> = Result<T, super::errors::TracerError>;
