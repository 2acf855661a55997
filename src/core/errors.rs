/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Address, DeviceId, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tracer errors with serialization support
///
/// Tracking itself never fails; these cover the device allocator, configuration
/// and report output surfaces.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum TracerError {
    #[error("Device allocation of {size} bytes failed on device {device}: {reason}")]
    #[diagnostic(
        code(tracer::allocation_failed),
        help("The device allocator rejected the request. The allocation was not tracked.")
    )]
    AllocationFailed {
        size: Size,
        device: DeviceId,
        reason: String,
    },

    #[error("Device deallocation at 0x{address:x} failed on device {device}: {reason}")]
    #[diagnostic(
        code(tracer::deallocation_failed),
        help("The allocation was already removed from tracking before the device call.")
    )]
    DeallocationFailed {
        address: Address,
        device: DeviceId,
        reason: String,
    },

    #[error("Invalid value for {key}: {value}")]
    #[diagnostic(
        code(tracer::invalid_config),
        help("Check the GPU_MEM_TRACER_* environment variables.")
    )]
    InvalidConfig { key: String, value: String },

    #[error("Invalid location pattern '{pattern}': {reason}")]
    #[diagnostic(
        code(tracer::invalid_pattern),
        help("Location patterns are regular expressions matched against each pushed label.")
    )]
    InvalidPattern { pattern: String, reason: String },

    #[error("Failed to render report: {0}")]
    #[diagnostic(code(tracer::report_failed))]
    ReportFailed(String),
}

impl From<std::io::Error> for TracerError {
    fn from(err: std::io::Error) -> Self {
        TracerError::ReportFailed(err.to_string())
    }
}

impl From<serde_json::Error> for TracerError {
    fn from(err: serde_json::Error) -> Self {
        TracerError::ReportFailed(err.to_string())
    }
}
