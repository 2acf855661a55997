/*!
 * Tracer Constants
 *
 * Centralized location for sentinels, unit tables and environment variable names.
 */

// =============================================================================
// LOCATIONS
// =============================================================================

/// Label attributed to allocations made before any location was pushed
pub const UNTRACED_LOCATION: &str = "untraced";

/// Default location filter: accept every label
pub const DEFAULT_LOCATION_PATTERN: &str = ".*";

// =============================================================================
// REPORT FORMATTING
// =============================================================================

/// Unit suffixes stepped through by the byte formatter (no unit beyond GB)
pub const BYTE_UNITS: [&str; 4] = ["", "KB", "MB", "GB"];

/// Scale factor between adjacent byte units
pub const BYTE_UNIT_STEP: f64 = 1024.0;

/// Significant-digit budget for formatted byte values
pub const FORMAT_SIGNIFICANT_DIGITS: i32 = 4;

/// Column header of the report table
pub const REPORT_HEADER: &str = "Mem, Cumulative Mem, Median, Count, Location";

/// Separator between report table columns
pub const REPORT_COLUMN_SEPARATOR: &str = "  ";

// =============================================================================
// DEVICE ALLOCATION
// =============================================================================

/// Alignment of host-backed allocations (256B, what cudaMalloc guarantees)
pub const HOST_ALLOCATION_ALIGNMENT: usize = 256;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Peak-check policy: `alloc_and_free` | `free_only`
pub const ENV_PEAK_CHECK: &str = "GPU_MEM_TRACER_PEAK_CHECK";

/// Report format used by `report_stats`: `text` | `json`
pub const ENV_REPORT_FORMAT: &str = "GPU_MEM_TRACER_REPORT";

/// Comma-separated regular expressions for the location filter
pub const ENV_LOCATION_PATTERNS: &str = "GPU_MEM_TRACER_PATTERNS";

/// Emit JSON log lines instead of the compact format
pub const ENV_TRACE_JSON: &str = "GPU_MEM_TRACER_TRACE_JSON";

/// Default log filter when RUST_LOG is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";
