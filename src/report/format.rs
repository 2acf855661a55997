/*!
 * Byte Formatting
 * Human-readable byte counts with adaptive precision
 */

use crate::core::limits::{BYTE_UNITS, BYTE_UNIT_STEP, FORMAT_SIGNIFICANT_DIGITS};
use crate::core::types::Size;

/// Format a byte count as e.g. `"1.500 KB"`
///
/// Steps through B/KB/MB/GB (GB is the last unit) and keeps roughly four
/// significant digits. Plain bytes carry an empty suffix after the space.
pub fn format_bytes(bytes: Size) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while unit < BYTE_UNITS.len() - 1 && value >= BYTE_UNIT_STEP {
        value /= BYTE_UNIT_STEP;
        unit += 1;
    }

    format!("{:.*} {}", precision(value), value, BYTE_UNITS[unit])
}

/// Digits after the decimal point for a scaled value
fn precision(value: f64) -> usize {
    // floor(log10(v)) + 1 for v >= 1; zero counts as one leading digit
    let leading_digits = (value.trunc() as u64)
        .checked_ilog10()
        .map_or(1, |d| d as i32 + 1);
    (FORMAT_SIGNIFICANT_DIGITS - leading_digits).max(0) as usize
}
