/*!
 * Peak Report
 * Aggregates the peak snapshot by location and renders the table
 */

use super::format::format_bytes;
use crate::core::errors::TracerError;
use crate::core::limits::{REPORT_COLUMN_SEPARATOR, REPORT_HEADER, UNTRACED_LOCATION};
use crate::core::types::{LocationHandle, Size, TracerResult};
use crate::memory::{AllocationStats, LocationInterner};
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;

/// One table row: everything live at one location at peak
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRow {
    pub bytes: Size,
    pub cumulative_bytes: Size,
    /// Upper median: element `count / 2` of the ascending sizes
    pub median_bytes: Size,
    pub count: usize,
    pub location: String,
}

/// Peak memory report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub peak_bytes: Size,
    pub total_bytes: Size,
    pub peak_allocs: usize,
    pub total_allocs: usize,
    /// Sorted by `bytes`, largest first
    pub rows: Vec<LocationRow>,
}

#[derive(Default)]
struct LocationTotals {
    bytes: Size,
    sizes: Vec<Size>,
}

impl Report {
    /// Build a report from a stats snapshot
    pub fn from_stats(stats: &AllocationStats, interner: &LocationInterner) -> Self {
        let mut by_location: HashMap<LocationHandle, LocationTotals, RandomState> =
            HashMap::default();
        for allocation in stats.live_allocations.values() {
            let totals = by_location.entry(allocation.location).or_default();
            totals.bytes += allocation.size;
            totals.sizes.push(allocation.size);
        }

        // Map iteration order is arbitrary; ties fall back to first-seen order
        let mut locations: Vec<_> = by_location.into_iter().collect();
        locations.sort_by(|(ha, a), (hb, b)| b.bytes.cmp(&a.bytes).then(ha.cmp(hb)));

        let mut cumulative_bytes = 0;
        let rows = locations
            .into_iter()
            .map(|(handle, mut totals)| {
                cumulative_bytes += totals.bytes;
                totals.sizes.sort_unstable();
                LocationRow {
                    bytes: totals.bytes,
                    cumulative_bytes,
                    median_bytes: totals.sizes[totals.sizes.len() / 2],
                    count: totals.sizes.len(),
                    location: interner
                        .resolve(handle)
                        .unwrap_or(UNTRACED_LOCATION)
                        .to_string(),
                }
            })
            .collect();

        Self {
            peak_bytes: stats.current_bytes,
            total_bytes: stats.total_bytes,
            peak_allocs: stats.current_allocs,
            total_allocs: stats.total_allocs,
            rows,
        }
    }

    /// Row for a location label, if anything was live there at peak
    pub fn row(&self, location: &str) -> Option<&LocationRow> {
        self.rows.iter().find(|row| row.location == location)
    }

    pub fn to_json(&self) -> TracerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the report in the requested format
    pub fn write_to<W: Write>(&self, writer: &mut W, format: ReportFormat) -> TracerResult<()> {
        match format {
            ReportFormat::Text => write!(writer, "{}", self)?,
            ReportFormat::Json => writeln!(writer, "{}", self.to_json()?)?,
        }
        writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Display for LocationRow {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let sep = REPORT_COLUMN_SEPARATOR;
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            format_bytes(self.bytes),
            format_bytes(self.cumulative_bytes),
            format_bytes(self.median_bytes),
            self.count,
            self.location,
        )
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Max mem: {}", format_bytes(self.peak_bytes))?;
        writeln!(f, "Total mem allocated: {}", format_bytes(self.total_bytes))?;
        writeln!(f, "{}", REPORT_HEADER)?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// The `Mem, Cumulative Mem, Median, Count, Location` table
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = TracerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "table" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(TracerError::InvalidConfig {
                key: "report_format".to_string(),
                value: other.to_string(),
            }),
        }
    }
}
