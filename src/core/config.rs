/*!
 * Tracer Configuration
 * Environment-driven settings for the tracing allocator
 */

use super::errors::TracerError;
use super::limits::{
    DEFAULT_LOCATION_PATTERN, ENV_LOCATION_PATTERNS, ENV_PEAK_CHECK, ENV_REPORT_FORMAT,
    ENV_TRACE_JSON,
};
use super::types::TracerResult;
use crate::memory::PeakCheck;
use crate::report::ReportFormat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tracer configuration
///
/// Environment variables:
/// - GPU_MEM_TRACER_PEAK_CHECK: `alloc_and_free` (default) or `free_only`
/// - GPU_MEM_TRACER_REPORT: `text` (default) or `json`
/// - GPU_MEM_TRACER_PATTERNS: comma-separated regexes for accepted location labels
/// - GPU_MEM_TRACER_TRACE_JSON: `1`/`true` for JSON log output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    pub peak_check: PeakCheck,
    pub report_format: ReportFormat,
    pub location_patterns: Vec<String>,
    pub trace_json: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            peak_check: PeakCheck::default(),
            report_format: ReportFormat::default(),
            location_patterns: vec![DEFAULT_LOCATION_PATTERN.to_string()],
            trace_json: false,
        }
    }
}

impl TracerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> TracerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> TracerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_PEAK_CHECK) {
            config.peak_check = parse_value(ENV_PEAK_CHECK, &value)?;
        }

        if let Some(value) = lookup(ENV_REPORT_FORMAT) {
            config.report_format = parse_value(ENV_REPORT_FORMAT, &value)?;
        }

        if let Some(value) = lookup(ENV_LOCATION_PATTERNS) {
            let patterns: Vec<String> = value
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect();
            if patterns.is_empty() {
                return Err(TracerError::InvalidConfig {
                    key: ENV_LOCATION_PATTERNS.to_string(),
                    value,
                });
            }
            config.location_patterns = patterns;
        }

        if let Some(value) = lookup(ENV_TRACE_JSON) {
            config.trace_json = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                _ => {
                    return Err(TracerError::InvalidConfig {
                        key: ENV_TRACE_JSON.to_string(),
                        value,
                    })
                }
            };
        }

        Ok(config)
    }

    pub fn with_peak_check(mut self, peak_check: PeakCheck) -> Self {
        self.peak_check = peak_check;
        self
    }

    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }

    pub fn with_location_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.location_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_trace_json(mut self, enabled: bool) -> Self {
        self.trace_json = enabled;
        self
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> TracerResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TracerError::InvalidConfig {
            key: key.to_string(),
            value: value.to_string(),
        })
}
