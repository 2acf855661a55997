/*!
 * Current Location
 * Caller-driven call-site hint and label filtering
 */

use crate::core::errors::TracerError;
use crate::core::limits::{DEFAULT_LOCATION_PATTERN, UNTRACED_LOCATION};
use crate::core::types::TracerResult;
use regex::Regex;
use tracing::trace;

/// Regular expressions a pushed label must match to become current
#[derive(Debug, Clone)]
pub struct LocationFilter {
    patterns: Vec<Regex>,
}

impl LocationFilter {
    /// Compile a filter; an empty pattern list accepts everything
    pub fn new<I, S>(patterns: I) -> TracerResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                Regex::new(p).map_err(|e| TracerError::InvalidPattern {
                    pattern: p.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<TracerResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Filter that accepts every label
    pub fn accept_all() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn accepts(&self, label: &str) -> bool {
        self.patterns.is_empty() || self.patterns.iter().any(|p| p.is_match(label))
    }

    fn is_accept_all(&self) -> bool {
        self.patterns.is_empty()
            || self
                .patterns
                .iter()
                .any(|p| p.as_str() == DEFAULT_LOCATION_PATTERN)
    }
}

impl Default for LocationFilter {
    fn default() -> Self {
        Self::accept_all()
    }
}

/// The most recently pushed location label
///
/// Starts at the "untraced" sentinel. Null, empty and filtered-out labels
/// leave the previous value in place.
#[derive(Debug, Clone)]
pub struct CurrentLocation {
    label: String,
    filter: LocationFilter,
}

impl CurrentLocation {
    pub fn new() -> Self {
        Self::with_filter(LocationFilter::accept_all())
    }

    pub fn with_filter(filter: LocationFilter) -> Self {
        Self {
            label: UNTRACED_LOCATION.to_string(),
            filter,
        }
    }

    /// Replace the current label; returns whether it was accepted
    pub fn set(&mut self, label: Option<&str>) -> bool {
        let Some(label) = label.filter(|l| !l.is_empty()) else {
            return false;
        };

        if !self.filter.is_accept_all() && !self.filter.accepts(label) {
            trace!(label, "Location rejected by filter");
            return false;
        }

        if self.label != label {
            self.label.clear();
            self.label.push_str(label);
        }
        true
    }

    pub fn get(&self) -> &str {
        &self.label
    }

    pub fn is_untraced(&self) -> bool {
        self.label == UNTRACED_LOCATION
    }
}

impl Default for CurrentLocation {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a `file:line (function)` label
pub fn source_label(file: &str, line: u32, function: &str) -> String {
    format!("{}:{} ({})", file, line, function)
}

/// Label for a Rust call site: `file:line`
pub fn caller_label(location: &std::panic::Location<'_>) -> String {
    format!("{}:{}", location.file(), location.line())
}
