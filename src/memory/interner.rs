/*!
 * Location Interner
 * Deduplicates location labels into small sequential handles
 */

use crate::core::types::LocationHandle;
use ahash::RandomState;
use std::collections::HashMap;

/// Label <-> handle table
///
/// Handles are assigned in first-seen order and are never removed, so a
/// handle stored in an allocation record stays resolvable for the lifetime
/// of the interner.
#[derive(Debug, Clone, Default)]
pub struct LocationInterner {
    handles: HashMap<String, LocationHandle, RandomState>,
    labels: Vec<String>,
}

impl LocationInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `label`, issuing the next one if unseen
    pub fn intern(&mut self, label: &str) -> LocationHandle {
        if let Some(&handle) = self.handles.get(label) {
            return handle;
        }

        let handle = LocationHandle::new(self.labels.len());
        self.labels.push(label.to_string());
        self.handles.insert(label.to_string(), handle);
        handle
    }

    /// Original label of an issued handle
    pub fn resolve(&self, handle: LocationHandle) -> Option<&str> {
        self.labels.get(handle.index()).map(String::as_str)
    }

    /// Handle of a label, without interning it
    pub fn lookup(&self, label: &str) -> Option<LocationHandle> {
        self.handles.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All `(handle, label)` pairs in handle order
    pub fn iter(&self) -> impl Iterator<Item = (LocationHandle, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(index, label)| (LocationHandle::new(index), label.as_str()))
    }
}
