//! Store collaborators for Binwatch
//!
//! The core treats the durable store as an injected put-only collaborator
//! (see `binwatch_core::store`). This crate supplies concrete
//! implementations; the core never depends on any of them.
//!
//! [`MemoryStore`] is the reference implementation: a map keyed by
//! `(deviceId, timestamp)` exactly as the durable-store contract requires,
//! with an optional capacity bound. It backs tests, examples, and
//! single-process deployments where durability is handled elsewhere.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashMap;

use binwatch_core::readings::CanonicalReading;
use binwatch_core::store::{SensorStore, StoreError};

/// In-memory sensor reading store keyed by `(deviceId, timestamp)`
///
/// Unbounded by default; with a capacity set, writes beyond it fail with
/// [`StoreError::CapacityExceeded`] rather than evicting old readings —
/// the collaborator contract is commit-or-report, never silent loss.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<(String, String), CanonicalReading>,
    capacity: Option<usize>,
}

impl MemoryStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that holds at most `capacity` readings
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::new(),
            capacity: Some(capacity),
        }
    }

    /// Look up a reading by its storage key
    ///
    /// Collaborator-side accessor; the ingestion core never reads back.
    pub fn get(&self, device_id: &str, timestamp: &str) -> Option<&CanonicalReading> {
        self.records
            .get(&(device_id.to_owned(), timestamp.to_owned()))
    }

    /// Number of stored readings
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no readings
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate all stored readings
    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &CanonicalReading)> {
        self.records.iter()
    }
}

impl SensorStore for MemoryStore {
    fn put(
        &mut self,
        device_id: &str,
        timestamp: &str,
        record: &CanonicalReading,
    ) -> Result<(), StoreError> {
        let key = (device_id.to_owned(), timestamp.to_owned());

        // An overwrite of an existing key is not growth
        if let Some(capacity) = self.capacity {
            if !self.records.contains_key(&key) && self.records.len() >= capacity {
                log::warn!("memory store full at {capacity} readings");
                return Err(StoreError::CapacityExceeded);
            }
        }

        self.records.insert(key, record.clone());
        log::debug!("stored reading {device_id}/{timestamp}");
        Ok(())
    }
}
