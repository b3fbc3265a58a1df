//! Durable store seam
//!
//! The store is an external collaborator: the core hands it a canonical
//! reading keyed by `(device_id, timestamp)` and never reads back. It is
//! injected into the handler rather than held as process-wide state, so the
//! core stays testable without a live store.
//!
//! Contract: `put` either commits the record durably before returning `Ok`,
//! or reports a distinguishable failure. Retries, timeouts, and backoff are
//! the implementation's concern, not the core's.

use thiserror::Error;

use crate::readings::CanonicalReading;

/// Write failures reported by a store implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store refused the record
    #[error("write rejected: {reason}")]
    Rejected { reason: String },

    /// The store cannot accept more records
    #[error("store capacity exceeded")]
    CapacityExceeded,

    /// The store could not be reached
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Put-only key-value store for canonical readings
pub trait SensorStore {
    /// Durably persist `record` under `(device_id, timestamp)`
    fn put(
        &mut self,
        device_id: &str,
        timestamp: &str,
        record: &CanonicalReading,
    ) -> Result<(), StoreError>;
}
