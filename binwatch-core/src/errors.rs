//! Error types for the ingestion pipeline
//!
//! Three failure categories, mirroring the outcomes the handler reports:
//!
//! - `MissingFields` — required fields absent or empty; recovered locally
//!   and surfaced as a 400-equivalent response. The variant carries the raw
//!   payload so the caller can log what the device actually sent.
//! - `Storage` — the durable store rejected or failed the write. Kept as a
//!   distinct variant (and log line) even though the outward response is the
//!   same 500 as any other fault.
//! - `Malformed` — the payload was not a reading at all (wrong shape,
//!   non-object event). Caught at the entry point, never propagated past it.
//!
//! Normalization failure is deliberately NOT in this taxonomy: a value that
//! won't parse as a decimal degrades to string storage instead of failing
//! the reading (see [`crate::readings::SensorValue`]).

use thiserror::Error;

use crate::readings::RawReading;
use crate::store::StoreError;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Failures detected while validating a raw reading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// One or more of `deviceId`, `sensorType`, `value` absent, empty, or null
    #[error("missing required fields")]
    MissingFields {
        /// The payload as received, for diagnostic logging
        payload: RawReading,
    },
}

/// Any failure of a single ingestion invocation
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),

    /// Payload shape errors and anything else unexpected
    #[error("malformed payload: {0}")]
    Malformed(String),
}
