//! Time sources for ingestion timestamping
//!
//! The canonical timestamp on every stored reading is server-generated,
//! never trusted from the caller. The clock is injected so the handler
//! stays deterministic under test:
//! - System clock for production
//! - Fixed clock for tests

use chrono::{DateTime, TimeZone, Utc};

/// Source of the ingestion instant
pub trait Clock {
    /// Get the current UTC instant
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall clock backed by the operating system
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock for testing
#[derive(Debug, Clone)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Build from unix milliseconds, saturating on out-of-range input
    pub fn from_millis(millis: i64) -> Self {
        let instant = Utc
            .timestamp_millis_opt(millis)
            .single()
            .unwrap_or_default();
        Self { instant }
    }

    pub fn set(&mut self, instant: DateTime<Utc>) {
        self.instant = instant;
    }

    pub fn advance_ms(&mut self, ms: i64) {
        self.instant += chrono::Duration::milliseconds(ms);
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Format an instant as the canonical storage timestamp.
///
/// The format is ISO-8601 UTC with microsecond precision and a literal
/// `Z` suffix (`YYYY-MM-DDTHH:MM:SS.ffffffZ`). Downstream readers key on
/// this exact shape, so no offset digits and no truncated fraction.
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}
