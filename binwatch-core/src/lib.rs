//! Ingestion and alerting core for Binwatch
//!
//! Takes raw sensor events from a fleet of waste bins (fire, gas,
//! fill-level, and weight sensors), validates and normalizes them into
//! exact-decimal canonical records, persists them through an injected
//! key-value store, and evaluates each reading against per-sensor
//! threshold rules.
//!
//! The transport that delivers events and the storage engine behind the
//! [`store::SensorStore`] trait are external collaborators; this crate is
//! the decision logic between them.
//!
//! ```no_run
//! use binwatch_core::{handle_event, time::SystemClock};
//! # use binwatch_core::store::{SensorStore, StoreError};
//! # use binwatch_core::readings::CanonicalReading;
//! # struct MyStore;
//! # impl SensorStore for MyStore {
//! #     fn put(&mut self, _: &str, _: &str, _: &CanonicalReading) -> Result<(), StoreError> { Ok(()) }
//! # }
//!
//! let event = serde_json::json!({
//!     "deviceId": "bin-01",
//!     "sensorType": "fill",
//!     "value": 95,
//! });
//!
//! let mut store = MyStore;
//! let response = handle_event(&event, &mut store, &SystemClock);
//! assert_eq!(response.status_code, 200);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alerts;
pub mod errors;
pub mod handler;
pub mod readings;
pub mod store;
pub mod time;

// Public API
pub use alerts::{evaluate, AlertKind, AlertRecord, SensorKind, Severity};
pub use errors::{IngestError, ValidationError, ValidationResult};
pub use handler::{handle_event, Response, ResponseBody};
pub use readings::{validate_and_normalize, CanonicalReading, RawReading, SensorValue};
pub use store::{SensorStore, StoreError};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
