//! Ingestion entry point
//!
//! One invocation per inbound reading: parse, validate, persist, evaluate
//! alerts, and map every outcome to a structured [`Response`]. Nothing
//! propagates past this boundary and no outcome is silently dropped.
//!
//! The store and clock are injected, so the handler holds no state of its
//! own; concurrent invocations over independent readings need no locking
//! here.

use serde::Serialize;
use serde_json::Value;

use crate::alerts::{self, AlertRecord};
use crate::errors::{IngestError, ValidationError};
use crate::readings::{validate_and_normalize, RawReading};
use crate::store::SensorStore;
use crate::time::Clock;

/// Structured outcome of one ingestion invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: ResponseBody,
}

/// Response body: an object on success, a bare message on failure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Stored {
        message: String,
        alerts: Vec<AlertRecord>,
    },
    Message(String),
}

impl Response {
    fn stored(alerts: Vec<AlertRecord>) -> Self {
        Self {
            status_code: 200,
            body: ResponseBody::Stored {
                message: "Data stored successfully".to_owned(),
                alerts,
            },
        }
    }

    fn missing_fields() -> Self {
        Self {
            status_code: 400,
            body: ResponseBody::Message("Missing required fields".to_owned()),
        }
    }

    fn failure(err: &IngestError) -> Self {
        Self {
            status_code: 500,
            body: ResponseBody::Message(format!("Error: {err}")),
        }
    }
}

/// Process one inbound sensor event.
///
/// Validation failures come back as a 400-equivalent response; storage and
/// shape failures as a 500-equivalent. The successful response carries the
/// alerts produced by the reading.
pub fn handle_event<S, C>(event: &Value, store: &mut S, clock: &C) -> Response
where
    S: SensorStore,
    C: Clock,
{
    log::info!("received event: {event}");

    match process(event, store, clock) {
        Ok(alerts) => Response::stored(alerts),
        Err(IngestError::Validation(ValidationError::MissingFields { payload })) => {
            log::error!("missing required fields: {payload:?}");
            Response::missing_fields()
        }
        Err(err @ IngestError::Storage(_)) => {
            log::error!("store write failed: {err}");
            Response::failure(&err)
        }
        Err(err) => {
            log::error!("error processing sensor event: {err}");
            Response::failure(&err)
        }
    }
}

fn process<S, C>(event: &Value, store: &mut S, clock: &C) -> Result<Vec<AlertRecord>, IngestError>
where
    S: SensorStore,
    C: Clock,
{
    let raw: RawReading = serde_json::from_value(event.clone())
        .map_err(|e| IngestError::Malformed(e.to_string()))?;

    let reading = validate_and_normalize(&raw, clock)?;
    store.put(&reading.device_id, &reading.timestamp, &reading)?;
    log::info!(
        "stored {} reading from {} at {}",
        reading.sensor_type,
        reading.device_id,
        reading.timestamp
    );

    // A text-fallback value has no numeric reading, so no rules apply
    let alerts = match reading.value.as_f64() {
        Some(value) => alerts::evaluate(&reading.sensor_type, value, &reading.device_id),
        None => Vec::new(),
    };

    Ok(alerts)
}
