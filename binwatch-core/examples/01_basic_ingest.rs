//! Basic Ingestion Example
//!
//! This example demonstrates the simplest use case of Binwatch:
//! feeding raw sensor events through the handler with an in-memory store
//! and printing the alerts each reading produces.
//!
//! ## What You'll Learn
//!
//! - Implementing the `SensorStore` collaborator seam
//! - Handling raw events from different sensor types
//! - How invalid and non-numeric readings are treated
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_basic_ingest
//! ```

use std::collections::HashMap;

use binwatch_core::{
    handle_event,
    readings::CanonicalReading,
    store::{SensorStore, StoreError},
    time::SystemClock,
};
use serde_json::json;

/// Minimal store: a map keyed by (deviceId, timestamp)
#[derive(Default)]
struct DemoStore {
    records: HashMap<(String, String), CanonicalReading>,
}

impl SensorStore for DemoStore {
    fn put(
        &mut self,
        device_id: &str,
        timestamp: &str,
        record: &CanonicalReading,
    ) -> Result<(), StoreError> {
        self.records
            .insert((device_id.to_owned(), timestamp.to_owned()), record.clone());
        Ok(())
    }
}

fn main() {
    println!("Binwatch Basic Ingestion Example");
    println!("================================\n");

    let mut store = DemoStore::default();
    let clock = SystemClock;

    let events = [
        json!({"deviceId": "bin-01", "sensorType": "fill", "value": 95, "unit": "%"}),
        json!({"deviceId": "bin-01", "sensorType": "gas", "value": 420.5, "unit": "ppm"}),
        json!({"deviceId": "bin-02", "sensorType": "fire", "value": 1}),
        json!({"deviceId": "bin-02", "sensorType": "weight", "value": "3.1",
               "wasteType": "organic"}),
        // Non-numeric value: stored as text, no alerts
        json!({"deviceId": "bin-03", "sensorType": "fill", "value": "calibrating"}),
        // Missing deviceId: rejected with a 400
        json!({"sensorType": "fill", "value": 50}),
    ];

    for event in &events {
        let response = handle_event(event, &mut store, &clock);
        println!("event:    {event}");
        println!("status:   {}", response.status_code);
        println!(
            "response: {}\n",
            serde_json::to_string(&response.body).unwrap()
        );
    }

    println!("{} records persisted", store.records.len());
}
