//! Sensor Reading Types and Normalization
//!
//! ## Overview
//!
//! This module defines the two shapes a reading takes on its way through
//! the ingestion pipeline:
//!
//! 1. [`RawReading`] — the untrusted inbound payload. Devices in the field
//!    disagree about types: `value` may arrive as an integer, a float, or a
//!    numeric string, and every field may simply be absent. All fields are
//!    optional at this stage; presence is checked explicitly, never assumed.
//! 2. [`CanonicalReading`] — the validated, storage-ready record. Keyed by
//!    `(deviceId, timestamp)` in the durable store, so the timestamp is
//!    always server-generated and uniquely identifies a reading within a
//!    device's history.
//!
//! ## Exact Decimal Values
//!
//! Stored values must be exact: a reading of `2.1` has to persist as `2.1`,
//! not `2.0999999...`. Binary floats cannot represent most decimal fractions,
//! so normalization goes through the value's *textual* form into an
//! arbitrary-precision [`Decimal`]. Threshold comparison later converts back
//! to `f64` — the rule thresholds are round numbers, so that boundary is a
//! documented precision trade-off, not a storage one.
//!
//! ## Degradation Policy
//!
//! A value that cannot be parsed as a decimal is stored as its literal
//! string form ([`SensorValue::Text`]). Losing numeric fidelity on one odd
//! reading is preferable to dropping the record entirely.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::errors::ValidationError;
use crate::time::{format_timestamp, Clock};

/// Untrusted inbound reading as delivered by the event trigger
///
/// Wire names are camelCase (`deviceId`, `sensorType`, ...). Unknown extra
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub sensor_type: Option<String>,
    /// Integer, float, or numeric string; `null` counts as absent
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Passthrough, used by weight sensors
    #[serde(default)]
    pub waste_type: Option<Value>,
    #[serde(default)]
    pub measurement_sequence: Option<Value>,
}

/// Normalized sensor value
///
/// `Decimal` is the common case; `Text` is the fallback when the raw value
/// has no decimal reading (see module docs).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    /// Exact decimal, serialized as its textual form
    Decimal(Decimal),
    /// Literal string fallback for non-numeric values
    Text(String),
}

impl SensorValue {
    /// Normalize a raw JSON value into an exact decimal, or its string form.
    ///
    /// Numbers go through their textual representation so binary-float
    /// artifacts never reach storage. Strings are parsed the same way,
    /// accepting plain and scientific notation. Anything else (and any
    /// parse failure) degrades to `Text` — never an error.
    pub fn normalize(value: &Value) -> Self {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        match parse_decimal(&text) {
            Some(decimal) => SensorValue::Decimal(decimal),
            None => SensorValue::Text(text),
        }
    }

    /// Floating-point view for threshold comparison
    ///
    /// `None` for `Text` values and for decimals outside f64 range.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SensorValue::Decimal(d) => d.to_f64(),
            SensorValue::Text(_) => None,
        }
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

/// Validated, storage-ready sensor reading
///
/// Invariant: only constructed through [`validate_and_normalize`], so
/// `device_id` and `sensor_type` are non-empty and `value` came from a
/// present, non-null raw value. `timestamp` is always server-generated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalReading {
    /// Source device; partition key in the durable store
    pub device_id: String,
    /// ISO-8601 UTC with literal `Z`; sort key in the durable store
    pub timestamp: String,
    pub sensor_type: String,
    pub value: SensorValue,
    pub unit: String,
    pub location: String,
    /// Present iff the raw payload carried it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waste_type: Option<Value>,
    /// Present iff the raw payload carried it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_sequence: Option<Value>,
}

/// Validate a raw reading and assemble the canonical record.
///
/// Fails only on missing required fields; the error carries the raw payload
/// so the caller can log what the device actually sent. Normalization
/// failures are not errors (see [`SensorValue::normalize`]).
pub fn validate_and_normalize<C: Clock>(
    raw: &RawReading,
    clock: &C,
) -> Result<CanonicalReading, ValidationError> {
    let device_id = raw.device_id.as_deref().filter(|s| !s.is_empty());
    let sensor_type = raw.sensor_type.as_deref().filter(|s| !s.is_empty());
    let value = raw.value.as_ref().filter(|v| !v.is_null());

    let (Some(device_id), Some(sensor_type), Some(value)) = (device_id, sensor_type, value)
    else {
        return Err(ValidationError::MissingFields {
            payload: raw.clone(),
        });
    };

    Ok(CanonicalReading {
        device_id: device_id.to_owned(),
        timestamp: format_timestamp(clock.now_utc()),
        sensor_type: sensor_type.to_owned(),
        value: SensorValue::normalize(value),
        unit: raw.unit.clone().unwrap_or_default(),
        location: raw.location.clone().unwrap_or_default(),
        waste_type: raw.waste_type.clone(),
        measurement_sequence: raw.measurement_sequence.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw(device_id: &str, sensor_type: &str, value: Value) -> RawReading {
        RawReading {
            device_id: Some(device_id.to_owned()),
            sensor_type: Some(sensor_type.to_owned()),
            value: Some(value),
            ..RawReading::default()
        }
    }

    #[test]
    fn float_value_stored_exactly() {
        let clock = FixedClock::from_millis(0);
        let reading = validate_and_normalize(&raw("bin-01", "weight", json!(2.1)), &clock)
            .unwrap();

        // Exact 2.1, not the nearest binary float
        assert_eq!(
            reading.value,
            SensorValue::Decimal(Decimal::from_str("2.1").unwrap())
        );
        assert_eq!(serde_json::to_value(&reading.value).unwrap(), json!("2.1"));
    }

    #[test]
    fn integer_and_string_values_normalize() {
        assert_eq!(
            SensorValue::normalize(&json!(95)),
            SensorValue::Decimal(Decimal::from(95))
        );
        assert_eq!(
            SensorValue::normalize(&json!("1000.5")),
            SensorValue::Decimal(Decimal::from_str("1000.5").unwrap())
        );
        assert_eq!(
            SensorValue::normalize(&json!("1.2e3")),
            SensorValue::Decimal(Decimal::from(1200))
        );
    }

    #[test]
    fn non_numeric_value_degrades_to_text() {
        let clock = FixedClock::from_millis(0);
        let reading = validate_and_normalize(&raw("bin-01", "fill", json!("abc")), &clock)
            .unwrap();

        assert_eq!(reading.value, SensorValue::Text("abc".to_owned()));
        assert_eq!(reading.value.as_f64(), None);
    }

    #[test]
    fn missing_fields_rejected() {
        let clock = FixedClock::from_millis(0);

        let mut missing_device = raw("", "fill", json!(10));
        missing_device.device_id = None;
        assert!(matches!(
            validate_and_normalize(&missing_device, &clock),
            Err(ValidationError::MissingFields { .. })
        ));

        // Empty strings count as missing
        assert!(validate_and_normalize(&raw("", "fill", json!(10)), &clock).is_err());
        assert!(validate_and_normalize(&raw("bin-01", "", json!(10)), &clock).is_err());

        // Null value counts as missing
        let mut null_value = raw("bin-01", "fill", json!(10));
        null_value.value = Some(Value::Null);
        assert!(validate_and_normalize(&null_value, &clock).is_err());
    }

    #[test]
    fn missing_fields_error_carries_payload() {
        let clock = FixedClock::from_millis(0);
        let payload = raw("", "fill", json!(10));

        let Err(ValidationError::MissingFields { payload: carried }) =
            validate_and_normalize(&payload, &clock)
        else {
            panic!("expected MissingFields");
        };
        assert_eq!(carried, payload);
    }

    #[test]
    fn zero_value_is_valid() {
        // 0 is a legitimate reading, not a missing value
        let clock = FixedClock::from_millis(0);
        let reading = validate_and_normalize(&raw("bin-01", "fire", json!(0)), &clock).unwrap();
        assert_eq!(reading.value, SensorValue::Decimal(Decimal::ZERO));
    }

    #[test]
    fn caller_cannot_supply_timestamp() {
        let clock = FixedClock::from_millis(1_700_000_000_123);
        let event = json!({
            "deviceId": "bin-01",
            "sensorType": "fill",
            "value": 50,
            "timestamp": "1999-01-01T00:00:00.000000Z"
        });
        let raw: RawReading = serde_json::from_value(event).unwrap();
        let reading = validate_and_normalize(&raw, &clock).unwrap();

        assert_eq!(reading.timestamp, "2023-11-14T22:13:20.123000Z");
    }

    #[test]
    fn passthrough_fields_sparse() {
        let clock = FixedClock::from_millis(0);

        let mut with_waste = raw("bin-01", "weight", json!(1.5));
        with_waste.waste_type = Some(json!("organic"));
        with_waste.measurement_sequence = Some(json!(3));
        let reading = validate_and_normalize(&with_waste, &clock).unwrap();
        let encoded = serde_json::to_value(&reading).unwrap();
        assert_eq!(encoded["wasteType"], json!("organic"));
        assert_eq!(encoded["measurementSequence"], json!(3));

        let without = validate_and_normalize(&raw("bin-01", "weight", json!(1.5)), &clock)
            .unwrap();
        let encoded = serde_json::to_value(&without).unwrap();
        assert!(!encoded.as_object().unwrap().contains_key("wasteType"));
        assert!(!encoded.as_object().unwrap().contains_key("measurementSequence"));
    }

    #[test]
    fn defaults_for_unit_and_location() {
        let clock = FixedClock::from_millis(0);
        let reading = validate_and_normalize(&raw("bin-01", "gas", json!(5)), &clock).unwrap();
        assert_eq!(reading.unit, "");
        assert_eq!(reading.location, "");
    }

    proptest! {
        #[test]
        fn integers_normalize_exactly(n in any::<i64>()) {
            prop_assert_eq!(
                SensorValue::normalize(&json!(n)),
                SensorValue::Decimal(Decimal::from(n))
            );
        }

        #[test]
        fn decimal_strings_keep_their_digits(s in "-?[1-9][0-9]{0,14}\\.[0-9]{1,6}") {
            // The stored decimal reads back as the exact input text
            let SensorValue::Decimal(d) = SensorValue::normalize(&json!(s)) else {
                return Err(TestCaseError::fail("expected decimal"));
            };
            prop_assert_eq!(d.to_string(), s);
        }

        #[test]
        fn floats_round_trip_through_decimal(
            n in -1_000_000_000_000i64..1_000_000_000_000,
            scale in 0u32..7,
        ) {
            // No information is lost between the inbound float and storage
            let f = n as f64 / 10f64.powi(scale as i32);
            let SensorValue::Decimal(d) = SensorValue::normalize(&json!(f)) else {
                return Err(TestCaseError::fail("expected decimal"));
            };
            prop_assert_eq!(d.to_string().parse::<f64>().unwrap(), f);
        }

        #[test]
        fn normalize_never_panics(s in "\\PC*") {
            let _ = SensorValue::normalize(&json!(s));
        }
    }
}
