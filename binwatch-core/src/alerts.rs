//! Alert Rule Engine
//!
//! ## Overview
//!
//! Maps a single sensor reading to zero or more alert records against a
//! fixed per-sensor-type rule table. Evaluation is pure and stateless: no
//! I/O, no history, fully deterministic given its inputs. Rules are
//! mutually exclusive by sensor type, so at most one alert is produced per
//! reading under the current table.
//!
//! ## Rule Table
//!
//! | sensor | condition    | alert          | severity |
//! |--------|--------------|----------------|----------|
//! | fire   | value > 0    | FIRE_DETECTED  | CRITICAL |
//! | gas    | value > 1000 | GAS_LEAK       | HIGH     |
//! | fill   | value > 90   | BIN_FULL       | MEDIUM   |
//! | weight | value > 2.8  | WEIGHT_LIMIT   | MEDIUM   |
//!
//! All comparisons are strictly greater-than. Unknown sensor types and
//! in-threshold values produce an empty sequence.
//!
//! Comparison happens on an `f64` derived from the exactly-stored decimal.
//! The thresholds are round numbers, so this is a precision trade-off at
//! the comparison boundary only; storage stays exact.

use serde::Serialize;

/// Sensor types with a threshold rule attached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Fire,
    Gas,
    Fill,
    Weight,
}

impl SensorKind {
    /// Parse the wire name of a sensor type
    ///
    /// Unknown names have no rule and map to `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "fire" => Some(SensorKind::Fire),
            "gas" => Some(SensorKind::Gas),
            "fill" => Some(SensorKind::Fill),
            "weight" => Some(SensorKind::Weight),
            _ => None,
        }
    }

    /// Wire name of this sensor type
    pub const fn name(&self) -> &'static str {
        match self {
            SensorKind::Fire => "fire",
            SensorKind::Gas => "gas",
            SensorKind::Fill => "fill",
            SensorKind::Weight => "weight",
        }
    }

    /// Unit of measurement used in alert messages
    pub const fn unit(&self) -> &'static str {
        match self {
            SensorKind::Fire => "",
            SensorKind::Gas => "ppm",
            SensorKind::Fill => "%",
            SensorKind::Weight => "kg",
        }
    }

    /// Alerting threshold; readings strictly above it fire
    pub const fn threshold(&self) -> f64 {
        match self {
            SensorKind::Fire => 0.0,
            SensorKind::Gas => 1000.0,
            SensorKind::Fill => 90.0,
            SensorKind::Weight => 2.8,
        }
    }
}

/// Alert classification, serialized in SCREAMING_SNAKE_CASE wire form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    FireDetected,
    GasLeak,
    BinFull,
    WeightLimit,
}

/// Alert urgency, ordered `Medium < High < Critical`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Medium,
    High,
    Critical,
}

/// A single alert produced by rule evaluation
///
/// Ephemeral: returned to the caller alongside the storage outcome, never
/// persisted by the core.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
}

/// Evaluate a reading against the rule table.
///
/// Returns at most one alert under the current table; the sequence type
/// leaves room for overlapping rules later.
pub fn evaluate(sensor_type: &str, value: f64, device_id: &str) -> Vec<AlertRecord> {
    let Some(kind) = SensorKind::parse(sensor_type) else {
        return Vec::new();
    };
    if !(value > kind.threshold()) {
        return Vec::new();
    }

    let record = match kind {
        SensorKind::Fire => AlertRecord {
            kind: AlertKind::FireDetected,
            message: format!("Fire detected by {device_id}"),
            severity: Severity::Critical,
        },
        SensorKind::Gas => AlertRecord {
            kind: AlertKind::GasLeak,
            message: format!("High gas levels detected: {value} {}", kind.unit()),
            severity: Severity::High,
        },
        SensorKind::Fill => AlertRecord {
            kind: AlertKind::BinFull,
            message: format!("Bin nearly full: {value}{}", kind.unit()),
            severity: Severity::Medium,
        },
        SensorKind::Weight => AlertRecord {
            kind: AlertKind::WeightLimit,
            message: format!("Weight limit approaching: {value} {}", kind.unit()),
            severity: Severity::Medium,
        },
    };

    vec![record]
}
