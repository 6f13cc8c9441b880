//! Measurements with optional physical units.

use crate::error::{MedCalcError, MedCalcResult};
use crate::units;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A numeric measurement paired with an optional unit expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
}

impl Observation {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self { value, unit: Some(unit.into()) }
    }

    pub fn unitless(value: f64) -> Self {
        Self { value, unit: None }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    /// Converts the observation into `target`.
    ///
    /// A unitless observation only "converts" to no unit, returning the raw
    /// value. An observation with a unit cannot drop it.
    pub fn to(&self, target: Option<&str>) -> MedCalcResult<f64> {
        match (self.unit.as_deref(), target) {
            (None, None) => Ok(self.value),
            (None, Some(to)) => Err(MedCalcError::conversion(
                None,
                Some(to),
                format!("cannot convert unitless observation to '{to}'"),
            )),
            (Some(from), None) => Err(MedCalcError::conversion(
                Some(from),
                None,
                format!("cannot convert observation in '{from}' to a unitless value"),
            )),
            (Some(from), Some(to)) => units::convert(self.value, from, to),
        }
    }

    /// True when both observations are unitless, or both carry units of the
    /// same dimensionality. Unparseable units are never compatible.
    pub fn is_compatible_with(&self, other: &Observation) -> bool {
        match (self.unit.as_deref(), other.unit.as_deref()) {
            (None, None) => true,
            (Some(a), Some(b)) => match (units::dimensionality(a), units::dimensionality(b)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }

    /// Builds an observation from a raw payload.
    ///
    /// Bare numbers take `default_unit`; structured payloads keep whatever
    /// unit they carry, even none.
    pub fn wrap(raw: RawObservation, default_unit: Option<&str>) -> Self {
        match raw {
            RawObservation::Number(value) => {
                Self { value, unit: default_unit.map(str::to_string) }
            }
            RawObservation::Structured { value, unit } => Self { value, unit },
        }
    }
}

/// The shapes an observation can arrive in from an input payload: a bare
/// number or a `{ "value": .., "unit": .. }` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawObservation {
    Number(f64),
    Structured {
        value: f64,
        #[serde(default)]
        unit: Option<String>,
    },
}

impl From<f64> for RawObservation {
    fn from(value: f64) -> Self {
        RawObservation::Number(value)
    }
}

impl From<Observation> for RawObservation {
    fn from(obs: Observation) -> Self {
        RawObservation::Structured { value: obs.value, unit: obs.unit }
    }
}

impl From<(f64, &str)> for RawObservation {
    fn from((value, unit): (f64, &str)) -> Self {
        RawObservation::Structured { value, unit: Some(unit.to_string()) }
    }
}

/// A sequence of observations taken together, e.g. daily weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesObservation {
    pub values: Vec<Observation>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TimeSeriesObservation {
    pub fn new(values: Vec<Observation>) -> Self {
        Self { values, timestamp: None, metadata: None }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Map<String, serde_json::Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every observation is compatible with the first one.
    pub fn is_homogeneous(&self) -> bool {
        match self.values.split_first() {
            Some((first, rest)) => rest.iter().all(|obs| first.is_compatible_with(obs)),
            None => true,
        }
    }
}
