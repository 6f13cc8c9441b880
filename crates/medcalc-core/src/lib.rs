//! Core building blocks for medical point calculators.
//!
//! A calculator takes an input model of [`Observation`]s, converts them into
//! a [`FormulaParams`] bag, evaluates a [`Formula`] looked up by name in a
//! [`Guideline`], then maps the number onto a category with a
//! [`ClassificationRule`] from the same guideline.

/// Calculator orchestration over input and output models
pub mod calculator;
/// Regional unit defaults
pub mod config;
/// Error taxonomy for every core operation
pub mod error;
/// Formulas and parameter bags
pub mod formula;
/// Guidelines bundling rules and formulas
pub mod guideline;
/// Input and output schema traits
pub mod model;
/// Measurements with optional units
pub mod observation;
/// Name-keyed collections with unique names
pub mod registry;
/// Classification rules
pub mod rule;
/// Unit expression parsing and conversion
pub mod units;

pub use calculator::Calculator;
pub use config::{Region, UnitDefaults};
pub use error::{MedCalcError, MedCalcResult, RangeError};
pub use formula::{Formula, FormulaParams};
pub use guideline::Guideline;
pub use medcalc_types::ParamValue;
pub use model::{FieldSpec, FieldType, InputModel, OutputModel};
pub use observation::{Observation, RawObservation, TimeSeriesObservation};
pub use registry::{Named, Registry};
pub use rule::{ClassificationRule, RangeRule, Threshold};

