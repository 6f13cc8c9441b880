//! Input and output schemas for calculators.

use crate::error::MedCalcResult;
use crate::formula::FormulaParams;
use serde::Serialize;

/// Describes one field of a calculator's input or output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// A measurement with a unit of the given kind (`"mass"`, `"length"`)
    Observation(&'static str),
    Float,
    String,
}

/// The input side of a calculator.
pub trait InputModel {
    /// Field descriptions for this input.
    fn schema() -> &'static [FieldSpec];

    /// Checks every observation is usable, e.g. carries a compatible unit.
    fn validate_observations(&self) -> MedCalcResult<()>;

    /// Converts the observations into the canonical units the formulas
    /// expect and returns them as a parameter bag.
    fn to_parameters(&self) -> MedCalcResult<FormulaParams>;
}

/// The output side of a calculator.
pub trait OutputModel: Serialize + Sized {
    /// Field descriptions for this output.
    fn schema() -> &'static [FieldSpec];

    /// Builds the output from a formula result and its category.
    fn from_classification(value: f64, category: String, unit: Option<&str>) -> Self;

    /// One line, human readable.
    fn summary(&self) -> String;

    fn to_json(&self) -> serde_json::Value {
        // Output models are plain structs of numbers and strings
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
