//! BMI input and output models.

use medcalc_core::units::{self, Dimension};
use medcalc_core::{
    FieldSpec, FieldType, FormulaParams, InputModel, MedCalcError, MedCalcResult, Observation,
    OutputModel, RawObservation, UnitDefaults,
};
use serde::{Deserialize, Serialize};

/// Canonical units the BMI formulas expect.
pub const WEIGHT_UNIT: &str = "kg";
pub const HEIGHT_UNIT: &str = "m";
pub const BMI_UNIT: &str = "kg/m^2";

/// Weight and height observations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiInput {
    weight: Observation,
    height: Observation,
}

/// The wire shape of a BMI request: each measurement is a bare number or a
/// `{ "value": .., "unit": .. }` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BmiPayload {
    pub weight: RawObservation,
    pub height: RawObservation,
}

impl BmiInput {
    pub fn new(weight: Observation, height: Observation) -> Self {
        Self { weight, height }
    }

    /// Wraps raw measurements, giving bare numbers the units in `defaults`.
    pub fn from_raw(
        weight: impl Into<RawObservation>,
        height: impl Into<RawObservation>,
        defaults: &UnitDefaults,
    ) -> Self {
        Self {
            weight: Observation::wrap(weight.into(), Some(&defaults.weight)),
            height: Observation::wrap(height.into(), Some(&defaults.height)),
        }
    }

    pub fn from_payload(payload: BmiPayload, defaults: &UnitDefaults) -> Self {
        Self::from_raw(payload.weight, payload.height, defaults)
    }

    /// Parses a JSON request body.
    pub fn from_json(json: &str, defaults: &UnitDefaults) -> MedCalcResult<Self> {
        let payload: BmiPayload = serde_json::from_str(json).map_err(|e| MedCalcError::Validation {
            message: format!("malformed BMI payload: {e}"),
            field: None,
        })?;
        Ok(Self::from_payload(payload, defaults))
    }

    pub fn weight(&self) -> &Observation {
        &self.weight
    }

    pub fn height(&self) -> &Observation {
        &self.height
    }
}

fn check_dimension(
    field: &str,
    label: &str,
    obs: &Observation,
    expected: Dimension,
) -> MedCalcResult<()> {
    let unit = obs
        .unit()
        .ok_or_else(|| MedCalcError::validation(field, format!("{label} must have a unit")))?;
    let dimension = units::dimensionality(unit)?;
    if dimension != expected {
        return Err(MedCalcError::validation(
            field,
            format!("{label} must be measured in {expected} units, got '{unit}' ({dimension})"),
        ));
    }
    Ok(())
}

impl InputModel for BmiInput {
    fn schema() -> &'static [FieldSpec] {
        &[
            FieldSpec {
                name: "weight",
                description: "Weight measurement. If provided as a number, the default unit is used.",
                field_type: FieldType::Observation("mass"),
                required: true,
            },
            FieldSpec {
                name: "height",
                description: "Height measurement. If provided as a number, the default unit is used.",
                field_type: FieldType::Observation("length"),
                required: true,
            },
        ]
    }

    fn validate_observations(&self) -> MedCalcResult<()> {
        check_dimension("weight", "Weight", &self.weight, Dimension::MASS)?;
        check_dimension("height", "Height", &self.height, Dimension::LENGTH)
    }

    fn to_parameters(&self) -> MedCalcResult<FormulaParams> {
        Ok(FormulaParams::new()
            .with("weight_kg", self.weight.to(Some(WEIGHT_UNIT))?)
            .with("height_m", self.height.to(Some(HEIGHT_UNIT))?))
    }
}

/// A BMI value, its category and the unit the value is expressed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiOutput {
    pub bmi: f64,
    pub category: String,
    pub unit: String,
}

impl BmiOutput {
    /// The value in `unit`; `None` or the current unit returns it unchanged.
    pub fn value_in_unit(&self, unit: Option<&str>) -> MedCalcResult<f64> {
        match unit {
            None => Ok(self.bmi),
            Some(unit) if unit == self.unit => Ok(self.bmi),
            Some(unit) => units::convert(self.bmi, &self.unit, unit),
        }
    }

    /// Re-expresses the value in `unit`. The category is left as computed.
    pub fn into_unit(self, unit: &str) -> MedCalcResult<Self> {
        let bmi = self.value_in_unit(Some(unit))?;
        Ok(Self { bmi, unit: unit.to_string(), ..self })
    }
}

impl OutputModel for BmiOutput {
    fn schema() -> &'static [FieldSpec] {
        &[
            FieldSpec {
                name: "bmi",
                description: "Body Mass Index",
                field_type: FieldType::Float,
                required: true,
            },
            FieldSpec {
                name: "category",
                description: "BMI category",
                field_type: FieldType::String,
                required: true,
            },
            FieldSpec {
                name: "unit",
                description: "Unit the BMI value is expressed in",
                field_type: FieldType::String,
                required: false,
            },
        ]
    }

    fn from_classification(value: f64, category: String, unit: Option<&str>) -> Self {
        Self { bmi: value, category, unit: unit.unwrap_or(BMI_UNIT).to_string() }
    }

    fn summary(&self) -> String {
        format!("BMI: {:.1} {} ({})", self.bmi, self.unit, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medcalc_core::Region;

    #[test]
    fn test_bare_numbers_take_default_units() {
        let input = BmiInput::from_raw(70.0, 1.75, &UnitDefaults::default());
        assert_eq!(input.weight(), &Observation::new(70.0, "kg"));
        assert_eq!(input.height(), &Observation::new(1.75, "m"));

        let input = BmiInput::from_raw(154.0, 68.0, &UnitDefaults::for_region(Region::Us));
        assert_eq!(input.weight().unit(), Some("lb"));
        assert_eq!(input.height().unit(), Some("in"));
    }

    #[test]
    fn test_from_json_payload() {
        let json = r#"{"weight": {"value": 154, "unit": "lb"}, "height": 1.73}"#;
        let input = BmiInput::from_json(json, &UnitDefaults::default()).unwrap();
        assert_eq!(input.weight(), &Observation::new(154.0, "lb"));
        assert_eq!(input.height(), &Observation::new(1.73, "m"));

        let err = BmiInput::from_json(r#"{"weight": 70}"#, &UnitDefaults::default()).unwrap_err();
        assert!(matches!(err, MedCalcError::Validation { .. }));
    }

    #[test]
    fn test_validation_requires_units() {
        let input = BmiInput::new(Observation::unitless(70.0), Observation::new(1.75, "m"));
        assert_eq!(
            input.validate_observations().unwrap_err(),
            MedCalcError::validation("weight", "Weight must have a unit")
        );

        let input = BmiInput::new(Observation::new(70.0, "kg"), Observation::unitless(1.75));
        assert_eq!(
            input.validate_observations().unwrap_err(),
            MedCalcError::validation("height", "Height must have a unit")
        );
    }

    #[test]
    fn test_validation_checks_dimensions() {
        let swapped = BmiInput::new(Observation::new(1.75, "m"), Observation::new(70.0, "kg"));
        assert!(matches!(
            swapped.validate_observations(),
            Err(MedCalcError::Validation { field: Some(ref f), .. }) if f == "weight"
        ));

        let unknown = BmiInput::new(Observation::new(70.0, "kg"), Observation::new(1.0, "furlong"));
        assert!(matches!(unknown.validate_observations(), Err(MedCalcError::UnknownUnit { .. })));
    }

    #[test]
    fn test_parameters_in_canonical_units() {
        let input = BmiInput::new(Observation::new(70_000.0, "g"), Observation::new(175.0, "cm"));
        let params = input.to_parameters().unwrap();
        assert!((params.get_f64("t", "weight_kg").unwrap() - 70.0).abs() < 1e-9);
        assert!((params.get_f64("t", "height_m").unwrap() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_output_units_and_summary() {
        let out = BmiOutput::from_classification(22.857, "Normal weight".to_string(), None);
        assert_eq!(out.unit, "kg/m^2");
        assert_eq!(out.summary(), "BMI: 22.9 kg/m^2 (Normal weight)");
        assert_eq!(out.value_in_unit(None).unwrap(), 22.857);
        assert_eq!(out.value_in_unit(Some("kg/m^2")).unwrap(), 22.857);
        assert!((out.value_in_unit(Some("lb/ft^2")).unwrap() - 4.68).abs() < 0.01);

        let converted = out.clone().into_unit("lb/ft^2").unwrap();
        assert_eq!(converted.category, "Normal weight");
        assert_eq!(converted.unit, "lb/ft^2");

        assert_eq!(out.to_json()["category"], "Normal weight");
    }
}
