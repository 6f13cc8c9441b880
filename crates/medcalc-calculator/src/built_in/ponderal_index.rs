//! Ponderal index (Rohrer's index): `weight_kg / height_m^3`, in kg/m³.

use super::{BODY_PARAMETERS, body_measurements};
use medcalc_core::{Formula, FormulaParams, MedCalcResult, Named};

#[derive(Debug, Clone)]
pub struct PonderalIndexFormula {
    name: String,
}

impl PonderalIndexFormula {
    pub const NAME: &'static str = "ponderal";

    pub fn new() -> Self {
        Self { name: Self::NAME.to_string() }
    }
}

impl Default for PonderalIndexFormula {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for PonderalIndexFormula {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Formula for PonderalIndexFormula {
    fn required_parameters(&self) -> &[&'static str] {
        &BODY_PARAMETERS
    }

    fn output_unit(&self) -> Option<&str> {
        Some("kg/m^3")
    }

    fn calculate(&self, params: &FormulaParams) -> MedCalcResult<f64> {
        let (weight_kg, height_m) = body_measurements(&self.name, params)?;
        Ok(weight_kg / height_m.powi(3))
    }
}
