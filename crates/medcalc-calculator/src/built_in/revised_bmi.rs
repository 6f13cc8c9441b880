//! Revised BMI (Trefethen): `1.3 * weight_kg / height_m^2.5`.
//!
//! Scaled so that it agrees with the standard BMI for a 1.69 m adult.

use super::{BODY_PARAMETERS, body_measurements};
use medcalc_core::{Formula, FormulaParams, MedCalcResult, Named};

const SCALE: f64 = 1.3;
const HEIGHT_EXPONENT: f64 = 2.5;

#[derive(Debug, Clone)]
pub struct RevisedBmiFormula {
    name: String,
}

impl RevisedBmiFormula {
    pub const NAME: &'static str = "revised";

    pub fn new() -> Self {
        Self { name: Self::NAME.to_string() }
    }
}

impl Default for RevisedBmiFormula {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for RevisedBmiFormula {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Formula for RevisedBmiFormula {
    fn required_parameters(&self) -> &[&'static str] {
        &BODY_PARAMETERS
    }

    fn output_unit(&self) -> Option<&str> {
        Some("kg/m^2")
    }

    fn calculate(&self, params: &FormulaParams) -> MedCalcResult<f64> {
        let (weight_kg, height_m) = body_measurements(&self.name, params)?;
        Ok(SCALE * weight_kg / height_m.powf(HEIGHT_EXPONENT))
    }
}
