//! Standard BMI: `weight_kg / height_m^2`, in kg/m².

use super::{BODY_PARAMETERS, body_measurements};
use medcalc_core::{Formula, FormulaParams, MedCalcResult, Named};

#[derive(Debug, Clone)]
pub struct StandardBmiFormula {
    name: String,
}

impl StandardBmiFormula {
    pub const NAME: &'static str = "standard";

    pub fn new() -> Self {
        Self::named(Self::NAME)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for StandardBmiFormula {
    fn default() -> Self {
        Self::new()
    }
}

impl Named for StandardBmiFormula {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Formula for StandardBmiFormula {
    fn required_parameters(&self) -> &[&'static str] {
        &BODY_PARAMETERS
    }

    fn output_unit(&self) -> Option<&str> {
        Some("kg/m^2")
    }

    fn calculate(&self, params: &FormulaParams) -> MedCalcResult<f64> {
        let (weight_kg, height_m) = body_measurements(&self.name, params)?;
        Ok(weight_kg / height_m.powi(2))
    }
}
