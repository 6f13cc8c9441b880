//! Ready-made BMI calculators.

use crate::bmi::{BmiInput, BmiOutput};
use crate::guidelines::{GuidelineKind, asian_guideline, guideline_by_name, who_guideline};
use medcalc_core::{Calculator, MedCalcResult};
use tracing::debug;

pub type BmiCalculator = Calculator<BmiInput, BmiOutput>;

/// Standard BMI classified with WHO thresholds.
pub fn who_calculator() -> MedCalcResult<BmiCalculator> {
    Ok(Calculator::new(who_guideline()?))
}

/// Standard BMI classified with Asian thresholds.
pub fn asian_calculator() -> MedCalcResult<BmiCalculator> {
    Ok(Calculator::new(asian_guideline()?))
}

/// Calculator for a built-in guideline and one of its formulas.
pub fn calculator_for(kind: GuidelineKind, formula: &str) -> MedCalcResult<BmiCalculator> {
    Ok(Calculator::new(kind.guideline()?).with_formula(formula))
}

/// One-shot BMI calculation against a guideline looked up by name.
///
/// The category is decided on the formula's own unit; `output_unit` only
/// changes how the value is reported.
pub fn calculate_bmi(
    input: &BmiInput,
    guideline: &str,
    formula: &str,
    output_unit: Option<&str>,
) -> MedCalcResult<BmiOutput> {
    let calculator = BmiCalculator::new(guideline_by_name(guideline)?).with_formula(formula);
    let output = calculator.calculate(input)?;
    match output_unit {
        Some(unit) => {
            debug!(from = %output.unit, to = unit, "Converting BMI for output");
            output.into_unit(unit)
        }
        None => Ok(output),
    }
}
