//! Built-in BMI formulas.
//!
//! Every formula reads `weight_kg` and `height_m` and rejects a
//! non-positive height or a negative weight before dividing.

use medcalc_core::{FormulaParams, MedCalcError, MedCalcResult};

pub mod ponderal_index;
pub mod revised_bmi;
pub mod standard_bmi;

pub use ponderal_index::PonderalIndexFormula;
pub use revised_bmi::RevisedBmiFormula;
pub use standard_bmi::StandardBmiFormula;

/// Parameter names shared by the body-measurement formulas.
pub const BODY_PARAMETERS: [&str; 2] = ["weight_kg", "height_m"];

/// Reads and guards `(weight_kg, height_m)` on behalf of `formula`.
fn body_measurements(formula: &str, params: &FormulaParams) -> MedCalcResult<(f64, f64)> {
    let [weight_kg, height_m] = params.numbers(formula, BODY_PARAMETERS)?;
    if !(height_m > 0.0) {
        return Err(MedCalcError::invalid_input(
            "height_m",
            format!("height must be positive, got {height_m}"),
        ));
    }
    if !(weight_kg >= 0.0) {
        return Err(MedCalcError::invalid_input(
            "weight_kg",
            format!("weight cannot be negative, got {weight_kg}"),
        ));
    }
    Ok((weight_kg, height_m))
}
