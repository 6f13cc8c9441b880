//! BMI calculators built on `medcalc-core`.
//!
//! Provides the standard, ponderal index and revised BMI formulas, the BMI
//! input and output models, WHO and Asian guidelines and ready-made
//! calculators over them.

pub mod bmi;
pub mod built_in;
pub mod calculation;
pub mod guidelines;
pub mod prompt;

pub use bmi::{BMI_UNIT, BmiInput, BmiOutput, BmiPayload};
pub use calculation::{
    BmiCalculator, asian_calculator, calculate_bmi, calculator_for, who_calculator,
};
pub use guidelines::{GuidelineKind, asian_guideline, guideline_by_name, who_guideline};
pub use prompt::{BMI_PROMPT, CalculatorPrompt};
