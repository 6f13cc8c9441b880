//! Human-facing description of a calculator, shown before collecting input.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalculatorPrompt {
    pub title: &'static str,
    pub description: &'static str,
    pub ideal_for: &'static str,
    pub not_ideal_for: &'static str,
    pub usage_instructions: &'static str,
}

pub const BMI_PROMPT: CalculatorPrompt = CalculatorPrompt {
    title: "BMI Calculator",
    description: "Calculates Body Mass Index (BMI) using weight and height measurements.",
    ideal_for: "General population screening for weight status in adults.",
    not_ideal_for: "Athletes with high muscle mass, pregnant individuals, or those with atypical body composition.",
    usage_instructions: "Enter weight and height in any acceptable units (e.g., kg, lbs, m, ft). \
        Defaults from global configuration will be used if no unit is provided. \
        You may also specify the desired output unit for BMI (default is 'kg/m^2').",
};

/// The header block printed by interactive front ends.
impl fmt::Display for CalculatorPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} ===", self.title)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f, "Ideal for: {}", self.ideal_for)?;
        writeln!(f, "Not ideal for: {}", self.not_ideal_for)?;
        write!(f, "{}", self.usage_instructions)
    }
}
