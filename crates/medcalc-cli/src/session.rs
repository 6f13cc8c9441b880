//! The interactive BMI session: collect measurements, calculate, print.

use crate::cli::{Cli, Settings};
use crate::config::CliConfig;
use medcalc_calculator::{BMI_PROMPT, BmiCalculator, BmiInput, GuidelineKind};
use medcalc_core::units;
use medcalc_core::{Formula, MedCalcError, Observation, OutputModel};
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::{debug, info};

/// Problems with what the user typed.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("could not read {field} as a number: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("input ended before {field} was given")]
    UnexpectedEof { field: &'static str },

    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Error in input: {0}")]
    Input(#[from] InputError),

    #[error(transparent)]
    Calculation(#[from] MedCalcError),

    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl CliError {
    /// True when the user can fix the failure by answering differently,
    /// whether the answer was unreadable or the calculation rejected it.
    pub fn is_input_error(&self) -> bool {
        match self {
            Self::Input(_) => true,
            Self::Calculation(err) => err.is_input_error(),
            Self::Output(_) => false,
        }
    }
}

/// A fully collected request.
#[derive(Debug, Clone, PartialEq)]
pub struct BmiRequest {
    pub weight: Observation,
    pub height: Observation,
    pub output_unit: String,
}

/// Reads answers from `reader`, writing each question to `writer` first.
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    fn ask(&mut self, question: &str, field: &'static str) -> Result<String, InputError> {
        write!(self.writer, "{question}")?;
        self.writer.flush()?;
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(InputError::UnexpectedEof { field });
        }
        Ok(line.trim().to_string())
    }

    pub fn number(&mut self, question: &str, field: &'static str) -> Result<f64, InputError> {
        let answer = self.ask(question, field)?;
        answer.parse().map_err(|_| InputError::InvalidNumber { field, value: answer })
    }

    /// An empty answer takes `default`.
    pub fn unit(
        &mut self,
        question: &str,
        field: &'static str,
        default: &str,
    ) -> Result<String, InputError> {
        let answer = self.ask(question, field)?;
        Ok(if answer.is_empty() { default.to_string() } else { answer })
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }
}

/// The unit a result is reported in unless the user picks one.
///
/// The configured BMI unit is used when it measures the same quantity as
/// the formula's own unit, e.g. not for the ponderal index.
pub fn default_output_unit(configured: &str, formula_unit: &str) -> String {
    match (units::dimensionality(configured), units::dimensionality(formula_unit)) {
        (Ok(a), Ok(b)) if a == b => configured.to_string(),
        _ => formula_unit.to_string(),
    }
}

/// Flags that were given are used as-is; everything else is asked for.
/// A unit is only asked for alongside its value.
pub fn collect_request<R: BufRead, W: Write>(
    cli: &Cli,
    settings: &Settings,
    output_default: &str,
    prompter: &mut Prompter<R, W>,
) -> Result<BmiRequest, InputError> {
    let units = &settings.units;
    let interactive = cli.weight.is_none() || cli.height.is_none();
    if interactive {
        writeln!(prompter.writer(), "{BMI_PROMPT}")?;
    }

    let (weight, weight_unit) = match cli.weight {
        Some(value) => (value, cli.weight_unit.clone().unwrap_or_else(|| units.weight.clone())),
        None => {
            let value = prompter.number("Enter weight value: ", "weight")?;
            let unit = match &cli.weight_unit {
                Some(unit) => unit.clone(),
                None => prompter.unit(
                    &format!("Enter weight unit (default {}): ", units.weight),
                    "weight unit",
                    &units.weight,
                )?,
            };
            (value, unit)
        }
    };

    let (height, height_unit) = match cli.height {
        Some(value) => (value, cli.height_unit.clone().unwrap_or_else(|| units.height.clone())),
        None => {
            let value = prompter.number("Enter height value: ", "height")?;
            let unit = match &cli.height_unit {
                Some(unit) => unit.clone(),
                None => prompter.unit(
                    &format!("Enter height unit (default {}): ", units.height),
                    "height unit",
                    &units.height,
                )?,
            };
            (value, unit)
        }
    };

    let output_unit = match &cli.output_unit {
        Some(unit) => unit.clone(),
        None if interactive => prompter.unit(
            &format!("Enter desired output unit for BMI (default {output_default}): "),
            "output unit",
            output_default,
        )?,
        None => output_default.to_string(),
    };

    Ok(BmiRequest {
        weight: Observation::new(weight, weight_unit),
        height: Observation::new(height, height_unit),
        output_unit,
    })
}

/// Runs one calculation, printing the result to the prompter's writer.
pub fn run<R: BufRead, W: Write>(
    cli: &Cli,
    config: &CliConfig,
    reader: R,
    writer: W,
) -> Result<(), CliError> {
    let settings = Settings::resolve(cli, config);
    let kind: GuidelineKind = settings.guideline.parse()?;
    let calculator = BmiCalculator::new(kind.guideline()?).with_formula(settings.formula.as_str());

    let formula = calculator.guideline().get_formula(calculator.formula_name())?;
    let formula_unit = formula.output_unit().unwrap_or(settings.units.bmi.as_str());
    let output_default = default_output_unit(&settings.units.bmi, formula_unit);

    let mut prompter = Prompter::new(reader, writer);
    let request = collect_request(cli, &settings, &output_default, &mut prompter)?;
    debug!(?request, "Collected BMI request");

    let input = BmiInput::new(request.weight, request.height);
    let output = calculator.calculate(&input)?.into_unit(&request.output_unit)?;
    info!(guideline = %kind, formula = %settings.formula, category = %output.category, "BMI calculated");

    let writer = prompter.writer();
    let printed = if settings.json {
        writeln!(writer, "{:#}", output.to_json())
    } else {
        writeln!(writer, "\nYour BMI is: {:.2} ({})", output.bmi, output.category)
    };
    printed.map_err(CliError::Output)
}
