//! Built-in BMI guidelines.
//!
//! Both guidelines share the same formulas and a `bmi` range rule; only the
//! thresholds differ.

use crate::built_in::{PonderalIndexFormula, RevisedBmiFormula, StandardBmiFormula};
use medcalc_core::{Guideline, MedCalcError, MedCalcResult, RangeRule};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use tracing::debug;

pub const BMI_RULE: &str = "bmi";

pub const WHO_THRESHOLDS: [(&str, (f64, f64)); 4] = [
    ("Underweight", (0.0, 18.5)),
    ("Normal weight", (18.5, 25.0)),
    ("Overweight", (25.0, 30.0)),
    ("Obese", (30.0, f64::INFINITY)),
];

pub const ASIAN_THRESHOLDS: [(&str, (f64, f64)); 4] = [
    ("Underweight", (0.0, 18.5)),
    ("Normal weight", (18.5, 23.0)),
    ("Overweight", (23.0, 27.5)),
    ("Obese", (27.5, f64::INFINITY)),
];

const WHO_DESCRIPTION: &str = "WHO BMI Guideline:\n\
    Standard BMI classification for general population\n\
    \n\
    Note: BMI has limitations and may not be suitable for athletes, \
    pregnant individuals, or those with unusual body compositions.";

const ASIAN_DESCRIPTION: &str = "Asian BMI Guideline:\n\
    BMI classification with adjusted thresholds for Asian populations\n\
    \n\
    Note: These thresholds reflect the increased health risks \
    at lower BMI values in Asian populations.";

static WHO_GUIDELINE: LazyLock<MedCalcResult<Arc<Guideline>>> =
    LazyLock::new(|| bmi_guideline(WHO_DESCRIPTION, WHO_THRESHOLDS).map(Arc::new));

static ASIAN_GUIDELINE: LazyLock<MedCalcResult<Arc<Guideline>>> =
    LazyLock::new(|| bmi_guideline(ASIAN_DESCRIPTION, ASIAN_THRESHOLDS).map(Arc::new));

/// Builds a guideline with the `bmi` rule over `thresholds` and every
/// built-in BMI formula.
pub fn bmi_guideline<I, S>(description: &str, thresholds: I) -> MedCalcResult<Guideline>
where
    I: IntoIterator<Item = (S, (f64, f64))>,
    S: Into<String>,
{
    let guideline = Guideline::new(description)
        .with_rule(RangeRule::new(BMI_RULE, thresholds)?)?
        .with_formula(StandardBmiFormula::new())?
        .with_formula(PonderalIndexFormula::new())?
        .with_formula(RevisedBmiFormula::new())?;
    debug!(
        rules = ?guideline.available_rules(),
        formulas = ?guideline.available_formulas(),
        "Built BMI guideline"
    );
    Ok(guideline)
}

/// WHO thresholds for the general population.
pub fn who_guideline() -> MedCalcResult<Arc<Guideline>> {
    WHO_GUIDELINE.clone()
}

/// Lower cut-offs reflecting higher risk at lower BMI in Asian populations.
pub fn asian_guideline() -> MedCalcResult<Arc<Guideline>> {
    ASIAN_GUIDELINE.clone()
}

/// The built-in guidelines, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuidelineKind {
    #[default]
    Who,
    Asian,
}

impl GuidelineKind {
    pub const ALL: [GuidelineKind; 2] = [GuidelineKind::Who, GuidelineKind::Asian];

    pub fn as_str(&self) -> &'static str {
        match self {
            GuidelineKind::Who => "who",
            GuidelineKind::Asian => "asian",
        }
    }

    pub fn guideline(&self) -> MedCalcResult<Arc<Guideline>> {
        match self {
            GuidelineKind::Who => who_guideline(),
            GuidelineKind::Asian => asian_guideline(),
        }
    }
}

impl FromStr for GuidelineKind {
    type Err = MedCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "who" => Ok(GuidelineKind::Who),
            "asian" => Ok(GuidelineKind::Asian),
            _ => Err(MedCalcError::not_found("guideline", s)),
        }
    }
}

impl fmt::Display for GuidelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks a built-in guideline up by name (`who` or `asian`, any case).
pub fn guideline_by_name(name: &str) -> MedCalcResult<Arc<Guideline>> {
    name.parse::<GuidelineKind>()?.guideline()
}
