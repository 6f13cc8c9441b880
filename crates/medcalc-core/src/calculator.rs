//! The calculator: binds input and output schemas to a guideline and runs
//! validate → convert → formula → categorize → output.

use crate::error::MedCalcResult;
use crate::guideline::Guideline;
use crate::model::{FieldSpec, InputModel, OutputModel};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const DEFAULT_FORMULA: &str = "standard";
pub const DEFAULT_RULE: &str = "bmi";

/// A calculator over input model `I` producing output model `O`.
///
/// `calculate` takes `&self` and only reads the shared guideline, so one
/// calculator can serve concurrent callers.
pub struct Calculator<I, O> {
    guideline: Arc<Guideline>,
    formula: String,
    rule: String,
    _schema: PhantomData<fn(&I) -> O>,
}

impl<I: InputModel, O: OutputModel> Calculator<I, O> {
    /// Calculator using the `standard` formula and the `bmi` rule.
    pub fn new(guideline: Arc<Guideline>) -> Self {
        Self {
            guideline,
            formula: DEFAULT_FORMULA.to_string(),
            rule: DEFAULT_RULE.to_string(),
            _schema: PhantomData,
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = formula.into();
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = rule.into();
        self
    }

    pub fn guideline(&self) -> &Arc<Guideline> {
        &self.guideline
    }

    pub fn formula_name(&self) -> &str {
        &self.formula
    }

    pub fn rule_name(&self) -> &str {
        &self.rule
    }

    pub fn input_schema(&self) -> &'static [FieldSpec] {
        I::schema()
    }

    pub fn output_schema(&self) -> &'static [FieldSpec] {
        O::schema()
    }

    /// Runs one calculation. Every failure is returned unchanged.
    #[instrument(level = "debug", skip_all, fields(formula = %self.formula, rule = %self.rule))]
    pub fn calculate(&self, input: &I) -> MedCalcResult<O> {
        input.validate_observations()?;
        let params = input.to_parameters()?;

        let formula = self.guideline.get_formula(&self.formula)?;
        let value = formula.calculate(&params)?;
        debug!(value, "Formula evaluated");

        let rule = self.guideline.get_rule(&self.rule)?;
        let category = rule.categorize(value).to_string();
        debug!(%category, "Value categorized");

        Ok(O::from_classification(value, category, formula.output_unit()))
    }
}

impl<I, O> Clone for Calculator<I, O> {
    fn clone(&self) -> Self {
        Self {
            guideline: Arc::clone(&self.guideline),
            formula: self.formula.clone(),
            rule: self.rule.clone(),
            _schema: PhantomData,
        }
    }
}

impl<I, O> fmt::Debug for Calculator<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("formula", &self.formula)
            .field("rule", &self.rule)
            .field("guideline", &self.guideline.description())
            .finish()
    }
}
