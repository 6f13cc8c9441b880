//! Formulas and the parameter bags they are evaluated against.

use crate::error::{MedCalcError, MedCalcResult};
use crate::registry::Named;
use medcalc_types::ParamValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A pure numeric function over named parameters.
/// Formulas are stateless and thread-safe.
pub trait Formula: Named + fmt::Debug + Send + Sync {
    /// Parameter names `calculate` reads. Each must be present and numeric.
    fn required_parameters(&self) -> &[&'static str];

    /// Unit label of the result, if it has one.
    fn output_unit(&self) -> Option<&str> {
        None
    }

    /// Computes the result from `params`.
    fn calculate(&self, params: &FormulaParams) -> MedCalcResult<f64>;
}

/// Named parameter bag handed to a formula.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormulaParams {
    values: HashMap<String, ParamValue>,
}

impl FormulaParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Gets a single parameter as `f64` on behalf of `formula`.
    pub fn get_f64(&self, formula: &str, name: &str) -> MedCalcResult<f64> {
        match self.values.get(name) {
            Some(value) => value.coerce_f64().ok_or_else(|| {
                MedCalcError::invalid_parameter_type(name, format!("{} {value}", value.type_name()))
            }),
            None => Err(MedCalcError::missing_parameter(formula, name)),
        }
    }

    /// Gets several parameters as `f64` on behalf of `formula`.
    ///
    /// Presence is checked for every name before any value is coerced, so a
    /// missing parameter is always reported ahead of a badly typed one.
    pub fn numbers<const N: usize>(&self, formula: &str, names: [&str; N]) -> MedCalcResult<[f64; N]> {
        if let Some(missing) = names.iter().find(|name| !self.contains(name)) {
            return Err(MedCalcError::missing_parameter(formula, missing));
        }
        let mut out = [0.0; N];
        for (slot, name) in out.iter_mut().zip(names) {
            *slot = self.get_f64(formula, name)?;
        }
        Ok(out)
    }
}

impl<K, V> FromIterator<(K, V)> for FormulaParams
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}
