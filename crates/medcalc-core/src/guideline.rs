//! Guidelines: a described bundle of named classification rules and formulas.

use crate::error::MedCalcResult;
use crate::formula::Formula;
use crate::registry::Registry;
use crate::rule::ClassificationRule;
use std::sync::Arc;

/// A named set of rules and formulas used together by one calculator
/// variant, e.g. WHO or Asian BMI thresholds.
///
/// Build it once at startup, then share it behind an `Arc`; calculators
/// only read from it.
#[derive(Debug, Clone)]
pub struct Guideline {
    description: String,
    rules: Registry<dyn ClassificationRule>,
    formulas: Registry<dyn Formula>,
}

impl Guideline {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            rules: Registry::new("rule"),
            formulas: Registry::new("formula"),
        }
    }

    /// Adds a rule, builder style.
    pub fn with_rule(mut self, rule: impl ClassificationRule + 'static) -> MedCalcResult<Self> {
        self.add_rule(Arc::new(rule))?;
        Ok(self)
    }

    /// Adds a formula, builder style.
    pub fn with_formula(mut self, formula: impl Formula + 'static) -> MedCalcResult<Self> {
        self.add_formula(Arc::new(formula))?;
        Ok(self)
    }

    /// Adds several rules; see [`Registry::add_all`] for the failure policy.
    pub fn with_rules<I>(mut self, rules: I) -> MedCalcResult<Self>
    where
        I: IntoIterator<Item = Arc<dyn ClassificationRule>>,
    {
        self.rules.add_all(rules)?;
        Ok(self)
    }

    /// Adds several formulas; see [`Registry::add_all`] for the failure policy.
    pub fn with_formulas<I>(mut self, formulas: I) -> MedCalcResult<Self>
    where
        I: IntoIterator<Item = Arc<dyn Formula>>,
    {
        self.formulas.add_all(formulas)?;
        Ok(self)
    }

    pub fn add_rule(&mut self, rule: Arc<dyn ClassificationRule>) -> MedCalcResult<()> {
        self.rules.add(rule)
    }

    pub fn add_formula(&mut self, formula: Arc<dyn Formula>) -> MedCalcResult<()> {
        self.formulas.add(formula)
    }

    pub fn get_rule(&self, name: &str) -> MedCalcResult<Arc<dyn ClassificationRule>> {
        self.rules.get(name)
    }

    pub fn get_formula(&self, name: &str) -> MedCalcResult<Arc<dyn Formula>> {
        self.formulas.get(name)
    }

    pub fn available_rules(&self) -> Vec<String> {
        self.rules.names()
    }

    pub fn available_formulas(&self) -> Vec<String> {
        self.formulas.names()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rules(&self) -> &Registry<dyn ClassificationRule> {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut Registry<dyn ClassificationRule> {
        &mut self.rules
    }

    pub fn formulas(&self) -> &Registry<dyn Formula> {
        &self.formulas
    }

    pub fn formulas_mut(&mut self) -> &mut Registry<dyn Formula> {
        &mut self.formulas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{MedCalcError, MedCalcResult};
    use crate::formula::FormulaParams;
    use crate::registry::Named;
    use crate::rule::RangeRule;

    #[derive(Debug)]
    struct Doubling(&'static str);

    impl Named for Doubling {
        fn name(&self) -> &str {
            self.0
        }
    }

    impl Formula for Doubling {
        fn required_parameters(&self) -> &[&'static str] {
            &["value"]
        }

        fn calculate(&self, params: &FormulaParams) -> MedCalcResult<f64> {
            Ok(params.get_f64(self.name(), "value")? * 2.0)
        }
    }

    fn age_rule() -> RangeRule {
        RangeRule::new(
            "age",
            [("Child", (0.0, 18.0)), ("Adult", (18.0, 65.0)), ("Senior", (65.0, 150.0))],
        )
        .unwrap()
    }

    fn height_rule() -> RangeRule {
        RangeRule::new(
            "height",
            [("Short", (0.0, 160.0)), ("Medium", (160.0, 180.0)), ("Tall", (180.0, 250.0))],
        )
        .unwrap()
    }

    fn test_guideline() -> Guideline {
        Guideline::new("A test guideline for testing core guideline functionality")
            .with_rule(age_rule())
            .and_then(|g| g.with_rule(height_rule()))
            .and_then(|g| g.with_formula(Doubling("test")))
            .unwrap()
    }

    #[test]
    fn test_guideline_rule_management() {
        let guideline = test_guideline();
        assert_eq!(guideline.available_rules(), vec!["age", "height"]);
        assert_eq!(guideline.get_rule("age").unwrap().name(), "age");
        assert_eq!(
            guideline.get_rule("non_existent").unwrap_err(),
            MedCalcError::not_found("rule", "non_existent")
        );
    }

    #[test]
    fn test_guideline_formula_management() {
        let guideline = test_guideline();
        assert_eq!(guideline.available_formulas(), vec!["test"]);
        let formula = guideline.get_formula("test").unwrap();
        assert_eq!(formula.calculate(&FormulaParams::new().with("value", 4)).unwrap(), 8.0);
        assert!(matches!(guideline.get_formula("non_existent"), Err(MedCalcError::NotFound { .. })));
    }

    #[test]
    fn test_guideline_rule_categorization() {
        let guideline = test_guideline();
        let age = guideline.get_rule("age").unwrap();
        assert_eq!(age.categorize(10.0), "Child");
        assert_eq!(age.categorize(30.0), "Adult");
        assert_eq!(age.categorize(70.0), "Senior");
        assert_eq!(age.categorize(200.0), "Unknown");

        let height = guideline.get_rule("height").unwrap();
        assert_eq!(height.categorize(170.0), "Medium");
        assert_eq!(height.categorize(300.0), "Unknown");
    }

    #[test]
    fn test_guideline_description() {
        assert_eq!(
            test_guideline().description(),
            "A test guideline for testing core guideline functionality"
        );
    }

    #[test]
    fn test_duplicate_rule_names() {
        let first = RangeRule::new("same_name", [("A", (0.0, 1.0))]).unwrap();
        let second = RangeRule::new("same_name", [("B", (1.0, 2.0))]).unwrap();
        let result = Guideline::new("Should fail").with_rule(first).and_then(|g| g.with_rule(second));
        assert_eq!(result.unwrap_err(), MedCalcError::duplicate("rule", "same_name"));
    }

    #[test]
    fn test_duplicate_formula_names() {
        let formulas: Vec<Arc<dyn Formula>> =
            vec![Arc::new(Doubling("same_name")), Arc::new(Doubling("same_name"))];
        let result = Guideline::new("Should fail").with_formulas(formulas);
        assert!(matches!(result, Err(MedCalcError::DuplicateName { kind: "formula", .. })));
    }

    #[test]
    fn test_rule_and_formula_namespaces_are_independent() {
        let mut guideline = Guideline::new("shared names");
        guideline.add_rule(Arc::new(age_rule())).unwrap();
        guideline.add_formula(Arc::new(Doubling("age"))).unwrap();
        assert_eq!(guideline.rules().len(), 1);
        assert_eq!(guideline.formulas().len(), 1);
    }

    #[test]
    fn test_guideline_without_formula() {
        let guideline = Guideline::new("Guideline without formula").with_rule(age_rule()).unwrap();
        assert!(guideline.available_formulas().is_empty());
        assert!(guideline.get_formula("standard").is_err());
    }

    #[test]
    fn test_post_construction_mutation() {
        let mut guideline = test_guideline();
        let size = guideline.rules().len();
        assert!(guideline.add_rule(Arc::new(age_rule())).is_err());
        assert_eq!(guideline.rules().len(), size);

        guideline.rules_mut().remove(0).unwrap();
        assert_eq!(guideline.available_rules(), vec!["height"]);
        guideline.formulas_mut().replace(0, Arc::new(Doubling("renamed"))).unwrap();
        assert_eq!(guideline.available_formulas(), vec!["renamed"]);
    }
}
