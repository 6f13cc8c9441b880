//! Classification rules: map a numeric value onto a category label.

use crate::error::{MedCalcResult, RangeError};
use crate::registry::Named;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// A rule that classifies values into categories.
/// Rules are immutable once built and safe to share between threads.
pub trait ClassificationRule: Named + fmt::Debug + Send + Sync {
    /// Returns the category `value` falls into.
    fn categorize(&self, value: f64) -> &str;
}

/// Half-open interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Threshold {
    pub min: f64,
    pub max: f64,
}

impl Threshold {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value < self.max
    }
}

impl From<(f64, f64)> for Threshold {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// Classifies a value by the first declared range containing it, falling
/// back to a default category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeRule {
    name: String,
    thresholds: Vec<(String, Threshold)>,
    default_category: String,
}

impl RangeRule {
    pub const DEFAULT_CATEGORY: &'static str = "Unknown";

    /// Builds a rule from `(category, (min, max))` pairs in declaration order.
    ///
    /// Fails when the set is empty, a category repeats, a range has
    /// `min >= max`, or two ranges overlap. Ranges may touch since the upper
    /// bound is exclusive.
    pub fn new<I, S>(name: impl Into<String>, thresholds: I) -> MedCalcResult<Self>
    where
        I: IntoIterator<Item = (S, (f64, f64))>,
        S: Into<String>,
    {
        let thresholds: Vec<(String, Threshold)> = thresholds
            .into_iter()
            .map(|(category, range)| (category.into(), Threshold::from(range)))
            .collect();
        validate_thresholds(&thresholds)?;

        let name = name.into();
        debug!(rule = %name, categories = thresholds.len(), "Built range rule");
        Ok(Self { name, thresholds, default_category: Self::DEFAULT_CATEGORY.to_string() })
    }

    pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
        self.default_category = category.into();
        self
    }

    pub fn default_category(&self) -> &str {
        &self.default_category
    }

    /// Thresholds in declaration order.
    pub fn thresholds(&self) -> impl Iterator<Item = (&str, Threshold)> + '_ {
        self.thresholds.iter().map(|(category, range)| (category.as_str(), *range))
    }

    pub fn categories(&self) -> Vec<&str> {
        self.thresholds.iter().map(|(category, _)| category.as_str()).collect()
    }
}

fn validate_thresholds(thresholds: &[(String, Threshold)]) -> Result<(), RangeError> {
    if thresholds.is_empty() {
        return Err(RangeError::Empty);
    }

    let mut seen = HashSet::new();
    for (category, _) in thresholds {
        if !seen.insert(category.as_str()) {
            return Err(RangeError::DuplicateCategory { category: category.clone() });
        }
    }

    // `!(min < max)` also rejects NaN bounds
    for (category, range) in thresholds {
        if !(range.min < range.max) {
            return Err(RangeError::Inverted {
                category: category.clone(),
                min: range.min,
                max: range.max,
            });
        }
    }

    let mut sorted: Vec<&(String, Threshold)> = thresholds.iter().collect();
    sorted.sort_by(|(_, a), (_, b)| a.min.total_cmp(&b.min).then(a.max.total_cmp(&b.max)));
    for pair in sorted.windows(2) {
        let (current, next) = (pair[0], pair[1]);
        if current.1.max > next.1.min {
            return Err(RangeError::Overlapping {
                first: current.0.clone(),
                second: next.0.clone(),
            });
        }
    }

    Ok(())
}

impl Named for RangeRule {
    fn name(&self) -> &str {
        &self.name
    }
}

impl ClassificationRule for RangeRule {
    fn categorize(&self, value: f64) -> &str {
        self.thresholds
            .iter()
            .find(|(_, range)| range.contains(value))
            .map(|(category, _)| category.as_str())
            .unwrap_or(self.default_category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MedCalcError;

    fn bmi_like() -> RangeRule {
        RangeRule::new(
            "test_range",
            [
                ("Underweight", (0.0, 18.5)),
                ("Normal", (18.5, 25.0)),
                ("Overweight", (25.0, 30.0)),
                ("Obese", (30.0, 100.0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_range_rule_creation() {
        let rule = bmi_like();
        assert_eq!(rule.name(), "test_range");
        assert_eq!(rule.default_category(), "Unknown");
        assert_eq!(rule.categories(), vec!["Underweight", "Normal", "Overweight", "Obese"]);

        let rule = rule.with_default_category("Out of range");
        assert_eq!(rule.default_category(), "Out of range");
    }

    #[test]
    fn test_range_rule_categorization() {
        let rule = bmi_like();
        assert_eq!(rule.categorize(17.5), "Underweight");
        assert_eq!(rule.categorize(22.0), "Normal");
        assert_eq!(rule.categorize(27.5), "Overweight");
        assert_eq!(rule.categorize(35.0), "Obese");
        assert_eq!(rule.categorize(-1.0), "Unknown");
        assert_eq!(rule.categorize(150.0), "Unknown");
        assert_eq!(rule.categorize(f64::NAN), "Unknown");
    }

    #[test]
    fn test_boundaries_are_half_open() {
        let rule = bmi_like();
        assert_eq!(rule.categorize(18.5), "Normal");
        assert_eq!(rule.categorize(25.0), "Overweight");
        assert_eq!(rule.categorize(0.0), "Underweight");
        assert_eq!(rule.categorize(100.0), "Unknown");
    }

    #[test]
    fn test_unbounded_upper_range() {
        let rule = RangeRule::new("open", [("Low", (0.0, 10.0)), ("High", (10.0, f64::INFINITY))])
            .unwrap();
        assert_eq!(rule.categorize(1e12), "High");
    }

    #[test]
    fn test_empty_thresholds() {
        let empty: [(&str, (f64, f64)); 0] = [];
        assert_eq!(RangeRule::new("empty", empty), Err(MedCalcError::InvalidRange(RangeError::Empty)));
    }

    #[test]
    fn test_overlapping_ranges() {
        let err = RangeRule::new("overlap", [("Range1", (0.0, 10.0)), ("Range2", (5.0, 15.0))])
            .unwrap_err();
        assert_eq!(
            err,
            MedCalcError::InvalidRange(RangeError::Overlapping {
                first: "Range1".to_string(),
                second: "Range2".to_string(),
            })
        );
    }

    #[test]
    fn test_overlap_detected_regardless_of_declaration_order() {
        let err = RangeRule::new(
            "overlap",
            [("C", (20.0, 30.0)), ("A", (0.0, 10.0)), ("B", (9.0, 12.0))],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MedCalcError::InvalidRange(RangeError::Overlapping { ref first, ref second })
                if first == "A" && second == "B"
        ));
    }

    #[test]
    fn test_inverted_ranges() {
        let err = RangeRule::new("inverted", [("Invalid", (10.0, 5.0))]).unwrap_err();
        assert!(matches!(
            err,
            MedCalcError::InvalidRange(RangeError::Inverted { ref category, .. }) if category == "Invalid"
        ));
        assert!(RangeRule::new("empty_range", [("Point", (5.0, 5.0))]).is_err());
        assert!(RangeRule::new("nan", [("NaN", (f64::NAN, 5.0))]).is_err());
    }

    #[test]
    fn test_duplicate_categories() {
        let err = RangeRule::new("dup", [("A", (0.0, 1.0)), ("A", (1.0, 2.0))]).unwrap_err();
        assert!(matches!(err, MedCalcError::InvalidRange(RangeError::DuplicateCategory { .. })));
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let rule = RangeRule::new("order", [("High", (10.0, 20.0)), ("Low", (0.0, 10.0))]).unwrap();
        let categories: Vec<&str> = rule.thresholds().map(|(c, _)| c).collect();
        assert_eq!(categories, vec!["High", "Low"]);
        assert_eq!(rule.categorize(5.0), "Low");
    }
}
