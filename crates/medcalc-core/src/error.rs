//! Error handling for medcalc core operations
//!
//! Every failure in the calculation path is raised where it is detected and
//! returned unchanged to the caller. The variants map one-to-one onto the
//! kinds of failure a calculator can produce, so callers can match on them
//! instead of parsing messages.

use std::fmt;
use thiserror::Error;

/// Error type for all medcalc core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MedCalcError {
    /// Input observation missing a required unit or violating a schema constraint
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Unit conversion that cannot be performed
    #[error("Conversion error: {message}")]
    Conversion { message: String, from: Option<String>, to: Option<String> },

    /// Unit expression the unit registry does not recognise
    #[error("Unknown unit: '{unit}'")]
    UnknownUnit { unit: String },

    /// Invalid threshold set given to a range rule
    #[error("Invalid range: {0}")]
    InvalidRange(RangeError),

    /// Registry insertion of a name that already exists
    #[error("Duplicate {kind} name: '{name}'")]
    DuplicateName { kind: &'static str, name: String },

    /// Lookup of a name that is not registered
    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    /// Positional registry access outside the collection
    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Formula invoked without one of its required parameters
    #[error("Formula '{formula}' is missing required parameter '{parameter}'")]
    MissingParameter { formula: String, parameter: String },

    /// Formula parameter present but not coercible to a number
    #[error("Parameter '{parameter}' must be numeric, found {found}")]
    InvalidParameterType { parameter: String, found: String },

    /// Domain guard on input values (e.g. non-positive height)
    #[error("Invalid input: {message}")]
    InvalidInput { message: String, field: Option<String> },

    /// Configuration that cannot be loaded or understood
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Reasons a range rule's thresholds are rejected
#[derive(Debug, Clone, PartialEq)]
pub enum RangeError {
    /// No thresholds at all
    Empty,
    /// The same category label appears twice
    DuplicateCategory { category: String },
    /// `min >= max` (or either bound is NaN)
    Inverted { category: String, min: f64, max: f64 },
    /// Two ranges share part of their interval
    Overlapping { first: String, second: String },
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Empty => write!(f, "thresholds cannot be empty"),
            RangeError::DuplicateCategory { category } => {
                write!(f, "category '{category}' is defined more than once")
            }
            RangeError::Inverted { category, min, max } => write!(
                f,
                "invalid range for category '{category}': minimum {min} must be less than maximum {max}"
            ),
            RangeError::Overlapping { first, second } => {
                write!(f, "overlapping ranges between categories '{first}' and '{second}'")
            }
        }
    }
}

impl MedCalcError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            MedCalcError::Validation { .. } => "validation",
            MedCalcError::Conversion { .. } => "conversion",
            MedCalcError::UnknownUnit { .. } => "unknown_unit",
            MedCalcError::InvalidRange(_) => "invalid_range",
            MedCalcError::DuplicateName { .. } => "duplicate_name",
            MedCalcError::NotFound { .. } => "not_found",
            MedCalcError::IndexOutOfRange { .. } => "index_out_of_range",
            MedCalcError::MissingParameter { .. } => "missing_parameter",
            MedCalcError::InvalidParameterType { .. } => "invalid_parameter_type",
            MedCalcError::InvalidInput { .. } => "invalid_input",
            MedCalcError::Configuration { .. } => "configuration",
        }
    }

    /// Whether the caller can fix the error by changing the request input
    /// rather than the calculator setup.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            MedCalcError::Validation { .. }
                | MedCalcError::Conversion { .. }
                | MedCalcError::UnknownUnit { .. }
                | MedCalcError::MissingParameter { .. }
                | MedCalcError::InvalidParameterType { .. }
                | MedCalcError::InvalidInput { .. }
        )
    }
}

/// Result type alias for medcalc operations
pub type MedCalcResult<T> = Result<T, MedCalcError>;

/// Convenience constructors for common error scenarios
impl MedCalcError {
    /// Create a validation error tied to a field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), field: Some(field.to_string()) }
    }

    /// Create a conversion error between two (optional) units
    pub fn conversion(from: Option<&str>, to: Option<&str>, message: impl Into<String>) -> Self {
        Self::Conversion {
            message: message.into(),
            from: from.map(str::to_string),
            to: to.map(str::to_string),
        }
    }

    /// Create an unknown unit error
    pub fn unknown_unit(unit: impl Into<String>) -> Self {
        Self::UnknownUnit { unit: unit.into() }
    }

    /// Create a duplicate name error
    pub fn duplicate(kind: &'static str, name: impl Into<String>) -> Self {
        Self::DuplicateName { kind, name: name.into() }
    }

    /// Create a not found error
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound { kind, name: name.into() }
    }

    /// Create a missing parameter error
    pub fn missing_parameter(formula: &str, parameter: &str) -> Self {
        Self::MissingParameter { formula: formula.to_string(), parameter: parameter.to_string() }
    }

    /// Create an invalid parameter type error
    pub fn invalid_parameter_type(parameter: &str, found: impl Into<String>) -> Self {
        Self::InvalidParameterType { parameter: parameter.to_string(), found: found.into() }
    }

    /// Create an invalid input error tied to a field
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput { message: message.into(), field: Some(field.to_string()) }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }
}

impl From<RangeError> for MedCalcError {
    fn from(err: RangeError) -> Self {
        MedCalcError::InvalidRange(err)
    }
}
