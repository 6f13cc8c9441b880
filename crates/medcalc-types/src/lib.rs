//! Medcalc Types
//!
//! This crate defines the value types shared across the medcalc workspace
//! (currently `medcalc-core` and `medcalc-calculator`). Keeping `ParamValue`
//! here lets formulas and input models agree on one parameter representation
//! without depending on each other.

#![warn(missing_docs)]

mod types;
pub use types::ParamValue;
