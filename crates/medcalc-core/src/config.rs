//! Default units per region, passed explicitly to input constructors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regional unit conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Us,
    Uk,
    #[default]
    Si,
}

impl FromStr for Region {
    type Err = std::convert::Infallible;

    /// Case-insensitive. Anything other than `US` or `UK` means SI units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "US" => Region::Us,
            "UK" => Region::Uk,
            _ => Region::Si,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => write!(f, "US"),
            Region::Uk => write!(f, "UK"),
            Region::Si => write!(f, "SI"),
        }
    }
}

/// Units applied to bare numbers in input payloads, and the unit results are
/// reported in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitDefaults {
    #[serde(default = "default_weight_unit")]
    pub weight: String,
    #[serde(default = "default_height_unit")]
    pub height: String,
    #[serde(default = "default_bmi_unit")]
    pub bmi: String,
}

fn default_weight_unit() -> String {
    "kg".to_string()
}

fn default_height_unit() -> String {
    "m".to_string()
}

fn default_bmi_unit() -> String {
    "kg/m^2".to_string()
}

impl Default for UnitDefaults {
    fn default() -> Self {
        Self { weight: default_weight_unit(), height: default_height_unit(), bmi: default_bmi_unit() }
    }
}

impl UnitDefaults {
    /// The UK uses SI units here, like every region other than the US.
    pub fn for_region(region: Region) -> Self {
        match region {
            Region::Us => Self {
                weight: "lb".to_string(),
                height: "in".to_string(),
                bmi: "lb/in^2".to_string(),
            },
            Region::Uk | Region::Si => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parsing() {
        assert_eq!("us".parse::<Region>().unwrap(), Region::Us);
        assert_eq!(" UK ".parse::<Region>().unwrap(), Region::Uk);
        assert_eq!("fr".parse::<Region>().unwrap(), Region::Si);
    }

    #[test]
    fn test_defaults_per_region() {
        let us = UnitDefaults::for_region(Region::Us);
        assert_eq!((us.weight.as_str(), us.height.as_str(), us.bmi.as_str()), ("lb", "in", "lb/in^2"));
        assert_eq!(UnitDefaults::for_region(Region::Uk), UnitDefaults::default());
        assert_eq!(UnitDefaults::default().bmi, "kg/m^2");
    }

    #[test]
    fn test_partial_units_deserialize_with_defaults() {
        let units: UnitDefaults = serde_json::from_str(r#"{"weight": "lb"}"#).unwrap();
        assert_eq!(units.weight, "lb");
        assert_eq!(units.height, "m");
    }
}
