use medcalc_core::{MedCalcError, MedCalcResult, Region, UnitDefaults};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_VAR: &str = "MEDCALC_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "medcalc.toml";
pub const DEFAULT_LOG_FILTER: &str = "medcalc=warn";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// `US` selects imperial defaults, anything else SI.
    #[serde(default)]
    pub region: Option<String>,
    /// Overrides the region's default units.
    #[serde(default)]
    pub units: Option<UnitDefaults>,
    #[serde(default = "default_guideline")]
    pub guideline: String,
    #[serde(default = "default_formula")]
    pub formula: String,
    #[serde(default)]
    pub log_filter: Option<String>,
}

fn default_guideline() -> String {
    "who".to_string()
}

fn default_formula() -> String {
    "standard".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            region: None,
            units: None,
            guideline: default_guideline(),
            formula: default_formula(),
            log_filter: None,
        }
    }
}

/// Where the configuration came from. Reported once logging is up.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults { missing: PathBuf },
}

impl CliConfig {
    /// Loads `path`, else `$MEDCALC_CONFIG`, else `medcalc.toml`.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error.
    pub fn load(path: Option<&Path>) -> MedCalcResult<(Self, ConfigSource)> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => std::env::var_os(CONFIG_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        match fs::read_to_string(&config_path) {
            Ok(contents) => {
                let config = Self::from_toml_str(&contents).map_err(|e| {
                    MedCalcError::configuration(format!("{}: {e}", config_path.display()))
                })?;
                Ok((config, ConfigSource::File(config_path)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Ok((Self::default(), ConfigSource::Defaults { missing: config_path }))
            }
            Err(e) => Err(MedCalcError::configuration(format!(
                "cannot read {}: {e}",
                config_path.display()
            ))),
        }
    }

    pub fn from_toml_str(contents: &str) -> MedCalcResult<Self> {
        toml::from_str(contents).map_err(|e| MedCalcError::configuration(e.to_string()))
    }

    pub fn region(&self) -> Region {
        self.region.as_deref().map(parse_region).unwrap_or_default()
    }

    /// Explicit `[units]` win over the region's defaults.
    pub fn unit_defaults(&self) -> UnitDefaults {
        self.units.clone().unwrap_or_else(|| UnitDefaults::for_region(self.region()))
    }

    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

pub fn parse_region(s: &str) -> Region {
    match s.parse::<Region>() {
        Ok(region) => region,
        Err(never) => match never {},
    }
}
