//! Command line arguments and how they combine with the config file.

use crate::config::{CONFIG_PATH_VAR, CliConfig, parse_region};
use clap::Parser;
use medcalc_core::UnitDefaults;
use std::path::PathBuf;

/// Body Mass Index calculator
///
/// Values not given as flags are asked for on stdin.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "medcalc")]
#[command(version, about)]
pub struct Cli {
    /// Weight value
    #[arg(long)]
    pub weight: Option<f64>,

    /// Weight unit, e.g. kg, lb, st
    #[arg(long)]
    pub weight_unit: Option<String>,

    /// Height value
    #[arg(long)]
    pub height: Option<f64>,

    /// Height unit, e.g. m, cm, in, ft
    #[arg(long)]
    pub height_unit: Option<String>,

    /// Unit to report the result in, e.g. kg/m^2, lb/in^2
    #[arg(long)]
    pub output_unit: Option<String>,

    /// Guideline to classify with (who, asian)
    #[arg(short, long)]
    pub guideline: Option<String>,

    /// Formula to evaluate (standard, ponderal, revised)
    #[arg(short, long)]
    pub formula: Option<String>,

    /// Region for default units; US means lb and in, anything else SI
    #[arg(long)]
    pub region: Option<String>,

    /// TOML configuration file
    #[arg(short, long, env = CONFIG_PATH_VAR)]
    pub config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Flags layered over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub guideline: String,
    pub formula: String,
    pub units: UnitDefaults,
    pub json: bool,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &CliConfig) -> Self {
        let units = match cli.region.as_deref() {
            Some(region) => UnitDefaults::for_region(parse_region(region)),
            None => config.unit_defaults(),
        };
        Self {
            guideline: cli.guideline.clone().unwrap_or_else(|| config.guideline.clone()),
            formula: cli.formula.clone().unwrap_or_else(|| config.formula.clone()),
            units,
            json: cli.json,
        }
    }
}
