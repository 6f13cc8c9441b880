//! Command line front end for the BMI calculators.

pub mod cli;
pub mod config;
pub mod session;
pub mod tracing_setup;

pub use cli::{Cli, Settings};
pub use config::{CliConfig, ConfigSource};
pub use session::{BmiRequest, CliError, InputError, Prompter, run};
pub use tracing_setup::{TracingConfig, init_tracing};
