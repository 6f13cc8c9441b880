use clap::Parser;
use medcalc_cli::{Cli, CliConfig, CliError, ConfigSource, TracingConfig, init_tracing, run};
use std::io;
use tracing::{debug, info, warn};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, source) = CliConfig::load(cli.config.as_deref())?;

    let filter = if cli.verbose { "medcalc=debug" } else { config.log_filter() };
    init_tracing(&TracingConfig::new(filter).with_json(cli.log_json))?;

    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "Loaded configuration"),
        // Only worth a warning when the path was asked for
        ConfigSource::Defaults { missing } if cli.config.is_some() => warn!(
            "Configuration file '{}' not found. Using default configuration.",
            missing.display()
        ),
        ConfigSource::Defaults { missing } => {
            debug!(path = %missing.display(), "No configuration file, using defaults")
        }
    }

    match run(&cli, &config, io::stdin().lock(), io::stdout().lock()) {
        Err(err) if err.is_input_error() => {
            match &err {
                CliError::Calculation(inner) => println!("Error in input: {inner}"),
                other => println!("{other}"),
            }
            std::process::exit(1);
        }
        result => Ok(result?),
    }
}
