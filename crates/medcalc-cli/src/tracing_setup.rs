//! Logging setup for the binary.
//!
//! Events go to stderr so stdout carries only the calculator's output.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    /// Used when `RUST_LOG` is unset or invalid.
    pub fallback_filter: String,
    pub json: bool,
}

impl TracingConfig {
    pub fn new(fallback_filter: impl Into<String>) -> Self {
        Self { fallback_filter: fallback_filter.into(), json: false }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// `RUST_LOG` wins; otherwise the fallback directive.
    pub fn env_filter(&self) -> anyhow::Result<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.fallback_filter))
            .map_err(|e| anyhow!("invalid log filter '{}': {e}", self.fallback_filter))
    }
}

pub fn init_tracing(config: &TracingConfig) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = if config.json { builder.json().try_init() } else { builder.try_init() };
    result.map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
