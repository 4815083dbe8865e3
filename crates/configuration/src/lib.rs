use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    DataSourceSettings, Evaluation, OutputFormat, OutputSettings, UniverseEntry,
};

/// Prefix of the environment variables that override file values,
/// e.g. `TICKRANK__DATA_SOURCE__TIMEOUT_SECS=30`.
const ENV_PREFIX: &str = "TICKRANK";

/// Loads the application configuration from `path`, or `config.toml` when none is given.
///
/// This function is the primary entry point for this crate. It reads the configuration file,
/// layers `TICKRANK__*` environment variables on top, deserializes the result into our
/// strongly-typed `Config` struct and validates it.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path),
        None => config::File::with_name("config.toml"),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    finish(builder)
}

/// Loads the configuration from an in-memory TOML document.
pub fn load_config_from_str(toml: &str) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    finish(builder)
}

fn finish(builder: config::Config) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(
        tickers = config.universe.len(),
        start = %config.evaluation.start_date,
        end = %config.evaluation.end_date,
        "Configuration loaded."
    );

    Ok(config)
}
