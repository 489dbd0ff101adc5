use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, InputRanges, Output, OutputFormat, Scenario, SweepSettings};

/// Prefix for environment overrides, e.g. `LEVERAGE__SCENARIO__FIXED_COST_PCT=25`.
const ENV_PREFIX: &str = "LEVERAGE";

/// Loads the application configuration from `config.toml` in the working directory.
///
/// The file is optional: without it the built-in defaults apply. Environment
/// variables override both.
pub fn load_config() -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config").required(false))
        .add_source(environment());

    finish(builder)
}

/// Loads the configuration from an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(environment());

    finish(builder)
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<Config, ConfigError> {
    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;

    tracing::debug!(?config, "Configuration loaded");
    Ok(config)
}

impl Config {
    /// Rejects ranges and sweeps that cannot be used.
    ///
    /// The scenario itself is not checked: any cost structure is a valid
    /// input, including ones without a positive margin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, range) in [
            ("ranges.cost_pct", &self.ranges.cost_pct),
            ("ranges.price_change_pct", &self.ranges.price_change_pct),
        ] {
            if range.min > range.max {
                return Err(ConfigError::ValidationError(format!(
                    "{}: min {} is above max {}",
                    name, range.min, range.max
                )));
            }
        }

        if self.sweep.step_pct.is_sign_negative() || self.sweep.step_pct.is_zero() {
            return Err(ConfigError::ValidationError(format!(
                "sweep.step_pct must be positive, got {}",
                self.sweep.step_pct
            )));
        }
        if self.sweep.start_pct > self.sweep.end_pct {
            return Err(ConfigError::ValidationError(format!(
                "sweep.start_pct {} is above sweep.end_pct {}",
                self.sweep.start_pct, self.sweep.end_pct
            )));
        }

        Ok(())
    }
}
