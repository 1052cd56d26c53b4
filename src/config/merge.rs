//! Merge rules: defaults first, every later source overrides.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Create a Config builder with the completion defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("completion.max_suggestions", 20_i64)?
        .set_default("completion.min_completion_input", 3_i64)?
        .set_default("completion.separator", " ")?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}
