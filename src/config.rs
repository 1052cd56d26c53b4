//! Configuration
//!
//! Completion limits and logging settings, layered from defaults, the global
//! config file, an optional explicit file and `ARGTREE_` environment variables.

use crate::argument::{ARGUMENT_SEPARATOR, MAX_SUGGESTIONS};
use crate::context::{Actor, CommandInput};
use crate::error::ArgtreeError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::{global_config_path, ENV_PREFIX};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArgtreeConfig {
    #[serde(default)]
    pub completion: CompletionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Completion limits applied to object-id arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Upper bound on suggestions per request; capped at [`MAX_SUGGESTIONS`].
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Prefix length from which all objects are scanned, not only targeted ones.
    #[serde(default = "default_min_completion_input")]
    pub min_completion_input: usize,

    /// Separator used to split a raw input line into tokens.
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_max_suggestions() -> usize {
    MAX_SUGGESTIONS
}

fn default_min_completion_input() -> usize {
    crate::argument::object_id::DEFAULT_MIN_COMPLETION_INPUT
}

fn default_separator() -> String {
    ARGUMENT_SEPARATOR.to_string()
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: default_max_suggestions(),
            min_completion_input: default_min_completion_input(),
            separator: default_separator(),
        }
    }
}

impl CompletionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_suggestions == 0 {
            return Err("max_suggestions must be greater than 0".to_string());
        }
        if self.separator.is_empty() {
            return Err("separator cannot be empty".to_string());
        }
        Ok(())
    }

    /// Split a raw input line into tokens. Empty tokens are kept, so a
    /// trailing separator yields an empty last token to complete.
    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        if line.is_empty() {
            return Vec::new();
        }
        line.split(self.separator.as_str()).collect()
    }

    /// Input for `command_alias` from a raw line, carrying this separator so
    /// joined identifiers and suggestions split back the same way.
    pub fn input(&self, actor: Actor, command_alias: impl Into<String>, line: &str) -> CommandInput {
        CommandInput::new(actor, command_alias, self.split(line)).with_separator(&self.separator)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Completion(String),
    Logging(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Completion(msg) => write!(f, "Completion: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ArgtreeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        if let Err(e) = self.completion.validate() {
            errors.push(ValidationError::Completion(e));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Builds an [`ArgtreeConfig`] from layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    global_path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            global_path: global_config_path(),
        }
    }
}

impl ConfigLoader {
    /// Defaults, global file, `path` if given, then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<ArgtreeConfig, ArgtreeError> {
        Self::default().load_layers(path)
    }

    /// Defaults and the given file only.
    pub fn load_from_file(path: &Path) -> Result<ArgtreeConfig, ArgtreeError> {
        let builder = sources::add_explicit_file(merge::builder_with_defaults()?, path);
        finish(builder)
    }

    /// Use a different global config file, or none.
    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global_path = path;
        self
    }

    pub fn load_layers(&self, path: Option<&Path>) -> Result<ArgtreeConfig, ArgtreeError> {
        let mut builder =
            sources::add_global_file(merge::builder_with_defaults()?, self.global_path.as_deref());
        if let Some(path) = path {
            builder = sources::add_explicit_file(builder, path);
        }
        finish(sources::add_environment(builder))
    }
}

fn finish(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<ArgtreeConfig, ArgtreeError> {
    let config: ArgtreeConfig = builder.build()?.try_deserialize()?;
    config.validate().map_err(|errors| {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        ArgtreeError::ConfigError(format!("Invalid configuration: {}", joined))
    })?;
    Ok(config)
}
