//! Configuration sources in precedence order: global file, explicit file,
//! environment.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of environment overrides, e.g. `ARGTREE_COMPLETION__MAX_SUGGESTIONS`.
pub const ENV_PREFIX: &str = "ARGTREE";

/// `$XDG_CONFIG_HOME/argtree/config.toml` or the platform equivalent.
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "argtree").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file if it exists.
pub fn add_global_file(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    match path {
        Some(path) if path.exists() => {
            debug!(config_path = %path.display(), "Using global configuration");
            builder.add_source(File::from(path).format(FileFormat::Toml).required(false))
        }
        _ => builder,
    }
}

/// Add an explicitly requested config file; it must exist.
pub fn add_explicit_file(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
) -> ConfigBuilder<DefaultState> {
    builder.add_source(File::from(path).format(FileFormat::Toml).required(true))
}

pub fn add_environment(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    )
}
