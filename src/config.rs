pub mod settings;
pub mod user;

pub use settings::{ColumnOverflow, ConversionSettings};
pub use user::{load_user_config, user_config_path};

use crate::error::ConfigError;
use std::path::Path;

/// Load conversion settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<ConversionSettings, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let settings = ConversionSettings::from_toml_str(&text)?;
    log::debug!(
        target: "posbridge::config",
        "Loaded settings from {}: {:?}",
        path.display(),
        settings
    );
    Ok(settings)
}

/// Resolve the settings for a run.
///
/// An explicit path wins over the user configuration file; without either,
/// defaults apply.
pub fn resolve_settings(explicit: Option<&Path>) -> Result<ConversionSettings, ConfigError> {
    match explicit {
        Some(path) => load_settings(path),
        None => Ok(load_user_config()?.unwrap_or_default()),
    }
}
