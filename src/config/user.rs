//! User configuration loading for posbridge.
//!
//! User config location: $XDG_CONFIG_HOME/posbridge/posbridge.toml
//! Fallback: the platform config directory (~/.config on Linux)

use std::path::PathBuf;

use super::settings::ConversionSettings;
use crate::error::ConfigError;

/// Returns the path to the user configuration file.
///
/// The path is determined by:
/// 1. If $XDG_CONFIG_HOME is set: $XDG_CONFIG_HOME/posbridge/posbridge.toml
/// 2. Otherwise: `dirs::config_dir()`/posbridge/posbridge.toml
///
/// Returns None if no config directory can be determined.
pub fn user_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    Some(base.join("posbridge").join("posbridge.toml"))
}

/// Load the user configuration file if it exists.
///
/// A missing file is not an error; an unreadable or malformed one is.
pub fn load_user_config() -> Result<Option<ConversionSettings>, ConfigError> {
    let Some(path) = user_config_path() else {
        return Ok(None);
    };
    if !path.is_file() {
        log::trace!(target: "posbridge::config", "No user config at {}", path.display());
        return Ok(None);
    }
    super::load_settings(&path).map(Some)
}
