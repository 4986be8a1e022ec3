use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do with an LSP column that lies past the end of its line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnOverflow {
    /// Surface `ColumnOutOfRange` to the caller
    #[default]
    Reject,
    /// Resolve to the end of the line (before its newline)
    ClampToLineEnd,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConversionSettings {
    pub column_overflow: ColumnOverflow,
}

impl ConversionSettings {
    /// Parse settings from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
