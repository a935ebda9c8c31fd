//! Editor defaults from the `[editor]` table of `config.toml`.

use crate::core::pricing::DEFAULT_MULTIPLIER;
use serde::Deserialize;

/// Defaults applied to new editing sessions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Multiplier used for new material sets and restored when custom cost is enabled
    pub default_multiplier: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_multiplier: DEFAULT_MULTIPLIER,
        }
    }
}
