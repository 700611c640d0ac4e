use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from list.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub list: ListInfo,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListInfo {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show the key-hint line at the bottom of the TUI.
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides, keyed by theme slot name.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_true() -> bool {
    true
}
