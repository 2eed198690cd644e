//! User-configurable behaviour.

use crate::error::Result;
use editor_actions_lang::{ListMarkers, TitleCaseRules};
use serde::{Deserialize, Serialize};

/// Settings consulted by the actions.
///
/// Deserialization fills missing keys with defaults and ignores unknown ones, so older saved
/// settings keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Continue list items (bullets, numbers, checkboxes) on inserted lines.
    pub auto_insert_list_prefix: bool,
    /// Markers recognized as list items.
    pub list_markers: ListMarkers,
    /// Title casing rules.
    pub title_case: TitleCaseRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_insert_list_prefix: true,
            list_markers: ListMarkers::default(),
            title_case: TitleCaseRules::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize settings to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
