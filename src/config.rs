use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_PLACEHOLDER_HTML: &str = "<div class=\"tr-empty\">No tracker data yet.</div>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockSide {
    #[default]
    Left,
    Right,
}

impl DockSide {
    pub fn toggled(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Which map-typed top-level fields hold entity rosters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Never filtered; its top-level group starts expanded.
    pub primary: String,
    /// Filtered for placeholder entries; hidden entirely when empty.
    pub auxiliary: Vec<String>,
    /// Extra keys treated as "no entity", compared case-insensitively.
    pub placeholder_tokens: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            primary: "MainCharacters".to_string(),
            auxiliary: vec![
                "OtherCharacters".to_string(),
                "SmallEnemies".to_string(),
                "BigEnemies".to_string(),
            ],
            placeholder_tokens: vec!["none".to_string(), "n/a".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    pub refresh_interval_ms: u64,
    pub debounce_ms: u64,
    pub regenerate_timeout_ms: u64,
    pub side: DockSide,
    pub auto_hide_original: bool,
    pub placeholder_html: String,
    pub dock_element_id: String,
    pub body_element_id: String,
    pub roster: RosterConfig,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 400,
            debounce_ms: 150,
            regenerate_timeout_ms: 10_000,
            side: DockSide::Left,
            auto_hide_original: true,
            placeholder_html: DEFAULT_PLACEHOLDER_HTML.to_string(),
            dock_element_id: "tracker-dock".to_string(),
            body_element_id: "tracker-dock-body".to_string(),
            roster: RosterConfig::default(),
        }
    }
}

impl DockConfig {
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Loads a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn regenerate_timeout(&self) -> Duration {
        Duration::from_millis(self.regenerate_timeout_ms)
    }
}
