//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::PathBuf;

use crate::core::workspace::Workspace;

/// Trellis configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display name shown on worksheets and the dashboard
    pub display_name: Option<String>,

    /// Default worksheet role (ic or manager)
    pub default_role: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/trellis/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&global_path) {
                    if let Ok(global) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(global);
                    }
                }
            }
        }

        // 3. Workspace config (.trellis/config.yaml)
        if let Ok(ws) = Workspace::discover() {
            let ws_config_path = ws.trellis_dir().join("config.yaml");
            if ws_config_path.exists() {
                if let Ok(contents) = std::fs::read_to_string(&ws_config_path) {
                    if let Ok(ws_config) = serde_yml::from_str::<Config>(&contents) {
                        config.merge(ws_config);
                    }
                }
            }
        }

        // 4. Environment variables
        if let Ok(name) = std::env::var("TRELLIS_DISPLAY_NAME") {
            config.display_name = Some(name);
        }
        if let Ok(role) = std::env::var("TRELLIS_ROLE") {
            config.default_role = Some(role);
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "trellis")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.display_name.is_some() {
            self.display_name = other.display_name;
        }
        if other.default_role.is_some() {
            self.default_role = other.default_role;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Get the display name, falling back to the OS username
    pub fn display_name(&self) -> String {
        if let Some(ref name) = self.display_name {
            return name.clone();
        }

        std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_else(|_| "you".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            display_name: Some("base".into()),
            default_role: None,
            default_format: Some("auto".into()),
        };
        base.merge(Config {
            display_name: Some("over".into()),
            default_role: Some("manager".into()),
            default_format: None,
        });
        assert_eq!(base.display_name.as_deref(), Some("over"));
        assert_eq!(base.default_role.as_deref(), Some("manager"));
        assert_eq!(base.default_format.as_deref(), Some("auto"));
    }

    #[test]
    fn test_display_name_never_empty() {
        let config = Config::default();
        assert!(!config.display_name().is_empty());
    }
}
