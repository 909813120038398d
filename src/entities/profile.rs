//! User preferences and aggregate progress counters

use serde::{Deserialize, Serialize};

use crate::catalog::{GradeTier, Role};

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl std::str::FromStr for ThemePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// Account settings persisted under a single key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemePreference,
    pub persona: String,
    pub notifications: bool,
    pub autosave: bool,
    pub display_name: String,
    pub grade: GradeTier,
    pub role: Role,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemePreference::System,
            persona: "liz".to_string(),
            notifications: true,
            autosave: true,
            display_name: String::new(),
            grade: GradeTier::default(),
            role: Role::default(),
        }
    }
}

/// Aggregate counters consumed by the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressCounters {
    pub ic_progress: u8,
    pub manager_progress: u8,
    pub weekly_check_ins: u32,
    pub quarterly_check_ins: u32,
    pub last_activity: Option<String>,
}

impl ProgressCounters {
    pub fn record_progress(&mut self, role: Role, percentage: u8) {
        match role {
            Role::Ic => self.ic_progress = percentage,
            Role::Manager => self.manager_progress = percentage,
        }
        self.touch();
    }

    pub fn touch(&mut self) {
        self.last_activity = Some(chrono::Local::now().format("%Y-%m-%d").to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_tolerate_missing_fields() {
        // Old payload lacking newer fields still loads, with defaults
        let json = r#"{"theme":"dark","persona":"madeline"}"#;
        let prefs: Preferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.theme, ThemePreference::Dark);
        assert_eq!(prefs.persona, "madeline");
        assert!(prefs.autosave);
        assert_eq!(prefs.grade, GradeTier::G5);
    }

    #[test]
    fn test_record_progress_tracks_roles_separately() {
        let mut counters = ProgressCounters::default();
        counters.record_progress(Role::Ic, 40);
        counters.record_progress(Role::Manager, 75);
        assert_eq!(counters.ic_progress, 40);
        assert_eq!(counters.manager_progress, 75);
        assert!(counters.last_activity.is_some());
    }
}
