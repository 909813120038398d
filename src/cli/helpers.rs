//! Shared helper functions for CLI commands

use miette::Result;

use crate::catalog::Role;
use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::core::events::{Event, EventBus, Topic};
use crate::core::store::{Store, StoreKey};
use crate::core::workspace::Workspace;
use crate::entities::profile::{Preferences, ProgressCounters};

/// Locate the workspace (honoring --workspace) and open its store
pub fn open_store(global: &GlobalOpts) -> Result<Store> {
    let workspace = match &global.workspace {
        Some(path) => Workspace::discover_from(path),
        None => Workspace::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))?;
    Store::open(&workspace).map_err(|e| miette::miette!("{}", e))
}

/// Resolve the worksheet role: explicit flag, then stored preference,
/// then config default, then IC
pub fn resolve_role(flag: Option<Role>, store: &Store) -> Role {
    if let Some(role) = flag {
        return role;
    }
    if let Some(prefs) = store.load::<Preferences>(StoreKey::Preferences) {
        return prefs.role;
    }
    Config::load()
        .default_role
        .as_deref()
        .and_then(|r| r.parse().ok())
        .unwrap_or_default()
}

/// Wire the subscriber that folds worksheet progress into the dashboard
/// counters whenever a worksheet commit announces a new percentage
pub fn record_progress_updates<'a>(bus: &EventBus<'a>, store: &'a Store) {
    bus.subscribe(Topic::ProgressUpdated, move |event| {
        if let Event::ProgressUpdated { role, percentage } = event {
            let mut counters: ProgressCounters =
                store.load(StoreKey::Progress).unwrap_or_default();
            counters.record_progress(*role, *percentage);
            let _ = store.save(StoreKey::Progress, &counters);
        }
    });
}

/// Truncate a string to max_len, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
