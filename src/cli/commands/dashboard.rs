//! `trellis dashboard` command - progress at a glance

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::catalog::Role;
use crate::checkin::{QuarterlyCheckIn, WeeklyCheckIn};
use crate::cli::args::OutputFormat;
use crate::cli::helpers::open_store;
use crate::cli::GlobalOpts;
use crate::coach::ChatSession;
use crate::core::config::Config;
use crate::core::store::StoreKey;
use crate::entities::profile::{Preferences, ProgressCounters};
use crate::worksheet::Worksheet;

#[derive(clap::Args, Debug)]
pub struct DashboardArgs {}

fn progress_bar(percentage: u8) -> String {
    let filled = (percentage as usize * 20) / 100;
    format!(
        "[{}{}] {:>3}%",
        "█".repeat(filled),
        "░".repeat(20 - filled),
        percentage
    )
}

pub fn run(_args: DashboardArgs, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;

    let prefs: Preferences = store.load(StoreKey::Preferences).unwrap_or_default();
    let name = if prefs.display_name.is_empty() {
        Config::load().display_name()
    } else {
        prefs.display_name.clone()
    };

    // Live worksheet state, not the cached counters
    let ic = Worksheet::load(&store, Role::Ic);
    let manager = Worksheet::load(&store, Role::Manager);
    let counters: ProgressCounters = store.load(StoreKey::Progress).unwrap_or_default();
    let weekly = WeeklyCheckIn::history(&store);
    let quarterly = QuarterlyCheckIn::history(&store);
    let conversations = ChatSession::histories(&store);

    if global.format == OutputFormat::Json {
        let summary = serde_json::json!({
            "name": name,
            "grade": ic.grade().to_string(),
            "ic_progress": ic.progress_percentage(),
            "manager_progress": manager.progress_percentage(),
            "weekly_check_ins": weekly.len(),
            "quarterly_reviews": quarterly.len(),
            "saved_conversations": conversations.len(),
            "last_activity": counters.last_activity,
        });
        println!("{}", serde_json::to_string_pretty(&summary).into_diagnostic()?);
        return Ok(());
    }

    println!("{}", style(format!("Career dashboard for {}", name)).bold());
    println!();
    println!(
        "  IC worksheet       {}  (grade {})",
        progress_bar(ic.progress_percentage()),
        ic.grade()
    );
    println!(
        "  Manager worksheet  {}  (grade {})",
        progress_bar(manager.progress_percentage()),
        manager.grade()
    );
    println!();
    println!(
        "  Weekly check-ins:   {}",
        style(weekly.len()).cyan()
    );
    println!(
        "  Quarterly reviews:  {}",
        style(quarterly.len()).cyan()
    );
    println!(
        "  Coach conversations: {}",
        style(conversations.len()).cyan()
    );
    if let Some(last) = &counters.last_activity {
        println!();
        println!("  Last activity: {}", style(last).dim());
    }

    if let Some(latest) = weekly.first() {
        if let Some(win) = latest.wins.iter().find(|w| !w.is_empty()) {
            println!();
            println!("  Latest win ({}): {}", latest.week, style(win).italic());
        }
    }
    Ok(())
}
