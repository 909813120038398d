//! `trellis settings` commands - account preferences
//!
//! Setting a value persists it, then announces the change on the event
//! bus so dependent state follows: a grade change re-derives the
//! expectations on both worksheets, for example.

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::catalog::{GradeTier, Role};
use crate::cli::helpers::{open_store, record_progress_updates};
use crate::cli::GlobalOpts;
use crate::coach::persona;
use crate::core::events::{Event, EventBus, Topic};
use crate::core::store::{Store, StoreKey};
use crate::entities::profile::{Preferences, ThemePreference};
use crate::worksheet::Worksheet;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Change a setting
    Set(SetArgs),
}

#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// One of: name, grade, role, persona, theme, notifications, autosave
    pub key: String,

    pub value: String,
}

pub fn run(cmd: SettingsCommands, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    match cmd {
        SettingsCommands::Show => show(&store),
        SettingsCommands::Set(args) => set(args, &store, global),
    }
}

fn show(store: &Store) -> Result<()> {
    let prefs: Preferences = store.load(StoreKey::Preferences).unwrap_or_default();
    let name = if prefs.display_name.is_empty() {
        "-".to_string()
    } else {
        prefs.display_name.clone()
    };
    println!("name           {}", name);
    println!("grade          {}", prefs.grade);
    println!("role           {}", prefs.role);
    println!("persona        {}", prefs.persona);
    println!("theme          {:?}", prefs.theme);
    println!("notifications  {}", prefs.notifications);
    println!("autosave       {}", prefs.autosave);
    Ok(())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "on" | "yes" => Ok(true),
        "false" | "off" | "no" => Ok(false),
        _ => Err(miette::miette!("expected on/off, got '{}'", value)),
    }
}

fn set(args: SetArgs, store: &Store, global: &GlobalOpts) -> Result<()> {
    let mut prefs: Preferences = store.load(StoreKey::Preferences).unwrap_or_default();

    // Persist first, then announce; subscribers re-read from the store
    let event = match args.key.as_str() {
        "name" => {
            prefs.display_name = args.value.clone();
            Some(Event::UserNameUpdated {
                name: args.value.clone(),
            })
        }
        "grade" => {
            let grade: GradeTier = args
                .value
                .parse()
                .map_err(|e: String| miette::miette!("{}", e))?;
            prefs.grade = grade;
            Some(Event::UserGradeUpdated { grade })
        }
        "role" => {
            let role: Role = args
                .value
                .parse()
                .map_err(|e: String| miette::miette!("{}", e))?;
            prefs.role = role;
            None
        }
        "persona" => {
            persona(&args.value).map_err(|e| miette::miette!("{}", e))?;
            prefs.persona = args.value.clone();
            Some(Event::PersonaUpdated {
                persona: args.value.clone(),
            })
        }
        "theme" => {
            prefs.theme = args
                .value
                .parse::<ThemePreference>()
                .map_err(|e| miette::miette!("{}", e))?;
            None
        }
        "notifications" => {
            prefs.notifications = parse_bool(&args.value)?;
            None
        }
        "autosave" => {
            prefs.autosave = parse_bool(&args.value)?;
            None
        }
        other => {
            return Err(miette::miette!(
                "unknown setting '{}'; try name, grade, role, persona, theme, notifications, autosave",
                other
            ))
        }
    };

    store
        .save(StoreKey::Preferences, &prefs)
        .map_err(|e| miette::miette!("{}", e))?;

    if let Some(event) = event {
        let bus = EventBus::new();
        wire_subscribers(&bus, store, global);
        bus.publish(event);
    }

    if !global.quiet {
        println!(
            "{} {} set to {}",
            style("✓").green(),
            args.key,
            style(&args.value).cyan()
        );
    }
    Ok(())
}

/// Dependent-state subscribers for settings changes
fn wire_subscribers<'a>(bus: &EventBus<'a>, store: &'a Store, global: &'a GlobalOpts) {
    bus.subscribe(Topic::UserGradeUpdated, move |event| {
        if let Event::UserGradeUpdated { grade } = event {
            for role in [Role::Ic, Role::Manager] {
                let mut ws = Worksheet::load(store, role);
                ws.change_grade(*grade);
                // Separate bus: publishing from inside a subscriber
                // would re-enter this one
                let inner = EventBus::new();
                record_progress_updates(&inner, store);
                if let Err(e) = ws.commit(store, &inner) {
                    eprintln!(
                        "{} failed to update {} worksheet: {}",
                        style("!").yellow(),
                        role,
                        e
                    );
                }
            }
            if !global.quiet {
                println!("  worksheet expectations recomputed for grade {}", grade);
            }
        }
    });

    bus.subscribe(Topic::PersonaUpdated, move |event| {
        if let Event::PersonaUpdated { persona } = event {
            if !global.quiet {
                println!("  future coach sessions will use {}", persona);
            }
        }
    });

    bus.subscribe(Topic::UserNameUpdated, move |event| {
        if let Event::UserNameUpdated { name } = event {
            if !global.quiet {
                println!("  dashboard will greet {}", name);
            }
        }
    });
}
