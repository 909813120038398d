//! `trellis weekly` commands - the weekly check-in

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::catalog;
use crate::checkin::{WeeklyCheckIn, WeeklyList};
use crate::cli::args::OutputFormat;
use crate::cli::helpers::{open_store, truncate_str};
use crate::cli::GlobalOpts;

#[derive(Subcommand)]
pub enum WeeklyCommands {
    /// Show the current week's draft
    Show,

    /// List the reflection questions
    Questions,

    /// Answer a reflection question
    Answer(AnswerArgs),

    /// Add a goal, win, or blocker
    Add(AddArgs),

    /// Remove a goal, win, or blocker by index
    Remove(RemoveArgs),

    /// Finalize the draft into your check-in history
    Submit,

    /// List submitted check-ins
    History,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum WeeklyListArg {
    Goal,
    Win,
    Blocker,
}

impl From<WeeklyListArg> for WeeklyList {
    fn from(arg: WeeklyListArg) -> Self {
        match arg {
            WeeklyListArg::Goal => WeeklyList::Goals,
            WeeklyListArg::Win => WeeklyList::Wins,
            WeeklyListArg::Blocker => WeeklyList::Blockers,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AnswerArgs {
    /// Question id (see `trellis weekly questions`)
    pub question: String,

    /// Your answer; empty clears the response
    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Which list to add to
    #[arg(value_enum)]
    pub list: WeeklyListArg,

    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    #[arg(value_enum)]
    pub list: WeeklyListArg,

    /// Zero-based index shown by `trellis weekly show`
    pub index: usize,
}

pub fn run(cmd: WeeklyCommands, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    match cmd {
        WeeklyCommands::Show => {
            let checkin = WeeklyCheckIn::load(&store);
            let draft = checkin.draft();
            println!("{} {}", style("Week").bold(), style(&draft.week).cyan());
            println!();
            for question in catalog::weekly_questions() {
                let answer = draft
                    .responses
                    .get(question.id)
                    .map(String::as_str)
                    .unwrap_or("-");
                println!("  {}", style(question.question).bold());
                println!("    {}", answer);
            }
            println!();
            for (label, items) in [
                ("Goals", &draft.goals),
                ("Wins", &draft.wins),
                ("Blockers", &draft.blockers),
            ] {
                println!("{}", style(label).bold());
                for (i, item) in items.iter().enumerate() {
                    let text = if item.is_empty() { "-" } else { item.as_str() };
                    println!("  [{}] {}", i, text);
                }
            }
            Ok(())
        }
        WeeklyCommands::Questions => {
            for question in catalog::weekly_questions() {
                println!("{}  {}", style(question.id).cyan(), question.question);
                if global.verbose && !question.competency_ids.is_empty() {
                    println!(
                        "      relates to: {}",
                        style(question.competency_ids.join(", ")).dim()
                    );
                }
            }
            Ok(())
        }
        WeeklyCommands::Answer(args) => {
            if !catalog::weekly_questions().iter().any(|q| q.id == args.question) {
                return Err(miette::miette!(
                    "unknown question '{}'; run 'trellis weekly questions'",
                    args.question
                ));
            }
            let mut checkin = WeeklyCheckIn::load(&store);
            checkin.set_response(&args.question, args.text);
            checkin.save_draft(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Draft saved", style("✓").green());
            }
            Ok(())
        }
        WeeklyCommands::Add(args) => {
            let mut checkin = WeeklyCheckIn::load(&store);
            checkin.push_item(args.list.into(), args.text);
            checkin.save_draft(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Draft saved", style("✓").green());
            }
            Ok(())
        }
        WeeklyCommands::Remove(args) => {
            let mut checkin = WeeklyCheckIn::load(&store);
            checkin.remove_item(args.list.into(), args.index);
            checkin.save_draft(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Draft saved", style("✓").green());
            }
            Ok(())
        }
        WeeklyCommands::Submit => {
            let mut checkin = WeeklyCheckIn::load(&store);
            let week = checkin.draft().week.clone();
            checkin.submit(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!(
                    "{} Check-in for {} submitted",
                    style("✓").green(),
                    style(week).cyan()
                );
            }
            Ok(())
        }
        WeeklyCommands::History => {
            let history = WeeklyCheckIn::history(&store);
            if history.is_empty() {
                println!("No check-ins submitted yet.");
                return Ok(());
            }
            if global.format == OutputFormat::Json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&history).into_diagnostic()?
                );
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["WEEK", "GOALS", "WINS", "BLOCKERS", "FIRST WIN"]);
            for entry in &history {
                let filled = |items: &Vec<String>| {
                    items.iter().filter(|i| !i.is_empty()).count().to_string()
                };
                let first_win = entry
                    .wins
                    .iter()
                    .find(|w| !w.is_empty())
                    .map(|w| truncate_str(w, 40))
                    .unwrap_or_else(|| "-".to_string());
                builder.push_record([
                    entry.week.clone(),
                    filled(&entry.goals),
                    filled(&entry.wins),
                    filled(&entry.blockers),
                    first_win,
                ]);
            }
            println!("{}", builder.build().with(Style::sharp()));
            Ok(())
        }
    }
}
