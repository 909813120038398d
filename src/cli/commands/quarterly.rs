//! `trellis quarterly` commands - the quarterly review

use clap::{Subcommand, ValueEnum};
use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::checkin::{QuarterlyCheckIn, QuarterlyList};
use crate::cli::args::OutputFormat;
use crate::cli::helpers::open_store;
use crate::cli::GlobalOpts;

#[derive(Subcommand)]
pub enum QuarterlyCommands {
    /// Show the current quarter's draft
    Show,

    /// Add an item to one of the review lists
    Add(AddArgs),

    /// Remove an item by index
    Remove(RemoveArgs),

    /// Set the free-form self reflection
    Reflect(ReflectArgs),

    /// Rate the quarter overall (1-5)
    Rate(RateArgs),

    /// Finalize the draft into your review history
    Submit,

    /// List submitted reviews
    History,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum QuarterlyListArg {
    Achievement,
    Challenge,
    Learning,
    Feedback,
    Goal,
}

impl From<QuarterlyListArg> for QuarterlyList {
    fn from(arg: QuarterlyListArg) -> Self {
        match arg {
            QuarterlyListArg::Achievement => QuarterlyList::Achievements,
            QuarterlyListArg::Challenge => QuarterlyList::Challenges,
            QuarterlyListArg::Learning => QuarterlyList::Learnings,
            QuarterlyListArg::Feedback => QuarterlyList::FeedbackReceived,
            QuarterlyListArg::Goal => QuarterlyList::NextQuarterGoals,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    #[arg(value_enum)]
    pub list: QuarterlyListArg,

    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    #[arg(value_enum)]
    pub list: QuarterlyListArg,

    /// Zero-based index shown by `trellis quarterly show`
    pub index: usize,
}

#[derive(clap::Args, Debug)]
pub struct ReflectArgs {
    pub text: String,
}

#[derive(clap::Args, Debug)]
pub struct RateArgs {
    pub rating: u8,
}

pub fn run(cmd: QuarterlyCommands, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    match cmd {
        QuarterlyCommands::Show => {
            let review = QuarterlyCheckIn::load(&store);
            let draft = review.draft();
            println!(
                "{} {} {}",
                style("Quarter").bold(),
                style(&draft.quarter).cyan(),
                draft.year
            );
            println!();
            for (name, items) in draft.lists() {
                println!("{}", style(name.replace('_', " ")).bold());
                for (i, item) in items.iter().enumerate() {
                    let text = if item.is_empty() { "-" } else { item.as_str() };
                    println!("  [{}] {}", i, text);
                }
            }
            println!();
            println!("{}", style("self reflection").bold());
            let reflection = if draft.self_reflection.is_empty() {
                "-"
            } else {
                &draft.self_reflection
            };
            println!("  {}", reflection);
            let rating = if draft.overall_rating == 0 {
                "not rated".to_string()
            } else {
                format!("{}/5", draft.overall_rating)
            };
            println!("{} {}", style("overall").bold(), rating);
            Ok(())
        }
        QuarterlyCommands::Add(args) => {
            let mut review = QuarterlyCheckIn::load(&store);
            review.push_item(args.list.into(), args.text);
            review.save_draft(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Draft saved", style("✓").green());
            }
            Ok(())
        }
        QuarterlyCommands::Remove(args) => {
            let mut review = QuarterlyCheckIn::load(&store);
            review.remove_item(args.list.into(), args.index);
            review.save_draft(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Draft saved", style("✓").green());
            }
            Ok(())
        }
        QuarterlyCommands::Reflect(args) => {
            let mut review = QuarterlyCheckIn::load(&store);
            review.set_reflection(args.text);
            review.save_draft(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Draft saved", style("✓").green());
            }
            Ok(())
        }
        QuarterlyCommands::Rate(args) => {
            let mut review = QuarterlyCheckIn::load(&store);
            review
                .set_rating(args.rating)
                .map_err(|e| miette::miette!("{}", e))?;
            review.save_draft(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Draft saved", style("✓").green());
            }
            Ok(())
        }
        QuarterlyCommands::Submit => {
            let mut review = QuarterlyCheckIn::load(&store);
            let label = format!("{} {}", review.draft().quarter, review.draft().year);
            review.submit(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!(
                    "{} Review for {} submitted",
                    style("✓").green(),
                    style(label).cyan()
                );
            }
            Ok(())
        }
        QuarterlyCommands::History => {
            let history = QuarterlyCheckIn::history(&store);
            if history.is_empty() {
                println!("No reviews submitted yet.");
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
            builder.push_record(["QUARTER", "YEAR", "ACHIEVEMENTS", "RATING"]);
            for review in &history {
                let achievements = review
                    .achievements
                    .iter()
                    .filter(|a| !a.is_empty())
                    .count();
                let rating = if review.overall_rating == 0 {
                    "-".to_string()
                } else {
                    format!("{}/5", review.overall_rating)
                };
                builder.push_record([
                    review.quarter.clone(),
                    review.year.to_string(),
                    achievements.to_string(),
                    rating,
                ]);
            }
            println!("{}", builder.build().with(Style::sharp()));
            Ok(())
        }
    }
}
