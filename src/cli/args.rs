//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::catalog::Role;
use crate::cli::commands::{
    assess::AssessCommands,
    coach::CoachCommands,
    completions::CompletionsArgs,
    dashboard::DashboardArgs,
    init::InitArgs,
    quarterly::QuarterlyCommands,
    settings::SettingsCommands,
    weekly::WeeklyCommands,
};

#[derive(Parser)]
#[command(name = "trellis")]
#[command(author, version, about = "Trellis Career Toolkit")]
#[command(
    long_about = "A local-first toolkit for tracking design career growth: competency worksheets, weekly and quarterly check-ins, and a coach to talk it through with. Everything stays in plain files under .trellis/."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .trellis/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new trellis workspace
    Init(InitArgs),

    /// Competency worksheet (rate yourself, track evidence, export)
    #[command(subcommand)]
    Assess(AssessCommands),

    /// Weekly check-in
    #[command(subcommand)]
    Weekly(WeeklyCommands),

    /// Quarterly review
    #[command(subcommand)]
    Quarterly(QuarterlyCommands),

    /// Talk to a career coach
    #[command(subcommand)]
    Coach(CoachCommands),

    /// Show progress across worksheets and check-ins
    Dashboard(DashboardArgs),

    /// View or change account settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically pick based on the command
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON (for programming)
    Json,
    /// CSV (for spreadsheets)
    Csv,
}

/// Worksheet track selector
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleArg {
    Ic,
    Manager,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Ic => Role::Ic,
            RoleArg::Manager => Role::Manager,
        }
    }
}
