//! `trellis init` command - create a new workspace

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::workspace::{Workspace, WorkspaceError};

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
    }

    match Workspace::init(&path) {
        Ok(ws) => {
            println!(
                "{} Initialized trellis workspace at {}",
                style("✓").green(),
                style(ws.root().display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  {} Rate yourself on a competency",
                style("trellis assess list").yellow()
            );
            println!(
                "  {} Start this week's check-in",
                style("trellis weekly show").yellow()
            );
            println!(
                "  {} Talk through your goals",
                style("trellis coach chat").yellow()
            );
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(path)) => {
            println!(
                "{} trellis workspace already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
