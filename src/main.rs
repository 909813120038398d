use clap::Parser;
use miette::Result;
use trellis::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    match cli.command {
        Commands::Init(args) => trellis::cli::commands::init::run(args),
        Commands::Assess(cmd) => trellis::cli::commands::assess::run(cmd, &global),
        Commands::Weekly(cmd) => trellis::cli::commands::weekly::run(cmd, &global),
        Commands::Quarterly(cmd) => trellis::cli::commands::quarterly::run(cmd, &global),
        Commands::Coach(cmd) => trellis::cli::commands::coach::run(cmd, &global),
        Commands::Dashboard(args) => trellis::cli::commands::dashboard::run(args, &global),
        Commands::Settings(cmd) => trellis::cli::commands::settings::run(cmd, &global),
        Commands::Completions(args) => trellis::cli::commands::completions::run(args),
    }
}
