//! `trellis assess` commands - the competency worksheet

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::catalog::{self, GradeTier, Role, Theme};
use crate::cli::args::{OutputFormat, RoleArg};
use crate::cli::helpers::{open_store, record_progress_updates, resolve_role, truncate_str};
use crate::cli::GlobalOpts;
use crate::core::events::EventBus;
use crate::core::store::Store;
use crate::synth;
use crate::worksheet::{export_csv, Worksheet};

#[derive(Subcommand)]
pub enum AssessCommands {
    /// List competencies with your ratings and grade expectations
    List(ListArgs),

    /// Show one competency in full, including level evidence
    Show(ShowArgs),

    /// Rate yourself on a competency
    Rate(RateArgs),

    /// Record (or synthesize) evidence for a competency level
    Evidence(EvidenceArgs),

    /// View or change the grade tier expectations are computed against
    Grade(GradeArgs),

    /// Show worksheet completion percentage
    Progress(ProgressArgs),

    /// Export the competency framework as CSV
    Export(ExportArgs),

    /// Walk the worksheet interactively
    Edit(EditArgs),
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Worksheet track (default: your configured role)
    #[arg(long)]
    pub role: Option<RoleArg>,

    /// Only show competencies in this theme
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Competency id (e.g. craft, user-centered-design)
    pub id: String,

    #[arg(long)]
    pub role: Option<RoleArg>,
}

#[derive(clap::Args, Debug)]
pub struct RateArgs {
    /// Competency id
    pub id: String,

    /// Level on the competency's own scale
    pub level: u8,

    #[arg(long)]
    pub role: Option<RoleArg>,
}

#[derive(clap::Args, Debug)]
pub struct EvidenceArgs {
    /// Competency id
    pub id: String,

    /// Level the evidence demonstrates (default: the scale's first level)
    #[arg(long)]
    pub level: Option<u8>,

    /// Evidence text; omit with --draft to synthesize from your notes
    pub text: Option<String>,

    /// Draft the evidence from check-ins and coach conversations
    #[arg(long)]
    pub draft: bool,

    #[arg(long)]
    pub role: Option<RoleArg>,
}

#[derive(clap::Args, Debug)]
pub struct GradeArgs {
    /// New grade tier (G5..G11); omit to show the current one
    pub tier: Option<String>,

    #[arg(long)]
    pub role: Option<RoleArg>,
}

#[derive(clap::Args, Debug)]
pub struct ProgressArgs {
    #[arg(long)]
    pub role: Option<RoleArg>,
}

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Write to a file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<std::path::PathBuf>,

    #[arg(long)]
    pub role: Option<RoleArg>,
}

#[derive(clap::Args, Debug)]
pub struct EditArgs {
    #[arg(long)]
    pub role: Option<RoleArg>,
}

pub fn run(cmd: AssessCommands, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    match cmd {
        AssessCommands::List(args) => list(args, &store, global),
        AssessCommands::Show(args) => show(args, &store),
        AssessCommands::Rate(args) => rate(args, &store, global),
        AssessCommands::Evidence(args) => evidence(args, &store, global),
        AssessCommands::Grade(args) => grade(args, &store, global),
        AssessCommands::Progress(args) => progress(args, &store),
        AssessCommands::Export(args) => export(args, &store),
        AssessCommands::Edit(args) => edit(args, &store, global),
    }
}

fn commit(ws: &mut Worksheet, store: &Store) -> Result<()> {
    let bus = EventBus::new();
    record_progress_updates(&bus, store);
    ws.commit(store, &bus).map_err(|e| miette::miette!("{}", e))
}

fn list(args: ListArgs, store: &Store, global: &GlobalOpts) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let theme: Option<Theme> = match &args.theme {
        Some(t) => Some(t.parse().map_err(|e: String| miette::miette!("{}", e))?),
        None => None,
    };

    let mut ws = Worksheet::load(store, role);
    commit(&mut ws, store)?;

    let entries: Vec<_> = ws
        .entries()
        .into_iter()
        .filter(|(c, _)| theme.map_or(true, |t| c.theme == t))
        .collect();

    match global.format {
        OutputFormat::Json => {
            let rows: Vec<serde_json::Value> = entries
                .iter()
                .map(|(c, a)| {
                    serde_json::json!({
                        "id": c.id,
                        "name": c.name,
                        "theme": c.theme.as_str(),
                        "pillar": c.pillar,
                        "self_assessment": a.self_assessment,
                        "grade_expectation": a.grade_expectation,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).into_diagnostic()?
            );
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if global.format == OutputFormat::Csv { "," } else { "\t" };
            for (c, a) in &entries {
                println!(
                    "{}{sep}{}{sep}{}{sep}{}",
                    c.id, c.theme, a.self_assessment, a.grade_expectation
                );
            }
        }
        OutputFormat::Auto => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "COMPETENCY", "THEME", "SELF", "EXPECTED"]);
            for (c, a) in &entries {
                let self_cell = if a.is_rated() {
                    format!("{} ({})", c.assessment_type.label(a.self_assessment), a.self_assessment)
                } else {
                    "-".to_string()
                };
                builder.push_record([
                    c.id.to_string(),
                    truncate_str(c.name, 30),
                    c.theme.to_string(),
                    self_cell,
                    format!(
                        "{} ({})",
                        c.assessment_type.label(a.grade_expectation),
                        a.grade_expectation
                    ),
                ]);
            }
            println!("{}", builder.build().with(Style::sharp()));
            if !global.quiet {
                println!();
                println!(
                    "{} worksheet, grade {}, {}% complete",
                    role,
                    style(ws.grade()).cyan(),
                    style(ws.progress_percentage()).cyan()
                );
            }
        }
    }
    Ok(())
}

fn show(args: ShowArgs, store: &Store) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let ws = Worksheet::load(store, role);

    let comp = catalog::all_competencies(role)
        .into_iter()
        .find(|c| c.id == args.id)
        .ok_or_else(|| miette::miette!("unknown competency '{}'", args.id))?;
    let assessment = ws
        .assessment(&args.id)
        .ok_or_else(|| miette::miette!("no assessment recorded for '{}'", args.id))?;

    println!("{}", style(comp.name).bold());
    println!("{}", style(comp.description).dim());
    println!();
    println!("  theme:    {} / {}", comp.theme, comp.pillar);
    println!(
        "  self:     {} ({})",
        comp.assessment_type.label(assessment.self_assessment),
        assessment.self_assessment
    );
    println!(
        "  expected: {} ({}) at grade {}",
        comp.assessment_type.label(assessment.grade_expectation),
        assessment.grade_expectation,
        ws.grade()
    );
    println!();
    println!("Levels:");
    for &(level, desc) in comp.levels {
        let marker = if assessment.self_assessment == level {
            style("●").cyan()
        } else {
            style("○").dim()
        };
        println!(
            "  {} {} {} - {}",
            marker,
            style(comp.assessment_type.label(level)).bold(),
            style(format!("({})", level)).dim(),
            desc
        );
        if let Some(evidence) = assessment.level_demonstrated_by.get(&level) {
            println!("      {}", style(evidence).italic());
        }
    }
    Ok(())
}

fn rate(args: RateArgs, store: &Store, global: &GlobalOpts) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let comp = catalog::competency(&args.id)
        .ok_or_else(|| miette::miette!("unknown competency '{}'", args.id))?;
    let mut ws = Worksheet::load(store, role);
    ws.rate(&args.id, args.level)
        .map_err(|e| miette::miette!("{}", e))?;
    commit(&mut ws, store)?;

    if !global.quiet {
        println!(
            "{} {} rated {} ({}); worksheet {}% complete",
            style("✓").green(),
            comp.name,
            style(comp.assessment_type.label(args.level)).cyan(),
            args.level,
            ws.progress_percentage()
        );
    }
    Ok(())
}

fn evidence(args: EvidenceArgs, store: &Store, global: &GlobalOpts) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let comp = catalog::competency(&args.id)
        .ok_or_else(|| miette::miette!("unknown competency '{}'", args.id))?;
    let level = args.level.unwrap_or_else(|| comp.assessment_type.first_level());

    let text = match (&args.text, args.draft) {
        (Some(text), false) => text.clone(),
        (None, true) => synth::synthesize(store, &args.id).map_err(|e| miette::miette!("{}", e))?,
        _ => {
            return Err(miette::miette!(
                "provide evidence text, or pass --draft to synthesize it"
            ))
        }
    };

    let mut ws = Worksheet::load(store, role);
    ws.set_evidence(&args.id, level, text.clone())
        .map_err(|e| miette::miette!("{}", e))?;
    commit(&mut ws, store)?;

    if !global.quiet {
        println!(
            "{} Evidence recorded for {} at level {}:",
            style("✓").green(),
            comp.name,
            level
        );
        println!("  {}", style(&text).italic());
    }
    Ok(())
}

fn grade(args: GradeArgs, store: &Store, global: &GlobalOpts) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let mut ws = Worksheet::load(store, role);

    match args.tier {
        None => {
            println!("{}", ws.grade());
            Ok(())
        }
        Some(tier) => {
            let grade: GradeTier = tier.parse().map_err(|e: String| miette::miette!("{}", e))?;
            ws.change_grade(grade);
            commit(&mut ws, store)?;
            if !global.quiet {
                println!(
                    "{} {} worksheet expectations now computed for grade {}",
                    style("✓").green(),
                    role,
                    style(grade).cyan()
                );
            }
            Ok(())
        }
    }
}

fn progress(args: ProgressArgs, store: &Store) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let ws = Worksheet::load(store, role);
    println!("{}%", ws.progress_percentage());
    Ok(())
}

fn export(args: ExportArgs, store: &Store) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let csv_text = export_csv(role).map_err(|e| miette::miette!("{}", e))?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &csv_text).into_diagnostic()?;
            println!(
                "{} Exported {} framework to {}",
                style("✓").green(),
                role,
                style(path.display()).cyan()
            );
        }
        None => print!("{}", csv_text),
    }
    Ok(())
}

/// Interactive walk: one competency is expanded at a time; picking it
/// again collapses it, picking another moves the focus
fn edit(args: EditArgs, store: &Store, global: &GlobalOpts) -> Result<()> {
    let role = resolve_role(args.role.map(Role::from), store);
    let mut ws = Worksheet::load(store, role);
    let theme = ColorfulTheme::default();

    loop {
        let (items, ids) = {
            let entries = ws.entries();
            let mut items: Vec<String> = entries
                .iter()
                .map(|(c, a)| {
                    let marker = if ws.selected() == Some(c.id) { "▾" } else { "▸" };
                    let rating = if a.is_rated() {
                        format!("{} ({})", c.assessment_type.label(a.self_assessment), a.self_assessment)
                    } else {
                        "unrated".to_string()
                    };
                    format!("{} {} [{}]", marker, c.name, rating)
                })
                .collect();
            items.push("Done".to_string());
            let ids: Vec<&'static str> = entries.iter().map(|(c, _)| c.id).collect();
            (items, ids)
        };

        let choice = Select::with_theme(&theme)
            .with_prompt(format!(
                "{} worksheet ({}% complete)",
                role,
                ws.progress_percentage()
            ))
            .items(&items)
            .default(0)
            .interact()
            .into_diagnostic()?;

        if choice == ids.len() {
            break;
        }

        let id = ids[choice];
        let comp = match catalog::competency(id) {
            Some(comp) => comp,
            None => continue,
        };
        ws.select(id).map_err(|e| miette::miette!("{}", e))?;
        if ws.selected().is_none() {
            continue;
        }

        let domain = comp.assessment_type.domain();
        let levels: Vec<String> = domain
            .iter()
            .map(|&l| format!("{} ({})", comp.assessment_type.label(l), l))
            .collect();
        let picked = Select::with_theme(&theme)
            .with_prompt(format!("Rate yourself on {}", comp.name))
            .items(&levels)
            .default(0)
            .interact()
            .into_diagnostic()?;
        ws.rate(id, domain[picked])
            .map_err(|e| miette::miette!("{}", e))?;

        let evidence: String = Input::with_theme(&theme)
            .with_prompt("Evidence (enter to skip)")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        if !evidence.is_empty() {
            ws.set_evidence(id, domain[picked], evidence)
                .map_err(|e| miette::miette!("{}", e))?;
        }

        // Collapse before moving on
        ws.select(id).map_err(|e| miette::miette!("{}", e))?;
    }

    commit(&mut ws, store)?;
    if !global.quiet {
        println!(
            "{} Worksheet saved; {}% complete",
            style("✓").green(),
            ws.progress_percentage()
        );
    }
    Ok(())
}
