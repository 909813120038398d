//! `trellis coach` commands - talk to a career coach

use clap::Subcommand;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use rand::Rng;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{open_store, truncate_str};
use crate::cli::GlobalOpts;
use crate::coach::{persona, personas, ChatSession};
use crate::core::speech::Speech;
use crate::core::store::{Store, StoreKey};
use crate::entities::chat::ChatRole;
use crate::entities::profile::Preferences;

#[derive(Subcommand)]
pub enum CoachCommands {
    /// Interactive conversation
    Chat(ChatArgs),

    /// Send one message and print the reply
    Send(SendArgs),

    /// Archive the current conversation and start fresh
    New,

    /// List saved conversations
    List,

    /// Resume a saved conversation
    Load(LoadArgs),

    /// Delete a saved conversation
    Delete(DeleteArgs),

    /// Show the available coach personas
    Personas,
}

#[derive(clap::Args, Debug)]
pub struct ChatArgs {
    /// Coach persona for this session
    #[arg(long)]
    pub persona: Option<String>,

    /// Speak replies aloud if a synthesizer is installed
    #[arg(long)]
    pub speak: bool,
}

#[derive(clap::Args, Debug)]
pub struct SendArgs {
    pub message: String,

    #[arg(long)]
    pub persona: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct LoadArgs {
    /// Conversation id from `trellis coach list`
    pub id: String,
}

#[derive(clap::Args, Debug)]
pub struct DeleteArgs {
    pub id: String,
}

fn active_persona(flag: Option<String>, store: &Store) -> String {
    flag.unwrap_or_else(|| {
        store
            .load::<Preferences>(StoreKey::Preferences)
            .map(|p| p.persona)
            .unwrap_or_else(|| "liz".to_string())
    })
}

/// A short pause before each reply, so the exchange reads like a
/// conversation instead of a lookup
fn thinking_pause() {
    let millis = rand::rng().random_range(1000..3000);
    std::thread::sleep(std::time::Duration::from_millis(millis));
}

fn print_reply(name: &str, avatar: &str, content: &str) {
    println!("{} {} {}", avatar, style(name).bold().cyan(), content);
}

pub fn run(cmd: CoachCommands, global: &GlobalOpts) -> Result<()> {
    let store = open_store(global)?;
    match cmd {
        CoachCommands::Chat(args) => chat(args, &store),
        CoachCommands::Send(args) => {
            let persona_id = active_persona(args.persona, &store);
            let voice = persona(&persona_id).map_err(|e| miette::miette!("{}", e))?;
            let mut session = ChatSession::load(&store, persona_id);
            let reply = session
                .send(&store, args.message)
                .map_err(|e| miette::miette!("{}", e))?;
            print_reply(voice.name, voice.avatar, &reply.content);
            Ok(())
        }
        CoachCommands::New => {
            let persona_id = active_persona(None, &store);
            let mut session = ChatSession::load(&store, persona_id);
            let had_messages = !session.messages().is_empty();
            session.new_chat(&store).map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                if had_messages {
                    println!("{} Conversation archived; starting fresh", style("✓").green());
                } else {
                    println!("{} Starting fresh", style("✓").green());
                }
            }
            Ok(())
        }
        CoachCommands::List => {
            let histories = ChatSession::histories(&store);
            if histories.is_empty() {
                println!("No saved conversations.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(["ID", "TITLE", "MESSAGES", "LAST"]);
            for history in &histories {
                builder.push_record([
                    history.id.clone(),
                    truncate_str(&history.title, 40),
                    history.messages.len().to_string(),
                    history.last_message.format("%Y-%m-%d").to_string(),
                ]);
            }
            println!("{}", builder.build().with(Style::sharp()));
            Ok(())
        }
        CoachCommands::Load(args) => {
            let persona_id = active_persona(None, &store);
            let mut session = ChatSession::load(&store, persona_id);
            session
                .load_history(&store, &args.id)
                .map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!(
                    "{} Resumed conversation with {} message(s)",
                    style("✓").green(),
                    session.messages().len()
                );
            }
            Ok(())
        }
        CoachCommands::Delete(args) => {
            let persona_id = active_persona(None, &store);
            let mut session = ChatSession::load(&store, persona_id);
            session
                .delete_history(&store, &args.id)
                .map_err(|e| miette::miette!("{}", e))?;
            if !global.quiet {
                println!("{} Conversation deleted", style("✓").green());
            }
            Ok(())
        }
        CoachCommands::Personas => {
            for p in personas() {
                println!(
                    "{} {}  {}",
                    p.avatar,
                    style(p.id).cyan().bold(),
                    p.description
                );
            }
            Ok(())
        }
    }
}

fn chat(args: ChatArgs, store: &Store) -> Result<()> {
    let persona_id = active_persona(args.persona, store);
    let voice = persona(&persona_id).map_err(|e| miette::miette!("{}", e))?;
    let mut session = ChatSession::load(store, persona_id);

    let speech = if args.speak {
        let detected = Speech::detect();
        if detected.is_none() {
            println!(
                "{} No speech synthesizer found; continuing silently",
                style("!").yellow()
            );
        }
        detected
    } else {
        None
    };

    println!(
        "Chatting with {} {} ({}). Type {} to finish.",
        voice.avatar,
        style(voice.name).bold().cyan(),
        voice.description,
        style("/quit").yellow()
    );
    for msg in session.messages() {
        match msg.role {
            ChatRole::User => println!("{} {}", style("you").bold(), msg.content),
            ChatRole::Assistant => print_reply(voice.name, voice.avatar, &msg.content),
        }
    }

    let theme = ColorfulTheme::default();
    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
            .into_diagnostic()?;
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }

        thinking_pause();
        let reply = session
            .send(store, line)
            .map_err(|e| miette::miette!("{}", e))?;
        let content = reply.content.clone();
        print_reply(voice.name, voice.avatar, &content);
        if let Some(speech) = &speech {
            speech.speak(&content);
        }
    }
    Ok(())
}
