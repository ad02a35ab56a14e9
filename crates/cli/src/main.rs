//! TremitiBot CLI: the main entry point.
//!
//! Commands:
//! - `ask`      Answer a single question
//! - `chat`     Interactive conversation with history
//! - `classify` Show the category a message maps to
//! - `prompt`   Print the instruction block for a message
//! - `doctor`   Diagnose configuration and datasets
//! - `links`    Add deep links to a JSON dataset file
//! - `onboard`  Write the default configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "tremitibot",
    about = "TremitiBot: travel assistant for the Tremiti Islands",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        /// The question
        message: String,

        /// Print the reply as JSON
        #[arg(long)]
        json: bool,
    },

    /// Chat interactively, keeping the conversation history
    Chat,

    /// Show which category a message is classified as
    Classify {
        message: String,
    },

    /// Print the system instructions that would be sent for a message
    Prompt {
        message: String,

        /// Also print the turn sequence as JSON
        #[arg(long)]
        turns: bool,
    },

    /// Diagnose configuration, credentials and datasets
    Doctor,

    /// Add a deep-link field to every object with an id
    Links {
        /// Input JSON file
        input: PathBuf,

        /// Output file (default: <input>_processed.json)
        output: Option<PathBuf>,

        /// Link prefix (default: from config)
        prefix: Option<String>,
    },

    /// Write the default configuration file
    Onboard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask { message, json } => commands::ask::run(&message, json).await?,
        Commands::Chat => commands::chat::run().await?,
        Commands::Classify { message } => commands::classify::run(&message).await?,
        Commands::Prompt { message, turns } => commands::prompt::run(&message, turns).await?,
        Commands::Doctor => commands::doctor::run().await?,
        Commands::Links {
            input,
            output,
            prefix,
        } => commands::links::run(&input, output, prefix)?,
        Commands::Onboard => commands::onboard::run()?,
    }

    Ok(())
}
