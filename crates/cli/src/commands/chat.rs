//! `tremitibot chat`: interactive conversation.
//!
//! History is kept in memory for the session; only answered exchanges are
//! appended to it.

use super::runtime;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tremitibot_bot::BotReply;
use tremitibot_core::message::Turn;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config()?;
    let bot = runtime::build_bot(&config)?;
    let store = bot.assembler().selector().store();

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║        TremitiBot: Interactive Mode          ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Provider:    {}", config.provider.kind);
    println!("  Model:       {}", config.model.model_id);
    println!("  Classifier:  {}", bot.classifier().name());
    println!("  Datasets:    {} loaded from {}", store.len(), config.data_dir.display());
    let missing = store.missing();
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|d| d.file_name()).collect();
        println!("  Missing:     {}", names.join(", "));
    }
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type 'exit' or Ctrl+D to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history: Vec<Turn> = Vec::new();

    print!("  Tu > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            print!("  Tu > ");
            std::io::stdout().flush()?;
            continue;
        }

        eprint!("  ...");
        let reply = bot.send_message(input, &history).await;
        eprint!("\r     \r");
        println!();

        if let BotReply::Failed { error, .. } = &reply {
            eprintln!("  [Error] {error}");
        }
        for line in reply.display_text().lines() {
            println!("  TremitiBot > {line}");
        }
        if let BotReply::Success { message, .. } = &reply {
            history.push(Turn::user(input));
            history.push(Turn::assistant(message.as_str()));
        }
        println!();

        print!("  Tu > ");
        std::io::stdout().flush()?;
    }

    bot.shutdown().await?;

    println!();
    println!("  Arrivederci! 👋");
    println!();

    Ok(())
}
