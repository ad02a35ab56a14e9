//! `tremitibot ask`: answer one question and exit.

use super::runtime;
use tremitibot_bot::{BotReply, TranscriptOutcome};

pub async fn run(message: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config()?;
    let bot = runtime::build_bot(&config)?;

    if !json {
        eprint!("  Thinking...");
    }
    let outcome = bot.dispatch(message, &[]).await;
    if !json {
        eprint!("\r              \r");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.reply)?);
    } else {
        match &outcome.reply {
            BotReply::Success { message, usage } => {
                println!("{message}");
                tracing::debug!(
                    category = outcome.category.map(|c| c.key()).unwrap_or("nessuna"),
                    input_tokens = usage.input_tokens,
                    output_tokens = usage.output_tokens,
                    "Answered"
                );
            }
            BotReply::Failed { error, fallback_message } => {
                eprintln!("  [Error] {error}");
                println!("{fallback_message}");
            }
        }
    }

    // the process is about to exit, so wait for the record to land
    if let TranscriptOutcome::Failed(reason) = outcome.transcript.settle().await {
        eprintln!("  [Transcript] {reason}");
    }
    bot.shutdown().await?;

    Ok(())
}
