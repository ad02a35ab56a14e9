//! `tremitibot prompt`: print what would be sent for a message, without sending it.

use super::runtime;
use tremitibot_bot::{PromptAssembler, PromptBundle, dates, to_turns};

pub async fn run(message: &str, show_turns: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config()?;
    let classifier = runtime::classifier(&config)?;
    let assembler = PromptAssembler::new(runtime::load_store(&config));

    let category = classifier.classify(message).await;
    let bundle = PromptBundle {
        system_instructions: assembler.build_instructions(category, dates::today_local()),
        turns: to_turns(&[], message),
    };

    eprintln!(
        "  category: {}",
        category.map(|c| c.key()).unwrap_or("nessuna")
    );
    println!("{}", bundle.system_instructions);

    if show_turns {
        println!();
        println!("{}", serde_json::to_string_pretty(&bundle.turns)?);
    }

    Ok(())
}
