//! `tremitibot classify`: show the category for a message.

use super::runtime;
use tremitibot_knowledge::labels_for;

pub async fn run(message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = runtime::load_config()?;
    let classifier = runtime::classifier(&config)?;

    match classifier.classify(message).await {
        Some(category) => {
            println!("{}", category.key());
            let labels = labels_for(category.key());
            if labels != [category.key()] {
                println!("  labels: {}", labels.join(", "));
            }
        }
        None => println!("nessuna"),
    }

    Ok(())
}
