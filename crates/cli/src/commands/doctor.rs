//! `tremitibot doctor`: diagnose configuration, credentials and datasets.

use tremitibot_config::AppConfig;
use tremitibot_knowledge::{DataSource, Dataset, DirectorySource};

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 TremitiBot Doctor: System Diagnostics");
    println!("=========================================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file, using defaults (run `tremitibot onboard`)");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");
            config
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            println!("\n  ⚠️  1 issue found. Fix the configuration first.");
            return Ok(());
        }
    };

    if config.has_api_key() {
        println!("  ✅ API key configured ({})", config.provider.kind);
        match tremitibot_providers::build_from_config(&config) {
            Ok(provider) => match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider reachable"),
                Ok(false) => {
                    println!("  ⚠️  Provider answered but reported unhealthy");
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Provider check failed: {e}");
                    issues += 1;
                }
            },
            Err(e) => {
                println!("  ❌ Provider not usable: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ❌ No API key: set TREMITIBOT_API_KEY or api_key in config.toml");
        issues += 1;
    }

    println!("  ℹ️  Classifier strategy: {}", config.classifier.strategy);

    let source = DirectorySource::new(&config.data_dir);
    println!("\n  Datasets in {}:", source.describe());
    for dataset in Dataset::ALL {
        match source.load(dataset) {
            Ok(_) => println!("  ✅ {}", dataset.file_name()),
            Err(e) if dataset.is_optional() => println!("  ➖ {} (optional): {e}", dataset.file_name()),
            Err(e) => {
                println!("  ❌ {e}");
                issues += 1;
            }
        }
    }

    if let Some(path) = config.transcript.path.as_ref().filter(|_| config.transcript.enabled) {
        println!("\n  ℹ️  Transcript: {}", path.display());
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
