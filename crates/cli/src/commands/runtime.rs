//! Wiring shared by the commands: config, knowledge store, provider, bot.

use std::error::Error;
use std::sync::Arc;
use tremitibot_bot::{BotFacade, Classifier, JsonlTranscript, KeywordClassifier, build_classifier};
use tremitibot_config::{AppConfig, ClassifierStrategy};
use tremitibot_core::Provider;
use tremitibot_knowledge::{DirectorySource, KnowledgeOptions, KnowledgeStore};

pub fn load_config() -> Result<AppConfig, Box<dyn Error>> {
    Ok(AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?)
}

pub fn knowledge_options(config: &AppConfig) -> KnowledgeOptions {
    KnowledgeOptions {
        annotate_links: config.knowledge.annotate_links,
        link_base_url: config.knowledge.link_base_url.clone(),
        link_prefix: config.knowledge.link_prefix.clone(),
    }
}

pub fn load_store(config: &AppConfig) -> Arc<KnowledgeStore> {
    let source = DirectorySource::new(&config.data_dir);
    Arc::new(KnowledgeStore::load(&source, &knowledge_options(config)))
}

/// Build the provider, printing setup help when no key is configured.
pub fn provider(config: &AppConfig) -> Result<Arc<dyn Provider>, Box<dyn Error>> {
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    TREMITIBOT_API_KEY=sk-ant-...");
        eprintln!("    ANTHROPIC_API_KEY=sk-ant-...");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }
    Ok(tremitibot_providers::build_from_config(config)?)
}

/// The configured classifier. The keyword strategy needs no credentials.
pub fn classifier(config: &AppConfig) -> Result<Arc<dyn Classifier>, Box<dyn Error>> {
    match config.classifier.strategy {
        ClassifierStrategy::Keyword => Ok(Arc::new(KeywordClassifier::new())),
        ClassifierStrategy::Model => Ok(build_classifier(&config.classifier, provider(config)?)),
    }
}

pub fn build_bot(config: &AppConfig) -> Result<BotFacade, Box<dyn Error>> {
    let provider = provider(config)?;
    let classifier = build_classifier(&config.classifier, provider.clone());
    let mut bot = BotFacade::new(load_store(config), provider, classifier, config.model.parameters());

    if config.transcript.enabled {
        if let Some(path) = &config.transcript.path {
            let sink = JsonlTranscript::new(path).with_create_dirs(config.transcript.create_dirs);
            bot = bot.with_transcript(Arc::new(sink));
        }
    }

    Ok(bot)
}
