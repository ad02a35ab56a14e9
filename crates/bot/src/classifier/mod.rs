//! Query classification.
//!
//! Two interchangeable strategies answer the same question: which category,
//! if any, does this message belong to?
//!
//! - [`KeywordClassifier`]: deterministic substring rules
//! - [`ModelClassifier`]: a short zero-shot call to the generation service
//!
//! Both honor the cove rule: a message mentioning "cala"/"cale" is always
//! [`Category::Coves`].

mod keyword;
mod model;

pub use keyword::KeywordClassifier;
pub use model::{CLASSIFICATION_PROMPT, ModelClassifier};

use async_trait::async_trait;
use std::sync::Arc;
use tremitibot_config::{ClassifierConfig, ClassifierStrategy};
use tremitibot_core::{Category, Provider};

/// Maps a raw user message to at most one category.
///
/// Implementations never fail: any internal error degrades to `None`.
#[async_trait]
pub trait Classifier: Send + Sync {
    fn name(&self) -> &str;

    async fn classify(&self, text: &str) -> Option<Category>;
}

/// True when the message names a cove. Wins over every other rule.
pub(crate) fn mentions_cove(lower: &str) -> bool {
    lower.contains("cala") || lower.contains("cale")
}

/// Build the configured strategy.
pub fn build_classifier(config: &ClassifierConfig, provider: Arc<dyn Provider>) -> Arc<dyn Classifier> {
    match config.strategy {
        ClassifierStrategy::Keyword => Arc::new(KeywordClassifier::new()),
        ClassifierStrategy::Model => Arc::new(ModelClassifier::new(provider, config.model.parameters())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ScriptedProvider;

    #[test]
    fn cove_detection() {
        assert!(mentions_cove("cala delle arene"));
        assert!(mentions_cove("le cale di san domino"));
        assert!(!mentions_cove("orari traghetti"));
    }

    #[test]
    fn builds_configured_strategy() {
        let provider: Arc<dyn Provider> = Arc::new(ScriptedProvider::texts(&[]));

        let keyword = build_classifier(&ClassifierConfig::default(), provider.clone());
        assert_eq!(keyword.name(), "keyword");

        let config = ClassifierConfig {
            strategy: ClassifierStrategy::Model,
            ..ClassifierConfig::default()
        };
        let model = build_classifier(&config, provider);
        assert_eq!(model.name(), "model");
    }
}
