//! Provider selection from configuration.

use crate::anthropic::AnthropicProvider;
use crate::openai_compat::OpenAiCompatProvider;
use std::sync::Arc;
use tracing::info;
use tremitibot_core::error::ProviderError;
use tremitibot_core::provider::Provider;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Build the configured provider.
///
/// Fails with `NotConfigured` when no API key is available or the kind is
/// unknown.
pub fn build_from_config(
    config: &tremitibot_config::AppConfig,
) -> Result<Arc<dyn Provider>, ProviderError> {
    let kind = config.provider.kind.trim().to_lowercase();

    let api_key = config
        .resolved_api_key()
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "no API key for provider '{kind}' (set api_key or TREMITIBOT_API_KEY)"
            ))
        })?;

    let provider: Arc<dyn Provider> = match kind.as_str() {
        "anthropic" => {
            let mut p = AnthropicProvider::new(api_key);
            if let Some(url) = &config.provider.api_url {
                p = p.with_base_url(url);
            }
            Arc::new(p)
        }
        "openai" | "openai-compatible" => {
            let base_url = config
                .provider
                .api_url
                .clone()
                .unwrap_or_else(|| OPENAI_BASE_URL.into());
            Arc::new(OpenAiCompatProvider::new(kind.as_str(), base_url, api_key))
        }
        other => {
            return Err(ProviderError::NotConfigured(format!(
                "unknown provider kind '{other}' (expected 'anthropic', 'openai' or 'openai-compatible')"
            )));
        }
    };

    info!(provider = %provider.name(), "Provider ready");
    Ok(provider)
}
