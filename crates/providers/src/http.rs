//! Shared HTTP plumbing for the providers.

use std::time::Duration;
use tremitibot_core::error::ProviderError;
use tracing::warn;

/// Build a client with a request timeout, falling back to the default client.
pub(crate) fn client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// Map a transport failure.
pub(crate) fn send_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(e.to_string())
    } else {
        ProviderError::Network(e.to_string())
    }
}

/// Turn a non-200 response into a provider error. `Ok(response)` on 200.
pub(crate) async fn check_status(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();

    if status == 429 {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);
        return Err(ProviderError::RateLimited { retry_after_secs });
    }
    if status == 401 || status == 403 {
        return Err(ProviderError::AuthenticationFailed(format!(
            "{provider} rejected the API key (HTTP {status})"
        )));
    }
    if status != 200 {
        let body = response.text().await.unwrap_or_default();
        warn!(provider, status, body = %body, "Provider returned error");
        return Err(ProviderError::ApiError {
            status_code: status,
            message: body,
        });
    }

    Ok(response)
}
