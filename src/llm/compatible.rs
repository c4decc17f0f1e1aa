//! Completion client for OpenAI-compatible `/v1/chat/completions` endpoints.
//! Most hosted LLM APIs (OpenRouter, Chutes, Groq, DeepSeek, vLLM, ...) accept
//! this request shape, so a single implementation covers all of them.

use super::http_client::build_completion_client;
use super::scrub::sanitize_for_log;
use super::traits::{CompletionClient, CompletionFuture};
use super::types::{ChatRequest, ChatResponse, parse_error_message};
use crate::chat::{ChatSettings, Message};
use crate::error::CompletionError;
use reqwest::Client;
use tracing::{debug, warn};

pub struct HttpCompletionClient {
    client: Client,
}

impl HttpCompletionClient {
    pub fn new() -> Self {
        Self::with_client(build_completion_client())
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Perform the HTTP round trip. `Ok(None)` means zero choices.
    pub async fn request(
        &self,
        messages: &[Message],
        settings: &ChatSettings,
    ) -> Result<Option<String>, CompletionError> {
        let endpoint = parse_endpoint(&settings.endpoint)?;
        let request = ChatRequest::build(messages, settings);
        debug!(
            endpoint = %endpoint,
            model = %settings.model,
            messages = request.messages.len(),
            "sending completion request"
        );

        let mut builder = self.client.post(endpoint).json(&request);
        if settings.api_key.is_empty() {
            warn!("no API key configured; sending request without Authorization header");
        } else {
            builder = builder.bearer_auth(settings.api_key.expose());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            debug!(
                status = status.as_u16(),
                body = %sanitize_for_log(&body, settings.api_key.expose()),
                "completion endpoint returned an error"
            );
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: parse_error_message(&body),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|error| CompletionError::Decode(error.to_string()))?;

        let Some(choice) = parsed.choices.into_iter().next() else {
            debug!("completion response carried no choices");
            return Ok(None);
        };
        debug!(
            model = parsed.model.as_deref().unwrap_or("-"),
            finish_reason = choice.finish_reason.as_deref().unwrap_or("-"),
            "completion received"
        );

        Ok(Some(choice.message.content.unwrap_or_default()))
    }
}

impl Default for HttpCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionClient for HttpCompletionClient {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    fn complete<'a>(
        &'a self,
        messages: &'a [Message],
        settings: &'a ChatSettings,
    ) -> CompletionFuture<'a> {
        Box::pin(async move {
            match self.request(messages, settings).await {
                Ok(Some(content)) => Some(Message::assistant(content)),
                Ok(None) => None,
                Err(error) => {
                    warn!("completion request failed: {error}");
                    Some(Message::error(error.description()))
                }
            }
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<url::Url, CompletionError> {
    let parsed = url::Url::parse(endpoint).map_err(|error| CompletionError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason: error.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(CompletionError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: format!("unsupported scheme {}", parsed.scheme()),
        });
    }
    Ok(parsed)
}
