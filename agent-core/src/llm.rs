use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, time::Duration};

use crate::{config::AgentConfig, error::AgentError};

/// System directive injected ahead of every task-specific prompt.
pub const SYSTEM_PROMPT: &str = "\
You are a weather-aware assistant with access to live weather data. Follow these rules:

1. AUTONOMOUS DECISION MAKING:
   - Questions about weather conditions (phrases like \"weather in\", \"temperature\", \"rain\", \"forecast\") require live data for the exact location the user mentions
   - Answer non-weather questions normally

2. RESPONSE GUIDELINES:
   - Always provide accurate, sourced weather information
   - Include relevant details (temperature, conditions, etc.)
   - Add practical recommendations when appropriate
   - Use clear, conversational language";

/// Seam over text generation so the classifier, composer and agent can be
/// exercised against scripted implementations.
#[async_trait]
pub trait TextGenerator: Send + Sync + Debug {
    /// Generate text for `prompt`. `context`, when present, is prepended
    /// separated by a blank line.
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String, AgentError>;
}

/// Client for an Ollama-style `/api/generate` endpoint.
///
/// One synchronous (non-streaming) request per call; no retries. A transport
/// failure, timeout or non-success status all surface as
/// [`AgentError::ModelUnavailable`].
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
    temperature: f64,
    num_ctx: u32,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    num_ctx: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(config: &AgentConfig) -> Self {
        Self::with_base_url(config, config.ollama_host.clone())
    }

    /// Same client, pointed at an explicit base URL.
    pub fn with_base_url(config: &AgentConfig, base_url: String) -> Self {
        Self {
            http: Client::new(),
            base_url,
            model: config.ollama_model.clone(),
            temperature: config.temperature,
            num_ctx: config.num_ctx,
            timeout: config.request_timeout(),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(&self, prompt: &str, context: Option<&str>) -> Result<String, AgentError> {
        let full_prompt = join_prompt(prompt, context);

        let body = GenerateRequest {
            model: &self.model,
            prompt: &full_prompt,
            stream: false,
            options: GenerateOptions { temperature: self.temperature, num_ctx: self.num_ctx },
        };

        let res = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::ModelUnavailable(e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| AgentError::ModelUnavailable(e.to_string()))?;

        if !status.is_success() {
            return Err(AgentError::ModelUnavailable(format!(
                "generation request failed with status {}: {}",
                status,
                truncate_body(&text),
            )));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            AgentError::ModelUnavailable(format!("undecodable generation payload: {e}"))
        })?;

        if parsed.response.trim().is_empty() {
            return Err(AgentError::EmptyGeneration);
        }

        Ok(parsed.response)
    }
}

/// `context`, when present, precedes the prompt separated by a blank line.
pub(crate) fn join_prompt(prompt: &str, context: Option<&str>) -> String {
    match context {
        Some(ctx) => format!("{ctx}\n\n{prompt}"),
        None => prompt.to_string(),
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    // Byte 200 may fall inside a multi-byte character; cut at a boundary.
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OllamaClient {
        OllamaClient::with_base_url(&AgentConfig::default(), server.uri())
    }

    #[test]
    fn context_precedes_prompt_with_blank_line() {
        assert_eq!(join_prompt("task", Some("persona")), "persona\n\ntask");
        assert_eq!(join_prompt("task", None), "task");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_body("short"), "short");

        // 301 bytes; byte 200 falls inside the multi-byte "é".
        let body = format!("x{}", "é".repeat(150));
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert!(truncated.len() < body.len());
        assert!(body.starts_with(truncated.trim_end_matches("...")));
    }

    #[tokio::test]
    async fn generate_returns_model_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.2:latest",
                "stream": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "The capital of France is Paris."
            })))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .generate("What is the capital of France?", Some(SYSTEM_PROMPT))
            .await
            .expect("generation must succeed");

        assert_eq!(text, "The capital of France is Paris.");
    }

    #[tokio::test]
    async fn non_success_status_is_model_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model not loaded"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello", None).await.unwrap_err();

        match err {
            AgentError::ModelUnavailable(msg) => {
                assert!(msg.contains("500"));
                assert!(msg.contains("model not loaded"));
            }
            other => panic!("expected ModelUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_generation_is_empty_generation() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "response": "   " })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello", None).await.unwrap_err();
        assert!(matches!(err, AgentError::EmptyGeneration));
    }

    #[tokio::test]
    async fn timed_out_generation_is_model_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "response": "too late" }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let config = AgentConfig { request_timeout_secs: 1, ..AgentConfig::default() };
        let client = OllamaClient::with_base_url(&config, server.uri());

        let err = client.generate("hello", None).await.unwrap_err();
        assert!(matches!(err, AgentError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn undecodable_payload_is_model_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("hello", None).await.unwrap_err();
        assert!(matches!(err, AgentError::ModelUnavailable(_)));
    }
}
