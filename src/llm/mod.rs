//! Chat-completion client
//!
//! Thin reqwest wrapper over the OpenAI-compatible chat-completions wire
//! format, pointed at the Groq API by default. The base URL is configurable
//! so tests can run against a local mock server.

pub mod types;

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ServiceError};

use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatClient {
    /// Creates a chat client from the application configuration
    ///
    /// Fails when no API key is configured.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.groq_api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm.timeout_seconds))
            .build()
            .map_err(ServiceError::Http)?;

        Ok(Self {
            client,
            base_url: config.llm.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.llm.model.clone(),
            temperature: config.llm.temperature,
            max_tokens: config.llm.max_tokens,
        })
    }

    /// Sends a system+user message pair and returns the completion text
    ///
    /// An empty choice list yields an empty string, not an error.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        debug!("Requesting completion from model {}", self.model);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Llm(format!(
                "Chat completion returned {}: {}",
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Llm(format!("Malformed completion response: {}", e)))?;

        let content = completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKeys;

    #[test]
    fn test_client_requires_api_key() {
        let config = Config::default();
        assert!(ChatClient::new(&config).is_err());

        let config = Config {
            api_keys: ApiKeys { groq_api_key: Some("key".into()), github_token: None },
            ..Config::default()
        };
        assert!(ChatClient::new(&config).is_ok());
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatCompletionRequest {
            model: "llama-3.1-8b-instant".into(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("hi")],
            temperature: 0.3,
            max_tokens: 2000,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "hi");
        assert_eq!(value["max_tokens"], 2000);
    }
}
