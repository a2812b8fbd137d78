//! Thin OpenRouter chat wrapper for auxiliary lookups. Not involved in the
//! cleaning pipeline; gated behind the `llm` feature.

use serde_json::json;

use crate::error::{Result, TallyError};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_MODEL: &str = "openrouter/auto";

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    /// Build from the environment. A missing API key fails here, at
    /// construction, so no client exists that could fail on first use.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| TallyError::Llm("OPENROUTER_API_KEY is not set".into()))?;
        let base_url = std::env::var("OPENROUTER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("OPENROUTER_DEFAULT_MODEL")
            .unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            base_url,
            model,
        })
    }
}

pub struct OpenRouterClient {
    config: LlmConfig,
    http: reqwest::blocking::Client,
}

impl OpenRouterClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Single-prompt convenience call; returns the assistant text.
    pub fn quick_query(&self, prompt: &str, system_message: Option<&str>) -> Result<String> {
        let mut messages = Vec::new();
        if let Some(system) = system_message {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "model": self.config.model,
            "messages": messages,
        });

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .map_err(|e| TallyError::Llm(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(TallyError::Llm(format!(
                "chat completion failed (status {status}): {text}"
            )));
        }

        let parsed: serde_json::Value =
            response.json().map_err(|e| TallyError::Llm(e.to_string()))?;
        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TallyError::Llm("response missing message content".into()))
    }
}
