use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, info};

/// The one model this service generates with. The request's `model_id`
/// field is accepted for wire compatibility but not consulted.
pub const MODEL: &str = "gpt-4o-mini";

const SESSION_ID: &str = "atal_idea_generator";
const DEFAULT_BASE_URL: &str = "https://integrations.emergentagent.com/llm/v1";

const SYSTEM_PROMPT: &str = "You are an expert electronics engineer and innovative STEM educator with deep reasoning capabilities. \
You specialize in creating practical, educational, and exciting project ideas that solve real-world problems.

Your expertise includes:
- Electronics and embedded systems design
- IoT and smart device development
- Robotics and automation systems
- Sustainable technology solutions
- Educational project design and pedagogy
- Problem-solving through systematic reasoning

Always respond with valid JSON only. No additional text, explanations, or reasoning outside the JSON structure.";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("EMERGENT_LLM_KEY not found in environment")]
    MissingKey,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Other: {0}")]
    Other(String),
}

/// Shared handle to the hosted chat API. Constructed once in `main` and
/// injected into every handler; a missing key is only an error once a
/// request actually needs the remote service.
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl LlmClient {
    pub fn from_env() -> Self {
        let base_url = std::env::var("EMERGENT_API_BASE")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(std::env::var("EMERGENT_LLM_KEY").ok(), base_url)
    }

    pub fn new(api_key: Option<String>, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    pub fn available(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &'static str {
        MODEL
    }

    /// One best-effort chat round-trip: system prompt plus `prompt` as the
    /// user message, returning the first choice's text. No timeout and no
    /// retry; the caller owns failure handling.
    pub async fn send(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingKey)?;
        let url = format!("{}/chat/completions", self.base_url);

        let request_body = json!({
            "model": MODEL,
            "session_id": SESSION_ID,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ]
        });

        info!("📤 Sending chat request ({} prompt chars) to {}", prompt.len(), url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!("❌ Chat API error: status={} body={}", status, error_body);
            return Err(LlmError::Http(format!("status={} body={}", status, error_body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Other(format!("parse error: {e}")))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::Other("no choices in response".into()))?;

        info!("📥 Received {} chars from {}", text.len(), MODEL);
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_without_key_fails_before_any_network_call() {
        let client = LlmClient::new(None, "http://localhost:0".into());
        let err = client.send("hello").await.unwrap_err();
        assert!(matches!(err, LlmError::MissingKey));
    }

    #[test]
    fn availability_tracks_key_presence() {
        assert!(!LlmClient::new(None, "x".into()).available());
        assert!(LlmClient::new(Some("sk-test".into()), "x".into()).available());
    }

    #[test]
    fn chat_response_extracts_first_choice() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "hi"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices[0].message.content, "hi");
    }
}
