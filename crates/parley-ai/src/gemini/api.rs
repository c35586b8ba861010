//! ChatClient trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, ChatClient, Turn};

use super::client::GeminiClient;

#[async_trait]
impl ChatClient for GeminiClient {
    async fn send_message(&self, history: &[Turn], input: &str) -> Result<String, AiError> {
        let body = self.build_request_body(history, input);
        let url = self.api_url();

        debug!(model = %self.config.model, history_len = history.len(), "Gemini chat request");

        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        self.parse_reply(json)
    }
}
