//! Gemini client struct, request building, and response parsing.

use crate::{AiError, Turn};

use super::config::GeminiConfig;

pub(crate) const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini chat client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.config.model)
    }

    /// Build the request body from the prior history plus the current input.
    ///
    /// The current input is sent as the final `user` content, so a
    /// pipeline-transformed text replaces the stored user turn on the wire.
    pub(crate) fn build_request_body(&self, history: &[Turn], input: &str) -> serde_json::Value {
        let mut contents: Vec<serde_json::Value> = history
            .iter()
            .map(|turn| {
                serde_json::json!({
                    "role": turn.speaker.as_wire(),
                    "parts": [{ "text": turn.text }]
                })
            })
            .collect();

        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{ "text": input }]
        }));

        serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        })
    }

    /// Extract the reply text from a response body.
    ///
    /// This is the only place the API's `candidates[0].content.parts[].text`
    /// shape is touched; everything downstream sees a plain string.
    pub(crate) fn parse_reply(&self, json: serde_json::Value) -> Result<String, AiError> {
        let candidates = json["candidates"]
            .as_array()
            .ok_or_else(|| AiError::Parse("no candidates in response".to_string()))?;

        let first = candidates
            .first()
            .ok_or_else(|| AiError::Parse("empty candidates".to_string()))?;

        let parts = first["content"]["parts"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        let mut reply = String::new();
        for part in &parts {
            if let Some(text) = part["text"].as_str() {
                reply.push_str(text);
            }
        }

        if reply.is_empty() {
            return Err(AiError::Parse("no text in response".to_string()));
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn client() -> GeminiClient {
        GeminiClient::new(GeminiConfig::new("test-key").with_max_tokens(256))
    }

    fn turn(speaker: Role, text: &str, sequence: usize) -> Turn {
        Turn {
            speaker,
            text: text.to_string(),
            sequence,
        }
    }

    #[test]
    fn api_url_targets_generate_content() {
        let url = client().api_url();
        assert!(url.starts_with(GEMINI_API_BASE));
        assert!(url.ends_with("gemini-2.0-flash:generateContent"));
    }

    #[test]
    fn request_body_maps_roles_to_wire_labels() {
        let history = [
            turn(Role::User, "Hello", 0),
            turn(Role::Assistant, "Hi there", 1),
        ];
        let body = client().build_request_body(&history, "How are you?");

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "How are you?");
    }

    #[test]
    fn request_body_carries_generation_config() {
        let body = client().build_request_body(&[], "hi");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 256);
    }

    #[test]
    fn parse_reply_concatenates_text_parts() {
        let json = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "Hello " }, { "text": "world" }]
                }
            }]
        });
        assert_eq!(client().parse_reply(json).unwrap(), "Hello world");
    }

    #[test]
    fn parse_reply_rejects_missing_candidates() {
        let err = client().parse_reply(serde_json::json!({})).unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }

    #[test]
    fn parse_reply_rejects_empty_text() {
        let json = serde_json::json!({ "candidates": [{ "content": { "parts": [] } }] });
        let err = client().parse_reply(json).unwrap_err();
        assert!(matches!(err, AiError::Parse(_)));
    }
}
