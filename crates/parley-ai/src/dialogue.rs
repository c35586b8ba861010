//! Dialogue-management client (intent detection + fulfillment).
//!
//! In multi-turn mode the pipeline forwards each input here instead of the
//! generative model and shows the returned fulfillment text as the reply.

use async_trait::async_trait;
use tracing::debug;

use parley_common::SessionId;

use crate::AiError;

/// Dialogue-management collaborator.
#[async_trait]
pub trait DialogueClient: Send + Sync {
    /// Detect the intent of `text` within `session` and return the
    /// fulfillment text.
    async fn detect_intent(
        &self,
        session: &SessionId,
        text: &str,
        lang: &str,
    ) -> Result<String, AiError>;
}

const DIALOGFLOW_API_BASE: &str = "https://dialogflow.googleapis.com/v2";

#[derive(Clone)]
pub struct DialogflowConfig {
    pub project_id: String,
    pub access_token: String,
}

impl std::fmt::Debug for DialogflowConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogflowConfig")
            .field("project_id", &self.project_id)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl DialogflowConfig {
    pub fn new(project_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            access_token: access_token.into(),
        }
    }
}

/// Dialogflow `detectIntent` client.
pub struct DialogflowClient {
    config: DialogflowConfig,
    http: reqwest::Client,
}

impl DialogflowClient {
    pub fn new(config: DialogflowConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    fn session_url(&self, session: &SessionId) -> String {
        format!(
            "{}/projects/{}/agent/sessions/{}:detectIntent",
            DIALOGFLOW_API_BASE, self.config.project_id, session
        )
    }
}

#[async_trait]
impl DialogueClient for DialogflowClient {
    async fn detect_intent(
        &self,
        session: &SessionId,
        text: &str,
        lang: &str,
    ) -> Result<String, AiError> {
        debug!(project = %self.config.project_id, lang, "detect-intent request");

        let body = serde_json::json!({
            "queryInput": {
                "text": { "text": text, "languageCode": lang }
            }
        });

        let response = self
            .http
            .post(self.session_url(session))
            .bearer_auth(&self.config.access_token)
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

        json["queryResult"]["fulfillmentText"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AiError::Parse("no fulfillment text in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_url_embeds_project_and_session() {
        let client = DialogflowClient::new(DialogflowConfig::new("my-agent", "token"));
        let session = SessionId::new();
        let url = client.session_url(&session);
        assert!(url.contains("/projects/my-agent/agent/sessions/"));
        assert!(url.contains(session.as_str()));
        assert!(url.ends_with(":detectIntent"));
    }

    #[test]
    fn config_debug_redacts_token() {
        let config = DialogflowConfig::new("my-agent", "ya29.secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("my-agent"));
        assert!(!debug.contains("ya29.secret"));
    }
}
