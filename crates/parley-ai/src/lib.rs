//! Conversation core for Parley.
//!
//! Provides the conversation session model, the Gemini chat client, and the
//! optional voice → translate → route → speak feature pipeline with its
//! collaborator clients:
//! - Speech recognition and synthesis
//! - Text translation
//! - Dialogue management (intent detection)
//! - Music / video / location side lookups

pub mod dialogue;
pub mod gemini;
pub mod lookup;
pub mod pipeline;
pub mod session;
pub mod speech;
pub mod synthesis;
pub mod translate;

use async_trait::async_trait;

pub use dialogue::{DialogflowClient, DialogflowConfig, DialogueClient};
pub use gemini::{GeminiClient, GeminiConfig};
pub use lookup::{Lookups, MediaSearch, MusicSearchClient, PlaceSearchClient, VideoSearchClient, NOT_FOUND};
pub use pipeline::{CapturedInput, FeatureToggles, TurnOutcome, TurnPipeline};
pub use session::{copy_text, display_role, ConversationSession};
pub use speech::{SpeechRecognizer, TranscribeClient, TranscribeConfig};
pub use synthesis::{AudioClip, SpeechSynthesizer, TtsClient};
pub use translate::{Language, TranslateClient, Translator};

/// Generative-chat collaborator.
///
/// `history` is the prior conversation, ending before the turn being
/// answered; `input` is the (possibly pipeline-transformed) text for the
/// current turn.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn send_message(&self, history: &[Turn], input: &str) -> Result<String, AiError>;
}

/// One message exchanged in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Turn {
    pub speaker: Role,
    pub text: String,
    /// 0-based append position within the session, assigned once.
    pub sequence: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Role label on the generative-language wire.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "model",
        }
    }

    /// Role label shown in a chat transcript.
    pub fn display_label(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The primary chat/dialogue collaborator rejected the call.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Speech capture produced no usable text.
    #[error("recognition error: {0}")]
    Recognition(String),

    /// The recognition backend could not be reached.
    #[error("speech service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Translation failed; callers fall back to the untranslated text.
    #[error("translation error: {0}")]
    Translation(String),

    /// Speech synthesis failed; callers degrade to text-only.
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// A collaborator response did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The session is already processing a turn.
    #[error("session busy")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_wire_labels() {
        assert_eq!(Role::User.as_wire(), "user");
        assert_eq!(Role::Assistant.as_wire(), "model");
    }

    #[test]
    fn role_display_labels() {
        assert_eq!(Role::User.display_label(), "user");
        assert_eq!(Role::Assistant.display_label(), "assistant");
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(
            AiError::Upstream("HTTP 500".into()).to_string(),
            "upstream error: HTTP 500"
        );
        assert_eq!(AiError::Busy.to_string(), "session busy");
        assert_eq!(
            AiError::ServiceUnavailable("connect refused".into()).to_string(),
            "speech service unavailable: connect refused"
        );
    }
}
