//! Speech-to-text client for voice capture.
//!
//! Voice input uploads one recorded utterance and blocks until the
//! transcription comes back; there is no partial-result streaming.

use async_trait::async_trait;
use tracing::debug;

use crate::AiError;

/// Speech-recognition collaborator.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe one utterance.
    ///
    /// Fails with [`AiError::Recognition`] when the audio is unintelligible
    /// and [`AiError::ServiceUnavailable`] when the backend cannot be
    /// reached. Either failure abandons the turn; nothing is appended.
    async fn recognize(&self, audio: Vec<u8>, filename: &str) -> Result<String, AiError>;
}

const TRANSCRIBE_API_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

#[derive(Clone)]
pub struct TranscribeConfig {
    pub api_key: String,
    pub model: String,
    pub language: Option<String>,
}

impl std::fmt::Debug for TranscribeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscribeConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("language", &self.language)
            .finish()
    }
}

impl TranscribeConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: "whisper-1".to_string(),
            language: None,
        }
    }

    pub fn with_language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }
}

/// Transcription-API speech recognizer.
pub struct TranscribeClient {
    config: TranscribeConfig,
    http: reqwest::Client,
}

impl TranscribeClient {
    pub fn new(config: TranscribeConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(300))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next() {
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("webm") => "audio/webm",
        Some("ogg") => "audio/ogg",
        _ => "audio/wav",
    }
}

#[async_trait]
impl SpeechRecognizer for TranscribeClient {
    async fn recognize(&self, audio: Vec<u8>, filename: &str) -> Result<String, AiError> {
        debug!(model = %self.config.model, size = audio.len(), "transcription request");

        let file_part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str(mime_for(filename))
            .map_err(|e| AiError::Recognition(e.to_string()))?;

        let mut form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.model.clone());

        if let Some(ref lang) = self.config.language {
            form = form.text("language", lang.clone());
        }

        let response = self
            .http
            .post(TRANSCRIBE_API_URL)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AiError::ServiceUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // 4xx means the backend saw the audio and rejected it; anything
            // else means the service itself is unhealthy.
            if status.is_client_error() {
                return Err(AiError::Recognition(format!("HTTP {status}: {text}")));
            }
            return Err(AiError::ServiceUnavailable(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        let transcript = json["text"]
            .as_str()
            .ok_or_else(|| AiError::Parse("no 'text' field in response".to_string()))?;

        if transcript.trim().is_empty() {
            return Err(AiError::Recognition("no speech detected".to_string()));
        }
        Ok(transcript.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_for_known_extensions() {
        assert_eq!(mime_for("clip.mp3"), "audio/mpeg");
        assert_eq!(mime_for("clip.m4a"), "audio/mp4");
        assert_eq!(mime_for("clip.webm"), "audio/webm");
        assert_eq!(mime_for("clip.ogg"), "audio/ogg");
    }

    #[test]
    fn mime_defaults_to_wav() {
        assert_eq!(mime_for("clip.wav"), "audio/wav");
        assert_eq!(mime_for("noextension"), "audio/wav");
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = TranscribeConfig::new("sk-secret").with_language("en");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
    }
}
