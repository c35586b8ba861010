//! Speech synthesis (text-to-speech) client.
//!
//! Synthesis failures are non-fatal: the reply text is still shown, so the
//! client only ever costs the caller a warning.

use async_trait::async_trait;
use tracing::debug;

use crate::AiError;

/// Synthesized audio handed to the UI layer for playback.
#[derive(Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl std::fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioClip")
            .field("bytes", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

/// Speech-synthesis collaborator.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `text` as audio in language `lang` (a short language code).
    async fn synthesize(&self, text: &str, lang: &str) -> Result<AudioClip, AiError>;
}

const TTS_API_URL: &str = "https://translate.google.com/translate_tts";

/// Keyless translate-TTS synthesizer returning MP3 audio.
pub struct TtsClient {
    http: reqwest::Client,
}

impl TtsClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

impl Default for TtsClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for TtsClient {
    async fn synthesize(&self, text: &str, lang: &str) -> Result<AudioClip, AiError> {
        debug!(lang, chars = text.len(), "synthesis request");

        let response = self
            .http
            .get(TTS_API_URL)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("q", text),
                ("tl", lang),
            ])
            .send()
            .await
            .map_err(|e| AiError::Synthesis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::Synthesis(format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AiError::Synthesis(e.to_string()))?;

        if bytes.is_empty() {
            return Err(AiError::Synthesis("empty audio response".to_string()));
        }

        Ok(AudioClip {
            bytes: bytes.to_vec(),
            mime: "audio/mpeg",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_clip_debug_hides_payload() {
        let clip = AudioClip {
            bytes: vec![0u8; 4096],
            mime: "audio/mpeg",
        };
        let debug = format!("{clip:?}");
        assert!(debug.contains("4096"));
        assert!(debug.contains("audio/mpeg"));
        assert!(!debug.contains("[0, 0"));
    }
}
