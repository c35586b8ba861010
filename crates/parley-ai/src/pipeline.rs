//! The per-turn feature pipeline: capture → translate → route → speak.
//!
//! Each stage is optional and chosen once per session. Recognition failures
//! abort the turn before anything is appended; translation and synthesis
//! failures degrade without aborting; a dialogue failure leaves the already
//! appended user turn as the most recent.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::dialogue::DialogueClient;
use crate::session::ConversationSession;
use crate::speech::SpeechRecognizer;
use crate::synthesis::{AudioClip, SpeechSynthesizer};
use crate::translate::{Language, Translator};
use crate::{AiError, Turn};

/// Optional pipeline stages, set once per session and read-only during turn
/// processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureToggles {
    pub voice: bool,
    pub translation: bool,
    pub multi_turn: bool,
    pub external_api: bool,
}

impl FeatureToggles {
    /// True when any turn-transforming stage is on (external lookups are
    /// side queries and do not affect the turn flow).
    pub fn pipeline_active(&self) -> bool {
        self.voice || self.translation || self.multi_turn
    }
}

/// One captured user input, before any transformation.
#[derive(Debug, Clone)]
pub enum CapturedInput {
    Text(String),
    /// Raw audio plus the filename hint the recognizer's upload needs.
    Audio { data: Vec<u8>, filename: String },
}

/// What one successful pipeline run produced.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub user: Turn,
    pub assistant: Turn,
    /// Present when synthesis was enabled and succeeded.
    pub audio: Option<AudioClip>,
}

pub struct TurnPipeline {
    toggles: FeatureToggles,
    target_lang: Option<Language>,
    /// Synthesis language when no translation target is set.
    reply_lang: String,
    recognizer: Option<Arc<dyn SpeechRecognizer>>,
    translator: Option<Arc<dyn Translator>>,
    dialogue: Option<Arc<dyn DialogueClient>>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
}

impl TurnPipeline {
    pub fn new(toggles: FeatureToggles) -> Self {
        Self {
            toggles,
            target_lang: None,
            reply_lang: "en".to_string(),
            recognizer: None,
            translator: None,
            dialogue: None,
            synthesizer: None,
        }
    }

    pub fn with_target_lang(mut self, lang: Language) -> Self {
        self.target_lang = Some(lang);
        self
    }

    pub fn with_reply_lang(mut self, lang: impl Into<String>) -> Self {
        self.reply_lang = lang.into();
        self
    }

    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_dialogue(mut self, dialogue: Arc<dyn DialogueClient>) -> Self {
        self.dialogue = Some(dialogue);
        self
    }

    pub fn with_synthesizer(mut self, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    pub fn toggles(&self) -> FeatureToggles {
        self.toggles
    }

    /// Translated replies are spoken in the target language; otherwise the
    /// configured reply language applies.
    fn reply_lang(&self) -> &str {
        self.target_lang
            .map(|l| l.code())
            .unwrap_or(&self.reply_lang)
    }

    /// Run one captured input through the enabled stages, appending the user
    /// turn and its reply to `session`.
    ///
    /// Returns `Ok(None)` when capture produced no usable text (the caller
    /// treats that as "no input" and stays idle).
    pub async fn process_turn(
        &self,
        session: &mut ConversationSession,
        input: CapturedInput,
    ) -> Result<Option<TurnOutcome>, AiError> {
        // Capture. A recognition failure abandons the turn here, before any
        // append, so the user can simply retry.
        let captured = match input {
            CapturedInput::Text(text) => text,
            CapturedInput::Audio { data, filename } => {
                let recognizer = self.recognizer.as_ref().ok_or_else(|| {
                    AiError::ServiceUnavailable("no speech recognizer configured".into())
                })?;
                recognizer.recognize(data, &filename).await?
            }
        };
        let captured = captured.trim().to_string();
        if captured.is_empty() {
            debug!("empty capture, no turn");
            return Ok(None);
        }

        let user = session.append_user(captured.clone()).clone();

        // Translate. Collaborator failure falls back to the original text.
        let routed_input = match (&self.translator, self.target_lang) {
            (Some(translator), Some(lang)) if self.toggles.translation => {
                match translator.translate(&captured, lang).await {
                    Ok(translated) => translated,
                    Err(e) => {
                        warn!("translation failed, using original text: {e}");
                        captured.clone()
                    }
                }
            }
            _ => captured.clone(),
        };

        // Route. Single-turn mode echoes the (possibly translated) input
        // verbatim and never calls a generative model.
        let reply = if self.toggles.multi_turn {
            let dialogue = self
                .dialogue
                .as_ref()
                .ok_or_else(|| AiError::Upstream("no dialogue client configured".into()))?;
            let session_id = session.id().clone();
            dialogue
                .detect_intent(&session_id, &routed_input, self.reply_lang())
                .await?
        } else {
            routed_input.clone()
        };

        let assistant = session.append_assistant(reply.clone()).clone();

        // Speak. Failure degrades to text-only.
        let audio = match &self.synthesizer {
            Some(synthesizer) if self.toggles.voice => {
                match synthesizer.synthesize(&reply, self.reply_lang()).await {
                    Ok(clip) => Some(clip),
                    Err(e) => {
                        warn!("synthesis failed, showing text only: {e}");
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(Some(TurnOutcome {
            user,
            assistant,
            audio,
        }))
    }
}
