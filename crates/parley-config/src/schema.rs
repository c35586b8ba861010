//! Configuration schema types for Parley.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParleyConfig {
    pub chat: ChatConfig,
    pub features: FeatureConfig,
    pub translation: TranslationConfig,
    pub voice: VoiceConfig,
    pub logging: LoggingConfig,
}

/// Generative-chat collaborator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub model: String,
    /// Reply token cap (valid range: 1-32768).
    pub max_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".into(),
            max_tokens: 2048,
            temperature: 0.7,
        }
    }
}

/// Feature toggles, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub voice: bool,
    pub translation: bool,
    pub multi_turn: bool,
    pub external_api: bool,
}

/// Translation stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Target language code (one of: es, fr, de, it, zh-cn, hi).
    pub target_lang: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_lang: "es".into(),
        }
    }
}

/// Voice capture and synthesis settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Language code spoken replies are synthesized in.
    pub reply_lang: String,
    /// Where synthesized clips are written; defaults to the platform cache
    /// directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_dir: Option<PathBuf>,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            reply_lang: "en".into(),
            audio_dir: None,
        }
    }
}

/// Logging defaults, overridable from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "parley=info".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = ParleyConfig::default();
        assert_eq!(config.chat.model, "gemini-2.0-flash");
        assert_eq!(config.translation.target_lang, "es");
        assert!(!config.features.voice);
        assert!(!config.features.multi_turn);
        assert_eq!(config.logging.filter, "parley=info");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ParleyConfig = toml::from_str(
            r#"
            [features]
            translation = true

            [translation]
            target_lang = "fr"
            "#,
        )
        .unwrap();

        assert!(config.features.translation);
        assert_eq!(config.translation.target_lang, "fr");
        assert_eq!(config.chat.max_tokens, 2048);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = ParleyConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: ParleyConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.chat.model, config.chat.model);
        assert_eq!(parsed.voice.reply_lang, config.voice.reply_lang);
    }
}
