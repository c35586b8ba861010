//! Text translation client and the closed target-language set.

use async_trait::async_trait;
use tracing::debug;

use crate::AiError;

/// Target languages offered by the translation feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Spanish,
    French,
    German,
    Italian,
    ChineseSimplified,
    Hindi,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::ChineseSimplified,
        Language::Hindi,
    ];

    /// Language code on the translation wire (2-5 chars).
    pub fn code(&self) -> &'static str {
        match self {
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::ChineseSimplified => "zh-cn",
            Language::Hindi => "hi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Translation collaborator. Failure is non-fatal: callers fall back to the
/// untranslated text.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, dest: Language) -> Result<String, AiError>;
}

const TRANSLATE_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Translate-v2 REST client.
pub struct TranslateClient {
    api_key: String,
    http: reqwest::Client,
}

impl std::fmt::Debug for TranslateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslateClient")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl TranslateClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("failed to build HTTP client"),
        }
    }
}

#[async_trait]
impl Translator for TranslateClient {
    async fn translate(&self, text: &str, dest: Language) -> Result<String, AiError> {
        debug!(dest = %dest, chars = text.len(), "translation request");

        let body = serde_json::json!({
            "q": text,
            "target": dest.code(),
            "format": "text",
        });

        let response = self
            .http
            .post(TRANSLATE_API_URL)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Translation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Translation(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::Translation(e.to_string()))?;

        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AiError::Translation("no translation in response".to_string()))
    }
}
