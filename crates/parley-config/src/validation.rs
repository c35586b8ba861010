//! Configuration validation and startup credential checks.

use parley_common::ConfigError;

use crate::env::Credentials;
use crate::schema::ParleyConfig;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &ParleyConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(&mut errors, "chat.max_tokens", config.chat.max_tokens, 1, 32768);
    validate_range_f64(
        &mut errors,
        "chat.temperature",
        config.chat.temperature,
        0.0,
        2.0,
    );

    if config.chat.model.trim().is_empty() {
        errors.push("chat.model must not be empty".into());
    }

    // Language codes are 2-5 characters on every collaborator wire; the
    // closed target-language set itself is checked where codes are parsed.
    validate_lang_code(&mut errors, "translation.target_lang", &config.translation.target_lang);
    validate_lang_code(&mut errors, "voice.reply_lang", &config.voice.reply_lang);

    if config.logging.filter.trim().is_empty() {
        errors.push("logging.filter must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Enforce the startup credential contract: a key is required iff the
/// feature that uses it is enabled. Absence is a configuration error here,
/// never a per-turn error later.
pub fn validate_credentials(
    config: &ParleyConfig,
    creds: &Credentials,
) -> Result<(), ConfigError> {
    let features = &config.features;
    let pipeline_replies = features.voice || features.translation || features.multi_turn;

    // Plain chat mode is the only consumer of the generative model; the
    // pipeline routes replies through dialogue or the echo path.
    if !pipeline_replies && creds.gemini_api_key.is_none() {
        return Err(ConfigError::MissingCredential("GEMINI_API_KEY".into()));
    }
    if features.voice && creds.speech_api_key.is_none() {
        return Err(ConfigError::MissingCredential("SPEECH_API_KEY".into()));
    }
    if features.translation && creds.translate_api_key.is_none() {
        return Err(ConfigError::MissingCredential("TRANSLATE_API_KEY".into()));
    }
    if features.multi_turn {
        if creds.dialogflow_project_id.is_none() {
            return Err(ConfigError::MissingCredential("DIALOGFLOW_PROJECT_ID".into()));
        }
        if creds.dialogflow_access_token.is_none() {
            return Err(ConfigError::MissingCredential(
                "DIALOGFLOW_ACCESS_TOKEN".into(),
            ));
        }
    }
    if features.external_api && creds.youtube_api_key.is_none() {
        return Err(ConfigError::MissingCredential("YOUTUBE_API_KEY".into()));
    }

    Ok(())
}

fn validate_range(errors: &mut Vec<String>, field: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{field} must be between {min} and {max}, got {value}"));
    }
}

fn validate_range_f64(errors: &mut Vec<String>, field: &str, value: f64, min: f64, max: f64) {
    if !value.is_finite() || value < min || value > max {
        errors.push(format!("{field} must be between {min} and {max}, got {value}"));
    }
}

fn validate_lang_code(errors: &mut Vec<String>, field: &str, code: &str) {
    let len = code.len();
    if !(2..=5).contains(&len) || !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        errors.push(format!("{field} must be a 2-5 character language code, got {code:?}"));
    }
}
