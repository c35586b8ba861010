//! TOML config file loading and creation.

use std::path::Path;

use tracing::{info, warn};

use parley_common::ConfigError;

use crate::schema::ParleyConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. If the parsed config fails
/// validation, a warning is logged and the default config is returned.
pub fn load_from_path(path: &Path) -> Result<ParleyConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: ParleyConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(ParleyConfig::default());
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// If the file does not exist, creates a commented default config file and
/// returns defaults.
pub fn load_default() -> Result<ParleyConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(ParleyConfig::default());
    }

    load_from_path(&path)
}

/// Platform-specific default config file path
/// (e.g. `~/.config/parley/config.toml` on Linux).
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("parley").join("config.toml"))
}

/// Write a default config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    Ok(())
}

pub(crate) fn default_config_toml() -> &'static str {
    r#"# Parley configuration.
# Secrets (API keys) are read from the environment, not this file.

[chat]
# Generative model used for plain chat turns.
model = "gemini-2.0-flash"
max_tokens = 2048
temperature = 0.7

[features]
# Pipeline stages, fixed per session. CLI flags override these.
voice = false
translation = false
multi_turn = false
external_api = false

[translation]
# One of: es, fr, de, it, zh-cn, hi
target_lang = "es"

[voice]
# Language spoken replies are synthesized in.
reply_lang = "en"
# audio_dir = "/tmp/parley-audio"

[logging]
filter = "parley=info"
"#
}
