//! Environment loading: `.env` support and collaborator credentials.

/// Load environment variables from a `.env` file (KEY=VALUE lines).
///
/// Existing process environment always wins over file values. Searches the
/// current directory first, then the workspace root relative to this crate.
pub fn load_dotenv() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let candidates = [
        std::path::PathBuf::from(".env"),
        // Workspace root (two levels up from crates/parley-config/)
        manifest_dir.join("..").join("..").join(".env"),
    ];

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for (key, value) in parse_dotenv(&contents) {
                if std::env::var(&key).is_err() {
                    std::env::set_var(key, value);
                }
            }
            return;
        }
    }
}

/// Parse KEY=VALUE lines, skipping blanks and `#` comments and stripping
/// surrounding quotes from values.
fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !key.is_empty() {
                pairs.push((key.to_string(), value.to_string()));
            }
        }
    }
    pairs
}

/// API keys for the collaborators, read once at startup.
///
/// Each key is only required when the corresponding feature is enabled;
/// `validate_credentials` enforces that.
#[derive(Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub speech_api_key: Option<String>,
    pub translate_api_key: Option<String>,
    pub dialogflow_project_id: Option<String>,
    pub dialogflow_access_token: Option<String>,
    pub youtube_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn presence(v: &Option<String>) -> &'static str {
            if v.is_some() {
                "[SET]"
            } else {
                "[UNSET]"
            }
        }
        f.debug_struct("Credentials")
            .field("gemini_api_key", &presence(&self.gemini_api_key))
            .field("speech_api_key", &presence(&self.speech_api_key))
            .field("translate_api_key", &presence(&self.translate_api_key))
            .field("dialogflow_project_id", &presence(&self.dialogflow_project_id))
            .field(
                "dialogflow_access_token",
                &presence(&self.dialogflow_access_token),
            )
            .field("youtube_api_key", &presence(&self.youtube_api_key))
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env_nonempty("GEMINI_API_KEY"),
            speech_api_key: env_nonempty("SPEECH_API_KEY"),
            translate_api_key: env_nonempty("TRANSLATE_API_KEY"),
            dialogflow_project_id: env_nonempty("DIALOGFLOW_PROJECT_ID"),
            dialogflow_access_token: env_nonempty("DIALOGFLOW_ACCESS_TOKEN"),
            youtube_api_key: env_nonempty("YOUTUBE_API_KEY"),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}
