mod cli;
mod clipboard;
mod repl;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use parley_ai::{
    DialogflowClient, DialogflowConfig, FeatureToggles, GeminiClient, GeminiConfig, Language,
    Lookups, MusicSearchClient, PlaceSearchClient, TranscribeClient, TranscribeConfig,
    TranslateClient, TtsClient, TurnPipeline, VideoSearchClient,
};
use parley_common::ConfigError;
use parley_config::{Credentials, ParleyConfig};

use repl::ReplyMode;

#[tokio::main]
async fn main() {
    // Load .env before reading any credentials
    parley_config::load_dotenv();

    let args = cli::parse();

    let config = match parley_config::load_config(args.config.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize logging; CLI override wins over the config file
    let directive = args.log_level.as_deref().unwrap_or(&config.logging.filter);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "parley=info".parse().expect("static directive")),
            ),
        )
        .init();

    tracing::info!("parley v{} starting", env!("CARGO_PKG_VERSION"));

    match build_and_run(config, &args).await {
        Ok(()) => tracing::info!("shutdown complete"),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

async fn build_and_run(mut config: ParleyConfig, args: &cli::Args) -> parley_common::Result<()> {
    // CLI toggles override the config file for this session
    if args.voice {
        config.features.voice = true;
    }
    if args.translate {
        config.features.translation = true;
    }
    if args.multi_turn {
        config.features.multi_turn = true;
    }
    if args.external {
        config.features.external_api = true;
    }
    if let Some(ref lang) = args.lang {
        config.translation.target_lang = lang.clone();
    }

    let creds = Credentials::from_env();
    parley_config::validate_credentials(&config, &creds)?;

    let target_lang = if config.features.translation {
        let code = &config.translation.target_lang;
        let lang = Language::from_code(code).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "translation.target_lang must be one of es, fr, de, it, zh-cn, hi; got {code:?}"
            ))
        })?;
        Some(lang)
    } else {
        None
    };

    let toggles = FeatureToggles {
        voice: config.features.voice,
        translation: config.features.translation,
        multi_turn: config.features.multi_turn,
        external_api: config.features.external_api,
    };
    tracing::info!(?toggles, "session features");

    let audio_dir = audio_dir(&config)?;
    let mode = build_mode(&config, &creds, toggles, target_lang);
    let lookups = build_lookups(&creds, toggles);

    let mut repl = repl::Repl::new(
        mode,
        lookups,
        toggles.external_api,
        toggles.voice,
        audio_dir,
    );
    repl.run().await
}

/// Pick the reply path for this session: the feature pipeline when any
/// turn-transforming stage is on, plain generative chat otherwise.
fn build_mode(
    config: &ParleyConfig,
    creds: &Credentials,
    toggles: FeatureToggles,
    target_lang: Option<Language>,
) -> ReplyMode {
    if !toggles.pipeline_active() {
        let key = creds
            .gemini_api_key
            .clone()
            .expect("checked by validate_credentials");
        let gemini = GeminiConfig::new(key)
            .with_model(config.chat.model.clone())
            .with_max_tokens(config.chat.max_tokens)
            .with_temperature(config.chat.temperature);
        return ReplyMode::Generative(GeminiClient::new(gemini));
    }

    let mut pipeline =
        TurnPipeline::new(toggles).with_reply_lang(config.voice.reply_lang.clone());
    if let Some(lang) = target_lang {
        pipeline = pipeline.with_target_lang(lang);
    }
    if toggles.voice {
        let key = creds
            .speech_api_key
            .clone()
            .expect("checked by validate_credentials");
        pipeline = pipeline
            .with_recognizer(Arc::new(TranscribeClient::new(TranscribeConfig::new(key))))
            .with_synthesizer(Arc::new(TtsClient::new()));
    }
    if toggles.translation {
        let key = creds
            .translate_api_key
            .clone()
            .expect("checked by validate_credentials");
        pipeline = pipeline.with_translator(Arc::new(TranslateClient::new(key)));
    }
    if toggles.multi_turn {
        let project = creds
            .dialogflow_project_id
            .clone()
            .expect("checked by validate_credentials");
        let token = creds
            .dialogflow_access_token
            .clone()
            .expect("checked by validate_credentials");
        pipeline = pipeline.with_dialogue(Arc::new(DialogflowClient::new(
            DialogflowConfig::new(project, token),
        )));
    }
    ReplyMode::Pipeline(pipeline)
}

fn build_lookups(creds: &Credentials, toggles: FeatureToggles) -> Lookups {
    if !toggles.external_api {
        return Lookups::new();
    }
    let key = creds
        .youtube_api_key
        .clone()
        .expect("checked by validate_credentials");
    Lookups::new()
        .with_music(Arc::new(MusicSearchClient::new()))
        .with_video(Arc::new(VideoSearchClient::new(key)))
        .with_place(Arc::new(PlaceSearchClient::new()))
}

fn audio_dir(config: &ParleyConfig) -> parley_common::Result<PathBuf> {
    let dir = match &config.voice.audio_dir {
        Some(dir) => dir.clone(),
        None => dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("parley"),
    };
    if config.features.voice {
        std::fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}
