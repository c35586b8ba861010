use clap::Parser;

/// Parley — a voice-enabled multilingual chat assistant.
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Log filter override (e.g. "parley=debug").
    #[arg(long)]
    pub log_level: Option<String>,

    /// Enable voice capture and spoken replies.
    #[arg(long)]
    pub voice: bool,

    /// Translate inputs before routing them.
    #[arg(long)]
    pub translate: bool,

    /// Route inputs through the dialogue engine instead of echoing.
    #[arg(long)]
    pub multi_turn: bool,

    /// Enable the :music / :video / :map lookup commands.
    #[arg(long)]
    pub external: bool,

    /// Translation target language code (es, fr, de, it, zh-cn, hi).
    #[arg(long)]
    pub lang: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
