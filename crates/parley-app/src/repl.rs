//! Interactive chat loop.
//!
//! Plain lines are chat turns; `:commands` cover history, clipboard copy,
//! external lookups, and voice input from an audio file.

use std::io::Write;
use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use parley_ai::{
    copy_text, AudioClip, CapturedInput, ConversationSession, GeminiClient, Lookups, TurnPipeline,
};

use crate::clipboard::Clipboard;

/// How assistant replies are produced for this session.
pub enum ReplyMode {
    /// Plain chat against the generative model.
    Generative(GeminiClient),
    /// The voice → translate → route → speak pipeline.
    Pipeline(TurnPipeline),
}

enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    session: ConversationSession,
    mode: ReplyMode,
    lookups: Lookups,
    external_enabled: bool,
    voice_enabled: bool,
    audio_dir: PathBuf,
    clips_written: usize,
}

impl Repl {
    pub fn new(
        mode: ReplyMode,
        lookups: Lookups,
        external_enabled: bool,
        voice_enabled: bool,
        audio_dir: PathBuf,
    ) -> Self {
        Self {
            session: ConversationSession::new(),
            mode,
            lookups,
            external_enabled,
            voice_enabled,
            audio_dir,
            clips_written: 0,
        }
    }

    pub async fn run(&mut self) -> parley_common::Result<()> {
        println!("parley v{} — :help for commands, :quit to exit", env!("CARGO_PKG_VERSION"));
        prompt();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                prompt();
                continue;
            }

            let flow = match line.strip_prefix(':') {
                Some(command) => self.handle_command(command).await,
                None => {
                    self.chat_turn(CapturedInput::Text(line.to_string())).await;
                    Flow::Continue
                }
            };
            if matches!(flow, Flow::Quit) {
                break;
            }
            prompt();
        }
        Ok(())
    }

    /// Process one input as a conversation turn. Errors are surfaced once
    /// and the loop returns to idle; nothing is retried.
    async fn chat_turn(&mut self, input: CapturedInput) {
        let audio = match &self.mode {
            ReplyMode::Generative(client) => {
                let CapturedInput::Text(text) = input else {
                    println!("voice input needs the pipeline; run with --voice");
                    return;
                };
                self.session.append_user(text.clone());
                match self.session.produce_assistant_reply(client, &text).await {
                    Ok(turn) => println!("assistant> {}", turn.text),
                    Err(e) => eprintln!("error: {e}"),
                }
                None
            }
            ReplyMode::Pipeline(pipeline) => {
                match pipeline.process_turn(&mut self.session, input).await {
                    Ok(Some(outcome)) => {
                        println!("assistant> {}", outcome.assistant.text);
                        outcome.audio
                    }
                    Ok(None) => {
                        println!("(no input)");
                        None
                    }
                    Err(e) => {
                        eprintln!("error: {e}");
                        None
                    }
                }
            }
        };

        if let Some(clip) = audio {
            self.save_clip(&clip);
        }
    }

    fn save_clip(&mut self, clip: &AudioClip) {
        let path = self.audio_dir.join(format!("reply-{}.mp3", self.clips_written));
        match std::fs::write(&path, &clip.bytes) {
            Ok(()) => {
                self.clips_written += 1;
                println!("(audio: {})", path.display());
            }
            Err(e) => warn!("failed to write audio clip: {e}"),
        }
    }

    async fn handle_command(&mut self, command: &str) -> Flow {
        let (name, rest) = match command.split_once(' ') {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        match name {
            "quit" | "q" => return Flow::Quit,
            "help" => print_help(),
            "history" => {
                for (role, text) in self.session.project_for_display() {
                    println!("{role}: {text}");
                }
            }
            "copy" => self.copy_last_reply(),
            "listen" => self.listen(rest).await,
            "music" | "video" | "map" => self.lookup(name, rest).await,
            _ => println!("unknown command :{name} — :help for the list"),
        }
        Flow::Continue
    }

    fn copy_last_reply(&mut self) {
        let Some(turn) = self.session.last_assistant() else {
            println!("nothing to copy yet");
            return;
        };
        let text = copy_text(turn).to_string();
        match Clipboard::new().and_then(|mut c| c.set_text(&text)) {
            Ok(()) => println!("copied"),
            Err(e) => eprintln!("error: {e}"),
        }
    }

    /// Feed a recorded audio file through the voice pipeline.
    async fn listen(&mut self, path: &str) {
        if !self.voice_enabled {
            println!("voice input is disabled; run with --voice");
            return;
        }
        if path.is_empty() {
            println!("usage: :listen <audio-file>");
            return;
        }
        let filename = PathBuf::from(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "audio.wav".to_string());
        match tokio::fs::read(path).await {
            Ok(data) => {
                self.chat_turn(CapturedInput::Audio { data, filename }).await;
            }
            Err(e) => eprintln!("error: failed to read {path}: {e}"),
        }
    }

    async fn lookup(&self, kind: &str, query: &str) {
        if !self.external_enabled {
            println!("external lookups are disabled; run with --external");
            return;
        }
        if query.is_empty() {
            println!("usage: :{kind} <query>");
            return;
        }
        let result = match kind {
            "music" => self.lookups.music(query).await,
            "video" => self.lookups.video(query).await,
            _ => self.lookups.place(query).await,
        };
        println!("{result}");
    }
}

fn prompt() {
    print!("you> ");
    let _ = std::io::stdout().flush();
}

fn print_help() {
    println!("  :history          show the conversation so far");
    println!("  :copy             copy the last reply to the clipboard");
    println!("  :listen <file>    transcribe an audio file as your input");
    println!("  :music <query>    look up a track");
    println!("  :video <query>    look up a video");
    println!("  :map <query>      look up a place");
    println!("  :quit             exit");
}
