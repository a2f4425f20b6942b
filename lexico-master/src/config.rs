use std::env;
use std::path::PathBuf;

use clap::Parser;
use dictionary::{Url, DICTIONARY_API_URL};

use crate::render::Theme;
use crate::speech::{self, DEFAULT_RATE};

/// Look up english words from the terminal.
#[derive(Debug, Parser)]
#[command(name = "lexico-master", version, about)]
pub struct Cli {
    /// Look up a single word and exit instead of starting the prompt
    pub word: Option<String>,

    /// Colour theme to start with
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Base url of a dictionaryapi.dev compatible server
    #[arg(long)]
    pub api_url: Option<Url>,

    /// Never pronounce words, even if a speech program is installed
    #[arg(long)]
    pub no_speech: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub theme: Theme,
    /// Playback speed relative to the speech program's default
    pub speech_rate: f32,
    /// Program used to pronounce words, `None` disables speech
    pub speech_program: Option<PathBuf>,
}

impl Config {
    pub fn new() -> Self {
        let api_url = env::var("LEXICO_API_URL")
            .ok()
            .and_then(|v| Url::parse(&v).ok())
            .unwrap_or_else(default_api_url);

        let theme = env::var("LEXICO_THEME")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let speech_rate = env::var("LEXICO_SPEECH_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|rate: &f32| *rate > 0.0)
            .unwrap_or(DEFAULT_RATE);

        let speech_program = match env::var("LEXICO_SPEECH_PROGRAM") {
            Ok(program) if !program.trim().is_empty() => Some(PathBuf::from(program.trim())),
            _ => speech::find_program(),
        };

        Config {
            api_url,
            theme,
            speech_rate,
            speech_program,
        }
    }

    /// Command line flags take precedence over the environment.
    pub fn apply(&mut self, cli: &Cli) {
        if let Some(theme) = cli.theme {
            self.theme = theme;
        }
        if let Some(api_url) = &cli.api_url {
            self.api_url = api_url.clone();
        }
        if cli.no_speech {
            self.speech_program = None;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_api_url() -> Url {
    Url::parse(DICTIONARY_API_URL).expect("default api url is valid")
}
