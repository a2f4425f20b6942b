use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Words are pronounced a little slower than normal speech.
pub const DEFAULT_RATE: f32 = 0.8;

/// Words per minute of espeak and `say` at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

const PROGRAMS: [&str; 3] = ["espeak-ng", "espeak", "say"];

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

pub trait Speaker {
    /// Pronounces `text`; `rate` is relative to the program's normal speed.
    fn speak(&self, text: &str, rate: f32) -> Result<(), SpeechError>;
}

/// Used when no speech program is available.
pub struct NoopSpeaker;

impl Speaker for NoopSpeaker {
    fn speak(&self, _text: &str, _rate: f32) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Pronounces words by launching an external text to speech program.
pub struct CommandSpeaker {
    program: PathBuf,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn args(&self, text: &str, rate: f32) -> Vec<OsString> {
        let words_per_minute = (BASE_WORDS_PER_MINUTE * rate).round().max(1.0) as u32;
        let speed_flag = match self.program.file_stem().and_then(|stem| stem.to_str()) {
            Some("say") => "-r",
            _ => "-s",
        };
        vec![
            speed_flag.into(),
            words_per_minute.to_string().into(),
            "--".into(),
            text.into(),
        ]
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str, rate: f32) -> Result<(), SpeechError> {
        let mut child = Command::new(&self.program)
            .args(self.args(text, rate))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SpeechError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;
        // Playback runs in the background, reap the process once it finishes.
        std::thread::spawn(move || child.wait());
        Ok(())
    }
}

pub fn speaker_for(program: Option<&Path>) -> Box<dyn Speaker + Send + Sync> {
    match program {
        Some(program) => Box::new(CommandSpeaker::new(program)),
        None => Box::new(NoopSpeaker),
    }
}

/// Pronounces the query unless it is blank. Returns whether speech was requested.
pub fn speak_query(speaker: &dyn Speaker, query: &str, rate: f32) -> Result<bool, SpeechError> {
    if query.trim().is_empty() {
        return Ok(false);
    }
    speaker.speak(query, rate)?;
    Ok(true)
}

/// First known speech program found on `PATH`.
pub fn find_program() -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    find_program_in(env::split_paths(&path))
}

fn find_program_in(dirs: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    let dirs: Vec<PathBuf> = dirs.into_iter().collect();
    PROGRAMS.iter().find_map(|program| {
        dirs.iter()
            .map(|dir| dir.join(program).with_extension(env::consts::EXE_EXTENSION))
            .find(|candidate| candidate.is_file())
    })
}
