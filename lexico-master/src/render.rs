use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use dictionary::{Difficulty, LookupResult};

use crate::state::{LookupState, Phase};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                accent: "\x1b[35m",
                muted: "\x1b[90m",
                error: "\x1b[31m",
            },
            Theme::Dark => Palette {
                accent: "\x1b[95m",
                muted: "\x1b[37m",
                error: "\x1b[91m",
            },
        }
    }

    fn difficulty_color(self, difficulty: Difficulty) -> &'static str {
        match (self, difficulty) {
            (Theme::Light, Difficulty::Beginner) => "\x1b[32m",
            (Theme::Light, Difficulty::Intermediate) => "\x1b[33m",
            (Theme::Light, Difficulty::Advanced) => "\x1b[31m",
            (Theme::Dark, Difficulty::Beginner) => "\x1b[92m",
            (Theme::Dark, Difficulty::Intermediate) => "\x1b[93m",
            (Theme::Dark, Difficulty::Advanced) => "\x1b[91m",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown theme {0:?}, expected \"light\" or \"dark\"")]
pub struct UnknownTheme(String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match &s.trim().to_ascii_lowercase()[..] {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownTheme(s.to_owned())),
        }
    }
}

struct Palette {
    accent: &'static str,
    muted: &'static str,
    error: &'static str,
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// What the screen shows for a given state. Exactly one of these at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View<'a> {
    Idle,
    Spinner(&'a str),
    ErrorBanner(&'a str),
    Result(&'a LookupResult),
}

impl<'a> View<'a> {
    pub fn of(state: &'a LookupState) -> Self {
        match state.phase() {
            Phase::Idle => View::Idle,
            Phase::Loading { word, .. } => View::Spinner(word),
            Phase::Error(message) => View::ErrorBanner(message),
            Phase::Success(result) => View::Result(result),
        }
    }
}

pub struct Renderer {
    pub theme: Theme,
    /// Emit ANSI colour codes
    pub color: bool,
}

impl Renderer {
    pub fn new(theme: Theme, color: bool) -> Self {
        Self { theme, color }
    }

    pub fn render(&self, view: View<'_>, out: &mut impl Write) -> io::Result<()> {
        match view {
            View::Idle => Ok(()),
            View::Spinner(word) => {
                writeln!(out, "{}Searching for \"{word}\"...{}", self.muted(), self.reset())
            }
            View::ErrorBanner(message) => {
                writeln!(out, "{}! {message}{}", self.paint(self.theme.palette().error), self.reset())
            }
            View::Result(result) => self.render_result(result, out),
        }
    }

    fn render_result(&self, result: &LookupResult, out: &mut impl Write) -> io::Result<()> {
        let accent = self.paint(self.theme.palette().accent);
        let reset = self.reset();
        write!(out, "{}{accent}{}{reset}", self.bold(), result.word)?;
        if !result.pronunciation.is_empty() {
            write!(out, "  {}{}{reset}", self.muted(), result.pronunciation)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "{}{}{reset} · {}{}{reset}",
            self.muted(),
            result.part_of_speech,
            self.paint(self.theme.difficulty_color(result.difficulty)),
            result.difficulty,
        )?;
        writeln!(out)?;
        writeln!(out, "  {}", result.meaning)?;

        if !result.synonyms.is_empty() {
            writeln!(out)?;
            writeln!(out, "  {accent}Synonyms:{reset} {}", result.synonyms.join(", "))?;
        }
        if !result.antonyms.is_empty() {
            writeln!(out)?;
            writeln!(out, "  {accent}Antonyms:{reset} {}", result.antonyms.join(", "))?;
        }
        if !result.examples.is_empty() {
            writeln!(out)?;
            writeln!(out, "  {accent}Examples:{reset}")?;
            for (index, example) in result.examples.iter().enumerate() {
                writeln!(out, "    {}. \"{example}\"", index + 1)?;
            }
        }
        Ok(())
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.color {
            code
        } else {
            ""
        }
    }

    fn muted(&self) -> &'static str {
        self.paint(self.theme.palette().muted)
    }

    fn bold(&self) -> &'static str {
        self.paint(BOLD)
    }

    fn reset(&self) -> &'static str {
        self.paint(RESET)
    }
}
