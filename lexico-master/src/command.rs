/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Define(String),
    Speak,
    Theme,
    Help,
    Exit,
}

pub const HELP: &str = "\
Commands:
    define <word>   look up a word; typing just the word works too, except
                    for words that are also commands (define help, define say)
    speak           pronounce the last searched word
    theme           switch between the light and dark theme
    help            show this message
    exit, quit      leave";

pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    let mut command_parts = line.split_ascii_whitespace();
    let command = command_parts.next()?;
    let command = match command {
        "exit" | "quit" => Command::Exit,
        "define" | "find" => Command::Define(command_parts.collect::<Vec<&str>>().join(" ")),
        "speak" => Command::Speak,
        "theme" => Command::Theme,
        "help" => Command::Help,
        _ => Command::Define(line.to_owned()),
    };
    Some(command)
}
