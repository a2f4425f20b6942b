use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use dictionary::{Dictionary, DictionaryError, LookupResult};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use command::Command;
use config::{Cli, Config};
use render::{Renderer, View};
use speech::Speaker;
use state::{LookupState, Phase, RequestId, Submission};

mod command;
mod config;
mod render;
mod speech;
mod state;
mod utilities;

type Outcome = (RequestId, Result<LookupResult, DictionaryError>);

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::new();
    config.apply(&cli);
    tracing::debug!(?config, "starting");

    let mut session = Session {
        dict: Dictionary::with_base_url(config.api_url.clone()),
        state: LookupState::new(),
        renderer: Renderer::new(config.theme, io::stdout().is_terminal()),
        speaker: speech::speaker_for(config.speech_program.as_deref()),
        speech_rate: config.speech_rate,
    };

    if let Some(word) = &cli.word {
        return define_once(&mut session, word).await;
    }
    run_prompt(session).await?;
    Ok(ExitCode::SUCCESS)
}

struct Session {
    dict: Dictionary,
    state: LookupState,
    renderer: Renderer,
    speaker: Box<dyn Speaker + Send + Sync>,
    speech_rate: f32,
}

impl Session {
    fn show(&self) -> io::Result<()> {
        self.renderer.render(View::of(&self.state), &mut io::stdout().lock())
    }

    fn submit(&mut self, word: &str) -> Option<Submission> {
        let superseding = self.state.is_loading();
        self.state.set_query(word);
        let submission = self.state.submit()?;
        tracing::debug!(request = ?submission.request, word = %submission.word, superseding, "lookup submitted");
        Some(submission)
    }

    fn resolve(&mut self, request: RequestId, outcome: Result<LookupResult, DictionaryError>) -> bool {
        match outcome {
            Ok(result) => self.state.resolve_success(request, result),
            Err(error) => {
                if !matches!(error, DictionaryError::NotFound(_) | DictionaryError::NoDefinition(_)) {
                    tracing::warn!("lookup failed: {error}");
                }
                self.state.resolve_error(request, error.to_string())
            }
        }
    }

    fn speak(&self) {
        match speech::speak_query(self.speaker.as_ref(), self.state.query(), self.speech_rate) {
            Ok(true) => {}
            Ok(false) => println!("Search for a word first."),
            Err(error) => eprintln!("Couldn't pronounce the word: {error}"),
        }
    }
}

async fn define_once(session: &mut Session, word: &str) -> anyhow::Result<ExitCode> {
    let Some(submission) = session.submit(word) else {
        eprintln!("Enter a word to search for.");
        return Ok(ExitCode::FAILURE);
    };
    let outcome = session.dict.lookup(&submission.word).await;
    session.resolve(submission.request, outcome);
    session.show()?;
    match session.state.phase() {
        Phase::Success(_) => Ok(ExitCode::SUCCESS),
        _ => Ok(ExitCode::FAILURE),
    }
}

async fn run_prompt(mut session: Session) -> anyhow::Result<()> {
    let (line_tx, lines) = mpsc::unbounded_channel::<String>();
    // Stdin blocks, so it gets a plain thread that dies with the process.
    std::thread::spawn(move || loop {
        match utilities::read_line() {
            Ok(Some(line)) => {
                if line_tx.send(line).is_err() {
                    break;
                }
            }
            Ok(None) => break,
            Err(error) => {
                tracing::error!("failed to read stdin: {error}");
                break;
            }
        }
    });

    println!("Type a word to look it up, or \"help\" for commands.");
    utilities::prompt(">> ")?;
    prompt_loop(&mut session, lines).await
}

/// Handles prompt lines until `exit` or until input closes. Once input is
/// closed, a lookup still in flight is awaited and shown before returning.
async fn prompt_loop(
    session: &mut Session,
    mut lines: mpsc::UnboundedReceiver<String>,
) -> anyhow::Result<()> {
    let (outcome_tx, mut outcomes) = mpsc::unbounded_channel::<Outcome>();
    loop {
        tokio::select! {
            line = lines.recv() => {
                let Some(line) = line else { break };
                match command::parse(&line) {
                    Some(Command::Exit) => return Ok(()),
                    Some(Command::Define(word)) => match session.submit(&word) {
                        Some(submission) => {
                            session.show()?;
                            spawn_lookup(&session.dict, submission, outcome_tx.clone());
                        }
                        None => println!("{}", DictionaryError::EmptyQuery),
                    },
                    Some(Command::Speak) => session.speak(),
                    Some(Command::Theme) => {
                        session.renderer.theme = session.renderer.theme.toggled();
                        println!("Switched to the {} theme.", session.renderer.theme);
                        session.show()?;
                    }
                    Some(Command::Help) => println!("{}", command::HELP),
                    None => {}
                }
            }
            Some((request, outcome)) = outcomes.recv() => {
                if !session.resolve(request, outcome) {
                    continue;
                }
                println!();
                session.show()?;
            }
        }
        utilities::prompt(">> ")?;
    }

    // Only spawned lookups hold senders now, so `recv` ends once they all report.
    drop(outcome_tx);
    while session.state.is_loading() {
        let Some((request, outcome)) = outcomes.recv().await else {
            break;
        };
        if session.resolve(request, outcome) {
            println!();
            session.show()?;
        }
    }
    Ok(())
}

fn spawn_lookup(dict: &Dictionary, submission: Submission, outcomes: mpsc::UnboundedSender<Outcome>) {
    let dict = dict.clone();
    tokio::spawn(async move {
        let outcome = dict.lookup(&submission.word).await;
        // The receiver only goes away when the prompt is closing.
        let _ = outcomes.send((submission.request, outcome));
    });
}

#[cfg(test)]
mod tests {
    use dictionary::Url;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    const RUN_BODY: &str = r#"[{
        "word": "run",
        "meanings": [{
            "partOfSpeech": "verb",
            "definitions": [
                {"definition": "move fast", "example": "He can run fast."},
                {"definition": "operate", "example": null}
            ],
            "synonyms": ["sprint"]
        }]
    }]"#;

    /// Answers one request with `RUN_BODY` after a short delay.
    async fn slow_server() -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{RUN_BODY}",
                RUN_BODY.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        Url::parse(&format!("http://{address}/api/v2/entries/en")).unwrap()
    }

    fn session(api_url: Url) -> Session {
        Session {
            dict: Dictionary::with_base_url(api_url),
            state: LookupState::new(),
            renderer: Renderer::new(render::Theme::Light, false),
            speaker: Box::new(speech::NoopSpeaker),
            speech_rate: speech::DEFAULT_RATE,
        }
    }

    #[tokio::test]
    async fn closed_input_waits_for_the_lookup_in_flight() {
        let mut session = session(slow_server().await);
        let (line_tx, lines) = mpsc::unbounded_channel();
        line_tx.send("run\n".to_owned()).unwrap();
        drop(line_tx);

        prompt_loop(&mut session, lines).await.unwrap();

        match session.state.phase() {
            Phase::Success(result) => {
                assert_eq!(result.meaning, "move fast");
                assert_eq!(result.synonyms, vec!["sprint".to_owned()]);
            }
            other => panic!("expected a result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_define_leaves_state_idle() {
        // Nothing listens here; a request would end in an error phase.
        let mut session = session(Url::parse("http://127.0.0.1:9/entries").unwrap());
        let (line_tx, lines) = mpsc::unbounded_channel();
        line_tx.send("define\n".to_owned()).unwrap();
        drop(line_tx);

        prompt_loop(&mut session, lines).await.unwrap();

        assert_eq!(session.state.phase(), &Phase::Idle);
    }
}
