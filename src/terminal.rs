//! Line-oriented terminal client.

use std::io::{BufRead, Write};

use tracing::{error, instrument};

use crate::games::guessing::{Message, MessageLevel};
use crate::leaderboard::LeaderboardEntry;
use crate::service::GameService;

const LOCAL_SESSION: &str = "local";

const HELP: &str =
    "Commands: <number> to guess, `new [easy|medium|hard]`, `reset`, `leaderboard`, `quit`";

/// A parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new game.
    New(Option<String>),
    /// Abandon the current game.
    Reset,
    /// Show the top ten.
    Leaderboard,
    /// Print help.
    Help,
    /// Leave.
    Quit,
    /// Anything else is submitted as a guess.
    Guess(String),
}

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next().map(str::to_ascii_lowercase).as_deref() {
            Some("new") | Some("start") => Command::New(words.next().map(str::to_string)),
            Some("reset") => Command::Reset,
            Some("leaderboard") | Some("top") => Command::Leaderboard,
            Some("help") | Some("?") => Command::Help,
            Some("quit") | Some("exit") => Command::Quit,
            _ => Command::Guess(line.to_string()),
        }
    }
}

fn render_message<W: Write>(out: &mut W, message: &Message) -> std::io::Result<()> {
    let tag = match message.level {
        MessageLevel::Info => "info",
        MessageLevel::Success => "success",
        MessageLevel::Warning => "warning",
        MessageLevel::Error => "error",
    };
    writeln!(out, "[{}] {}", tag, message.text)
}

/// Writes the leaderboard as a numbered table.
pub fn render_leaderboard<W: Write>(
    out: &mut W,
    entries: &[LeaderboardEntry],
) -> std::io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No scores yet.");
    }
    writeln!(out, "Rank  Difficulty  Attempts")?;
    for (rank, entry) in entries.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<10}  {:>8}",
            rank + 1,
            entry.difficulty().to_string(),
            entry.attempts()
        )?;
    }
    Ok(())
}

/// Plays games reading commands from `input` and writing to `out` until
/// `quit` or end of input.
///
/// # Errors
///
/// Returns an I/O error if reading input or writing output fails.
#[instrument(skip(service, input, out))]
pub fn play<R: BufRead, W: Write>(
    service: &GameService,
    difficulty: Option<&str>,
    input: R,
    out: &mut W,
) -> std::io::Result<()> {
    writeln!(out, "{}", HELP)?;
    for message in service.start_game(LOCAL_SESSION, difficulty).messages {
        render_message(out, &message)?;
    }

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::New(requested) => {
                let outcome = service.start_game(LOCAL_SESSION, requested.as_deref());
                for message in outcome.messages {
                    render_message(out, &message)?;
                }
            }
            Command::Reset => render_message(out, &service.reset_game(LOCAL_SESSION))?,
            Command::Leaderboard => match service.leaderboard() {
                Ok(entries) => render_leaderboard(out, &entries)?,
                Err(e) => {
                    error!(error = %e, "Leaderboard unavailable");
                    render_message(out, &Message::error("Leaderboard unavailable."))?;
                }
            },
            Command::Guess(raw) => match service.submit_guess(LOCAL_SESSION, &raw) {
                Ok(outcome) => {
                    for message in &outcome.messages {
                        render_message(out, message)?;
                    }
                    if let Some(view) = &outcome.session {
                        writeln!(out, "Attempts left: {}", view.attempts_left)?;
                    } else if outcome.verdict.is_terminal() {
                        writeln!(out, "Type `new` to play again.")?;
                    }
                }
                Err(e) => {
                    if !e.is_recoverable() {
                        error!(error = %e, "Guess failed");
                    }
                    for message in e.messages() {
                        render_message(out, &message)?;
                    }
                }
            },
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("new hard"), Command::New(Some("hard".into())));
        assert_eq!(Command::parse("  NEW "), Command::New(None));
        assert_eq!(Command::parse("reset"), Command::Reset);
        assert_eq!(Command::parse("top"), Command::Leaderboard);
        assert_eq!(Command::parse("quit"), Command::Quit);
        assert_eq!(Command::parse(" 42 "), Command::Guess("42".into()));
        assert_eq!(Command::parse("forty"), Command::Guess("forty".into()));
    }

    #[test]
    fn renders_empty_leaderboard() {
        let mut out = Vec::new();
        render_leaderboard(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No scores yet.\n");
    }
}
