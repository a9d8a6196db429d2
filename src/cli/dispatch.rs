//! Command dispatch
//!
//! Executes one console line against the [`Store`]. Recoverable
//! [`CommandError`]s are printed and swallowed; only console I/O
//! failures reach the caller.

use std::io::{self, BufRead, Write};

use rand::Rng;

use super::command::Command;
use crate::core::entity::EntityKind;
use crate::core::store::Store;
use crate::error::CommandError;

/// Main loop prompt
pub const COMMAND_PROMPT: &str = ">> ";

/// Prompt used by `new` to read entity text
pub const TEXT_PROMPT: &str = "text >> ";

/// Line-oriented console over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` without a newline and read one line
    ///
    /// Returns `None` at end of input. The line terminator is stripped,
    /// other whitespace is kept.
    pub fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print one line
    pub fn say(&mut self, line: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse and run one command line
pub fn dispatch<R, W, G>(
    line: &str,
    store: &mut Store,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let outcome = match Command::parse(line) {
        Ok(command) => {
            tracing::debug!(?command, "dispatching");
            execute(command, store, console, rng)?
        }
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        tracing::debug!(error = ?e, usage = e.is_usage(), "command rejected");
        console.say(e)?;
    }

    Ok(())
}

/// Outer `Result` carries console failures, inner one command failures
fn execute<R, W, G>(
    command: Command,
    store: &mut Store,
    console: &mut Console<R, W>,
    rng: &mut G,
) -> io::Result<Result<(), CommandError>>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    match command {
        Command::Empty | Command::Ignored(_) => {}
        Command::New(kind) => {
            let Some(text) = console.prompt(TEXT_PROMPT)? else {
                tracing::debug!(%kind, "input closed before text was entered");
                return Ok(Ok(()));
            };
            let created = match kind {
                EntityKind::Proposition => store.create_proposition(text).map(|_| ()),
                EntityKind::Question => store.create_question(text).map(|_| ()),
            };
            return Ok(created);
        }
        Command::List(kind) => {
            for entry in store.entries(kind) {
                console.say(format_args!("{}: {}", entry.id, entry.text))?;
            }
        }
        Command::Delete { kind, id } => return Ok(store.delete(kind, id)),
        Command::Random {
            kind,
            unanswered_only,
        } => match store.random(kind, unanswered_only, rng) {
            Ok(entry) => match kind {
                EntityKind::Proposition => {
                    console.say(format_args!("{}: {}", entry.id, entry.text))?
                }
                EntityKind::Question => console.say(format_args!("{} {}", entry.id, entry.text))?,
            },
            Err(e) => return Ok(Err(e)),
        },
        Command::Print(text) => console.say(text)?,
    }

    Ok(Ok(()))
}
