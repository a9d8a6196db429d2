//! CLI module - Process arguments and the interactive command loop

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::Config;
use crate::core::persistence::{self, DATA_FILE_NAME};

pub mod command;
pub mod dispatch;
pub mod session;

use dispatch::Console;
use session::Session;

/// scholastic - Keep track of propositions and questions
///
/// Stores belief statements and open questions in a JSON file and
/// edits them through an interactive command loop.
#[derive(Parser, Debug)]
#[command(name = "scholastic")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// User data file
    #[arg(short, long, env = "SCHOLASTIC_DATA", default_value = DATA_FILE_NAME)]
    pub data: PathBuf,

    /// Config file (default: ./config.json when present)
    #[arg(short, long, env = "SCHOLASTIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Create an empty data file if it does not exist
    #[arg(long)]
    pub auto_init: bool,
}

/// Run a full session on stdin/stdout
pub fn run(cli: Cli) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(cli, stdin.lock(), stdout.lock())
}

/// Run a full session on the given console streams
pub fn run_with<R: BufRead, W: Write>(cli: Cli, input: R, output: W) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    if cli.auto_init && !cli.data.exists() {
        tracing::info!(path = %cli.data.display(), "creating empty user data file");
        persistence::init(&cli.data)?;
    }

    let missing = !cli.data.exists();
    let mut session = Session::open(cli.data, Console::new(input, output))
        .with_context(|| {
            if missing {
                "User data file not found. Create it or use --auto-init."
            } else {
                "Cannot start session"
            }
        })?;
    session.run_startup(&config.startup_code)?;
    session.run()
}
