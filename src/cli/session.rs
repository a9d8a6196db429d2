//! Interactive session
//!
//! ```text
//! load -> banner -> startup code -> RUNNING --exit/EOF--> STOPPED -> save
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::dispatch::{dispatch, Console, COMMAND_PROMPT};
use crate::core::persistence;
use crate::core::store::Store;

/// Printed once after the user data is loaded
pub const BANNER: &str = "Scholastic. 2024.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Stopped,
}

pub struct Session<R, W> {
    store: Store,
    console: Console<R, W>,
    rng: StdRng,
    data_path: PathBuf,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Load user data from `data_path` and print the banner
    pub fn open(data_path: impl Into<PathBuf>, console: Console<R, W>) -> Result<Self> {
        let data_path = data_path.into();
        let store = persistence::load(&data_path)
            .with_context(|| format!("Failed to load user data from {}", data_path.display()))?;

        let mut session = Self::with_store(store, data_path, console, StdRng::from_entropy());
        session.console.say(BANNER)?;
        session.console.say("")?;
        Ok(session)
    }

    /// Build a session around an already loaded store
    pub fn with_store(store: Store, data_path: PathBuf, console: Console<R, W>, rng: StdRng) -> Self {
        Self {
            store,
            console,
            rng,
            data_path,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Feed each startup line to the dispatcher, in order
    ///
    /// `exit` here is just an unknown command; it does not stop the session.
    pub fn run_startup<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        for line in lines {
            tracing::debug!(line = line.as_ref(), "startup");
            dispatch(line.as_ref(), &mut self.store, &mut self.console, &mut self.rng)?;
        }
        Ok(())
    }

    /// Read and dispatch lines until `exit` or end of input, then save
    pub fn run(&mut self) -> Result<()> {
        while self.state == SessionState::Running {
            self.step()?;
        }

        persistence::save(&self.data_path, &self.store)
            .with_context(|| format!("Failed to save user data to {}", self.data_path.display()))?;
        Ok(())
    }

    fn step(&mut self) -> Result<()> {
        let Some(line) = self.console.prompt(COMMAND_PROMPT)? else {
            tracing::debug!("input closed");
            self.state = SessionState::Stopped;
            return Ok(());
        };

        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            self.state = SessionState::Stopped;
        } else {
            dispatch(line, &mut self.store, &mut self.console, &mut self.rng)?;
        }
        Ok(())
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }
}
