//! # Adventure Shell
//!
//! Console front end for the campus adventure: world loading with command-line
//! overrides, and the read-eval-print loop that doubles as the prompt responder.

use adventure_rules::{LocationId, Prompt, Responder, Session, World, WorldConfig, WorldError};
use log::warn;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Errors that stop the shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("world error: {0}")]
    World(#[from] WorldError),
}

pub type ShellResult<T> = Result<T, ShellError>;

/// Where the world comes from and what to override in it.
#[derive(Debug, Clone, Default)]
pub struct WorldOptions {
    /// TOML or JSON world file; the built-in campus when absent.
    pub path: Option<PathBuf>,
    pub start: Option<u32>,
    pub moves: Option<i32>,
}

impl WorldOptions {
    /// Load the world and apply the overrides.
    pub fn build(&self) -> ShellResult<World> {
        let mut config = match &self.path {
            Some(path) => WorldConfig::load(path)?,
            None => WorldConfig::campus()?,
        };
        if let Some(start) = self.start {
            config.start = LocationId(start);
        }
        if let Some(moves) = self.moves {
            config.moves = moves;
        }
        Ok(World::from_config(config)?)
    }
}

/// Interactive console over any line reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console reading from `input` and writing to `output`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Hand back the writer.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Next trimmed line, or `None` at end of input.
    fn read_line(&mut self) -> ShellResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn show_actions(&mut self, session: &Session) -> ShellResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "What to do? Choose from:")?;
        for action in session.available_actions()? {
            writeln!(self.output, "- {action}")?;
        }
        write!(self.output, "\nEnter action: ")?;
        self.output.flush()?;
        Ok(())
    }

    /// Play until the session ends or input runs out.
    pub fn play(&mut self, session: &mut Session) -> ShellResult<()> {
        writeln!(self.output, "{}", session.opening())?;

        while session.is_ongoing() {
            self.show_actions(session)?;
            let Some(line) = self.read_line()? else {
                break;
            };
            let resolution = session.resolve(&line, self)?;
            for text in &resolution.narration {
                writeln!(self.output, "{text}")?;
            }
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Responder for Console<R, W> {
    fn respond(&mut self, prompt: &Prompt) -> Option<String> {
        let asked = write!(self.output, "{} ", prompt.text()).and_then(|_| self.output.flush());
        if let Err(err) = asked {
            warn!("could not show prompt: {err}");
            return None;
        }
        match self.read_line() {
            Ok(answer) => answer,
            Err(err) => {
                warn!("could not read answer: {err}");
                None
            }
        }
    }
}
