//! User-facing output for the CLI.
//!
//! Verbosity is carried by the [`Reporter`] value the binary builds from its
//! flags. Diagnostic logging goes through `tracing` on stderr separately.

use std::io::{self, Write};

use serde::Serialize;

use crate::actions::format_weight;
use crate::measurement::{MeasurementResult, SessionEvent};

/// Terminal bell, rung at the moments the user has to act.
const BELL: &str = "\x07";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Only the final weight
    Terse,
    /// Progress messages plus the final weight
    Verbose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct ResultPayload<'a> {
    weight: f64,
    #[serde(flatten)]
    result: &'a MeasurementResult,
}

/// Writes progress and results for one CLI run.
pub struct Reporter<W: Write> {
    verbosity: Verbosity,
    format: OutputFormat,
    out: W,
}

impl Reporter<io::Stdout> {
    pub fn stdout(verbosity: Verbosity, format: OutputFormat) -> Self {
        Self::new(verbosity, format, io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(verbosity: Verbosity, format: OutputFormat, out: W) -> Self {
        Self {
            verbosity,
            format,
            out,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn chatty(&self) -> bool {
        self.verbosity == Verbosity::Verbose && self.format == OutputFormat::Text
    }

    /// Progress message, suppressed in terse and JSON modes
    pub fn status(&mut self, message: &str) -> io::Result<()> {
        if self.chatty() {
            writeln!(self.out, "{}", message)?;
            self.out.flush()?;
        }
        Ok(())
    }

    pub fn waiting_for_board(&mut self) -> io::Result<()> {
        self.status("Waiting for balance board...")
    }

    pub fn board_found(&mut self) -> io::Result<()> {
        self.status(&format!("{}Balance board found, please step on.", BELL))
    }

    pub fn disconnecting(&mut self) -> io::Result<()> {
        self.status("Disconnecting...")
    }

    pub fn session_event(&mut self, event: SessionEvent) -> io::Result<()> {
        match event {
            SessionEvent::MeasurementStarted => {
                self.status(&format!("{}Measurement started, please wait...", BELL))
            }
            SessionEvent::SteppedOff => self.status("User stepped off."),
            SessionEvent::TargetReached => Ok(()),
        }
    }

    /// Final weight, printed in every mode
    pub fn result(&mut self, result: &MeasurementResult) -> io::Result<()> {
        match (self.format, self.verbosity) {
            (OutputFormat::Json, _) => {
                let payload = ResultPayload {
                    weight: result.adjusted,
                    result,
                };
                let json = serde_json::to_string(&payload).map_err(io::Error::other)?;
                writeln!(self.out, "{}", json)?;
            }
            (OutputFormat::Text, Verbosity::Terse) => {
                writeln!(self.out, "{}", format_weight(result.adjusted))?;
            }
            (OutputFormat::Text, Verbosity::Verbose) => {
                writeln!(
                    self.out,
                    "{}Done, weight: {}.",
                    BELL,
                    format_weight(result.adjusted)
                )?;
            }
        }
        self.out.flush()
    }
}
