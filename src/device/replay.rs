use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::device::codes;
use crate::device::EventSource;
use crate::error::DeviceError;
use crate::measurement::RawEvent;

/// One line of a replay fixture, in kernel input-event terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(rename = "type")]
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

impl From<WireEvent> for RawEvent {
    fn from(wire: WireEvent) -> Self {
        codes::decode(wire.kind, wire.code, wire.value)
    }
}

/// Replays a recorded event stream.
///
/// Fixtures are JSON Lines, one `{"type":..,"code":..,"value":..}` object per
/// line; blank lines are skipped. Once the events run out the source reports
/// [`DeviceError::StreamEnded`] instead of blocking.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    events: VecDeque<RawEvent>,
    closed: bool,
}

impl ReplaySource {
    pub fn from_events(events: impl IntoIterator<Item = RawEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            closed: false,
        }
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, DeviceError> {
        let mut events = VecDeque::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let wire: WireEvent =
                serde_json::from_str(trimmed).map_err(|err| DeviceError::Fixture {
                    line: index + 1,
                    reason: err.to_string(),
                })?;
            events.push_back(RawEvent::from(wire));
        }

        log::debug!("[ReplaySource] Loaded {} events", events.len());
        Ok(Self {
            events,
            closed: false,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let file = File::open(path.as_ref()).map_err(|err| DeviceError::Io {
            details: format!("{}: {}", path.as_ref().display(), err),
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Events not yet consumed
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl EventSource for ReplaySource {
    fn next_event(&mut self) -> Result<RawEvent, DeviceError> {
        self.events.pop_front().ok_or(DeviceError::StreamEnded)
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.closed = true;
        Ok(())
    }
}
