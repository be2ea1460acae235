// Event classification - maps raw board events onto pipeline actions
//
// The board reports each corner sensor on its own channel and closes every
// frame with a report marker. Classification is pure: it never logs and never
// aborts on its own, so the reader decides what each class means for the
// session.

use serde::{Deserialize, Serialize};

/// Raw sensor units per kilogram.
pub const UNITS_PER_KG: f64 = 100.0;

/// One of the board's four pressure sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// All corners in slot order.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// Fixed slot index used by the sample buffer
    pub fn index(self) -> usize {
        match self {
            Corner::TopLeft => 0,
            Corner::TopRight => 1,
            Corner::BottomLeft => 2,
            Corner::BottomRight => 3,
        }
    }
}

/// Channel a raw event arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Corner pressure sensor
    Sensor(Corner),
    /// End-of-frame family; the value distinguishes the variants
    Report,
    /// Kernel dropped events from its buffer
    SyncDropped,
    /// Front button on the board
    Button,
    /// Anything the board is not expected to send
    Unknown { kind: u16, code: u16 },
}

/// Immutable event produced by an event source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEvent {
    pub channel: Channel,
    pub value: i32,
}

impl RawEvent {
    pub fn new(channel: Channel, value: i32) -> Self {
        Self { channel, value }
    }

    pub fn sensor(corner: Corner, value: i32) -> Self {
        Self::new(Channel::Sensor(corner), value)
    }

    /// Normal end-of-frame marker
    pub fn end_of_sample() -> Self {
        Self::new(Channel::Report, REPORT_END_OF_SAMPLE)
    }

    pub fn button(value: i32) -> Self {
        Self::new(Channel::Button, value)
    }
}

const REPORT_END_OF_SAMPLE: i32 = 0;
const REPORT_AMBIGUOUS: i32 = 3;

/// Why an event was dropped without effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SyncDropped,
    /// Report marker carrying value 3
    AmbiguousFrame,
}

/// Classification of a single raw event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventClass {
    /// Corner update in kilograms
    Corner(Corner, f64),
    EndOfSample,
    Abort,
    Ignored(IgnoreReason),
    Unrecognized,
}

/// Classify one raw event.
///
/// Sensor values are converted from raw units to kilograms. A button event
/// of any value is an abort.
pub fn classify(event: &RawEvent) -> EventClass {
    match event.channel {
        Channel::Sensor(corner) => EventClass::Corner(corner, f64::from(event.value) / UNITS_PER_KG),
        Channel::Report => match event.value {
            REPORT_END_OF_SAMPLE => EventClass::EndOfSample,
            REPORT_AMBIGUOUS => EventClass::Ignored(IgnoreReason::AmbiguousFrame),
            _ => EventClass::Unrecognized,
        },
        Channel::SyncDropped => EventClass::Ignored(IgnoreReason::SyncDropped),
        Channel::Button => EventClass::Abort,
        Channel::Unknown { .. } => EventClass::Unrecognized,
    }
}
