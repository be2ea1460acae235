// Device error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Device error code constants
///
/// Error code range: 4001-4005
pub struct DeviceErrorCodes {}

impl DeviceErrorCodes {
    /// No input device with the requested name is present
    pub const NOT_FOUND: i32 = 4001;

    /// Reading from or opening the device failed
    pub const IO: i32 = 4002;

    /// A finite source ran out of events
    pub const STREAM_ENDED: i32 = 4003;

    /// A replay fixture could not be parsed
    pub const FIXTURE: i32 = 4004;

    /// Source is not available on this platform
    pub const UNSUPPORTED: i32 = 4005;
}

/// Log a device error with structured context
pub fn log_device_error(err: &DeviceError, context: &str) {
    error!(
        "Device error in {}: code={}, component=EventSource, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by board event sources
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceError {
    /// No device matched the requested name
    NotFound { name: String },

    /// I/O error from the input subsystem
    Io { details: String },

    /// Replay or simulation has no further events
    StreamEnded,

    /// Malformed replay fixture line
    Fixture { line: usize, reason: String },

    /// Backend unavailable on this build target
    Unsupported { reason: String },
}

impl ErrorCode for DeviceError {
    fn code(&self) -> i32 {
        match self {
            DeviceError::NotFound { .. } => DeviceErrorCodes::NOT_FOUND,
            DeviceError::Io { .. } => DeviceErrorCodes::IO,
            DeviceError::StreamEnded => DeviceErrorCodes::STREAM_ENDED,
            DeviceError::Fixture { .. } => DeviceErrorCodes::FIXTURE,
            DeviceError::Unsupported { .. } => DeviceErrorCodes::UNSUPPORTED,
        }
    }

    fn message(&self) -> String {
        match self {
            DeviceError::NotFound { name } => format!("No input device named {:?}", name),
            DeviceError::Io { details } => format!("Input device I/O error: {}", details),
            DeviceError::StreamEnded => "Event stream ended before the session finished".to_string(),
            DeviceError::Fixture { line, reason } => {
                format!("Invalid fixture line {}: {}", line, reason)
            }
            DeviceError::Unsupported { reason } => format!("Unsupported source: {}", reason),
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DeviceError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for DeviceError {}

/// Convert from std::io::Error to DeviceError
impl From<std::io::Error> for DeviceError {
    fn from(err: std::io::Error) -> Self {
        DeviceError::Io {
            details: err.to_string(),
        }
    }
}
