// Error types for the weii measurement tool
//
// This module defines custom error types for the measurement core, the board
// device layer, and post-measurement actions, each with stable error codes
// so callers can map failures without matching on message text.

mod action;
mod device;
mod measurement;

pub use action::{log_action_error, ActionError, ActionErrorCodes};
pub use device::{log_device_error, DeviceError, DeviceErrorCodes};
pub use measurement::{log_measurement_error, MeasurementError, MeasurementErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent handling at the CLI
/// boundary.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
