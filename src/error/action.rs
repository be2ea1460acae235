// Post-measurement action error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Action error code constants
///
/// Error code range: 5001-5003
pub struct ActionErrorCodes {}

impl ActionErrorCodes {
    /// Disconnect address is not six colon-separated hex pairs
    pub const INVALID_ADDRESS: i32 = 5001;

    /// Child process could not be started
    pub const SPAWN: i32 = 5002;

    /// Child process exited unsuccessfully
    pub const COMMAND_FAILED: i32 = 5003;
}

/// Log an action error with structured context
pub fn log_action_error(err: &ActionError, context: &str) {
    error!(
        "Action error in {}: code={}, component=PostMeasurement, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors from the disconnect and user-command steps
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// Malformed Bluetooth address
    InvalidAddress { address: String },

    /// Failed to spawn a child process
    Spawn { program: String, details: String },

    /// Child exited with a non-zero or missing status
    CommandFailed { status: Option<i32> },
}

impl ErrorCode for ActionError {
    fn code(&self) -> i32 {
        match self {
            ActionError::InvalidAddress { .. } => ActionErrorCodes::INVALID_ADDRESS,
            ActionError::Spawn { .. } => ActionErrorCodes::SPAWN,
            ActionError::CommandFailed { .. } => ActionErrorCodes::COMMAND_FAILED,
        }
    }

    fn message(&self) -> String {
        match self {
            ActionError::InvalidAddress { address } => {
                format!("Invalid device address to disconnect specified: {:?}", address)
            }
            ActionError::Spawn { program, details } => {
                format!("Failed to run {}: {}", program, details)
            }
            ActionError::CommandFailed { status: Some(code) } => {
                format!("Command exited with status {}", code)
            }
            ActionError::CommandFailed { status: None } => {
                "Command terminated by signal".to_string()
            }
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ActionError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ActionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_error_codes() {
        assert_eq!(
            ActionError::InvalidAddress {
                address: "zz".to_string()
            }
            .code(),
            5001
        );
        assert_eq!(
            ActionError::Spawn {
                program: "sh".to_string(),
                details: "test".to_string()
            }
            .code(),
            5002
        );
        assert_eq!(ActionError::CommandFailed { status: Some(2) }.code(), 5003);
    }

    #[test]
    fn test_command_failed_message() {
        let err = ActionError::CommandFailed { status: Some(2) };
        assert!(err.message().contains("status 2"));

        let err = ActionError::CommandFailed { status: None };
        assert!(err.message().contains("signal"));
    }
}
