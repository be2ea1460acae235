// Measurement error types and constants

use crate::error::{DeviceError, ErrorCode};
use log::error;
use std::fmt;

/// Measurement error code constants
///
/// Error code range: 3001-3006
pub struct MeasurementErrorCodes {}

impl MeasurementErrorCodes {
    /// User pressed the board button while a session was running
    pub const ABORTED: i32 = 3001;

    /// Estimator was handed an empty sample set
    pub const NO_SAMPLES: i32 = 3002;

    /// Sample target must be at least one
    pub const INVALID_TARGET: i32 = 3003;

    /// Threshold must be a finite, non-negative weight
    pub const INVALID_THRESHOLD: i32 = 3004;

    /// Underlying event source failed
    pub const DEVICE: i32 = 3005;

    /// Adjustment must be a finite weight
    pub const INVALID_ADJUST: i32 = 3006;
}

/// Log a measurement error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_measurement_error(err: &MeasurementError, context: &str) {
    error!(
        "Measurement error in {}: code={}, component=MeasurementSession, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Measurement-related errors
///
/// Only fatal conditions are represented here. Board noise (dropped syncs,
/// incomplete frames, unrecognized events) is absorbed inside the pipeline
/// and never surfaces as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MeasurementError {
    /// Board button pressed mid-measurement
    Aborted,

    /// No samples were collected before estimation
    NoSamples,

    /// Sample target of zero was requested
    InvalidTarget { target: usize },

    /// Threshold is negative or not finite
    InvalidThreshold { threshold: f64 },

    /// Event source failed while reading or closing
    Device { details: String },

    /// Adjustment is NaN or infinite
    InvalidAdjust { adjust: f64 },
}

impl ErrorCode for MeasurementError {
    fn code(&self) -> i32 {
        match self {
            MeasurementError::Aborted => MeasurementErrorCodes::ABORTED,
            MeasurementError::NoSamples => MeasurementErrorCodes::NO_SAMPLES,
            MeasurementError::InvalidTarget { .. } => MeasurementErrorCodes::INVALID_TARGET,
            MeasurementError::InvalidThreshold { .. } => MeasurementErrorCodes::INVALID_THRESHOLD,
            MeasurementError::Device { .. } => MeasurementErrorCodes::DEVICE,
            MeasurementError::InvalidAdjust { .. } => MeasurementErrorCodes::INVALID_ADJUST,
        }
    }

    fn message(&self) -> String {
        match self {
            MeasurementError::Aborted => {
                "User pressed board button while measuring, aborting.".to_string()
            }
            MeasurementError::NoSamples => "No samples collected, cannot estimate weight".to_string(),
            MeasurementError::InvalidTarget { target } => {
                format!("Sample target must be at least 1 (got {})", target)
            }
            MeasurementError::InvalidThreshold { threshold } => {
                format!(
                    "Threshold must be a finite, non-negative weight (got {})",
                    threshold
                )
            }
            MeasurementError::Device { details } => format!("Board error: {}", details),
            MeasurementError::InvalidAdjust { adjust } => {
                format!("Adjustment must be a finite weight (got {})", adjust)
            }
        }
    }
}

impl fmt::Display for MeasurementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MeasurementError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for MeasurementError {}

impl From<DeviceError> for MeasurementError {
    fn from(err: DeviceError) -> Self {
        MeasurementError::Device {
            details: err.message(),
        }
    }
}
