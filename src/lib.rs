// weii - balance board weight measurement
// Sensor fusion pipeline turning raw corner events into one stable weight

// Module declarations
pub mod actions;
pub mod config;
pub mod device;
pub mod error;
pub mod measurement;
pub mod output;

// Re-exports for convenience
pub use measurement::{measure_weight, MeasurementResult, MeasurementSettings};
