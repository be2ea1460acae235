//! Event source abstractions for the balance board.
//!
//! The measurement core only sees [`EventSource`]. Hardware access, file
//! replay and the simulated board all live behind it.

use crate::error::DeviceError;
use crate::measurement::RawEvent;

pub mod codes;
mod replay;
mod simulated;

pub use replay::ReplaySource;
pub use simulated::{SimulatedBoard, SimulationProfile};

#[cfg(target_os = "linux")]
mod board;
#[cfg(target_os = "linux")]
pub use board::{find_board, wait_for_board, BalanceBoard};

/// Name the kernel driver gives the board
pub const BOARD_DEVICE_NAME: &str = "Nintendo Wii Remote Balance Board";

/// Blocking source of raw board events.
///
/// `next_event` blocks until an event is available; it never returns an
/// empty result. Hardware sources may block indefinitely. Finite sources
/// return [`DeviceError::StreamEnded`] once exhausted.
///
/// `close` releases the underlying handle. Implementations in this crate
/// make it idempotent.
pub trait EventSource {
    fn next_event(&mut self) -> Result<RawEvent, DeviceError>;
    fn close(&mut self) -> Result<(), DeviceError>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_event(&mut self) -> Result<RawEvent, DeviceError> {
        (**self).next_event()
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        (**self).close()
    }
}
