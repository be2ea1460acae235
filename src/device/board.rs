//! Balance board backed by a Linux evdev node.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use evdev::Device;

use crate::device::codes;
use crate::device::EventSource;
use crate::error::DeviceError;
use crate::measurement::RawEvent;

/// Exclusive handle to a connected balance board.
pub struct BalanceBoard {
    path: PathBuf,
    device: Option<Device>,
    pending: VecDeque<RawEvent>,
}

impl BalanceBoard {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DeviceError> {
        let device = Device::open(path.as_ref())?;
        Ok(Self::from_parts(path.as_ref().to_path_buf(), device))
    }

    fn from_parts(path: PathBuf, device: Device) -> Self {
        Self {
            path,
            device: Some(device),
            pending: VecDeque::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSource for BalanceBoard {
    /// Blocks in the kernel read until the board reports something.
    fn next_event(&mut self) -> Result<RawEvent, DeviceError> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Ok(event);
            }

            let device = self.device.as_mut().ok_or_else(|| DeviceError::Io {
                details: format!("{} already closed", self.path.display()),
            })?;

            for event in device.fetch_events()? {
                self.pending
                    .push_back(codes::decode(event.event_type().0, event.code(), event.value()));
            }
        }
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        if self.device.take().is_some() {
            log::debug!("[BalanceBoard] Closed {}", self.path.display());
        }
        self.pending.clear();
        Ok(())
    }
}

/// Scan input devices once for a board with the given name.
pub fn find_board(name: &str) -> Option<BalanceBoard> {
    evdev::enumerate()
        .find(|(_, device)| device.name() == Some(name))
        .map(|(path, device)| {
            log::info!("[BalanceBoard] Found {:?} at {}", name, path.display());
            BalanceBoard::from_parts(path, device)
        })
}

/// Block until a board with the given name appears.
///
/// There is no timeout; the caller is an interactive user who is expected
/// to switch the board on.
pub fn wait_for_board(name: &str, poll_interval: Duration) -> BalanceBoard {
    loop {
        if let Some(board) = find_board(name) {
            return board;
        }
        thread::sleep(poll_interval);
    }
}
