// Post-measurement actions
//
// Once a weight is known the CLI can switch the board off by disconnecting
// it over Bluetooth, and hand the weight to a user command. Both run after
// the result is reported; their failures never invalidate the measurement.

mod address;

use std::process::{Command, Output};

use crate::error::ActionError;

pub use address::BluetoothAddress;

/// Placeholder replaced with the formatted weight in user commands
pub const WEIGHT_PLACEHOLDER: &str = "{weight}";

/// Format a weight the way it is printed and passed to commands
pub fn format_weight(weight: f64) -> String {
    format!("{:.1}", weight)
}

/// Substitute every `{weight}` placeholder in `template`
pub fn render_command(template: &str, weight: f64) -> String {
    template.replace(WEIGHT_PLACEHOLDER, &format_weight(weight))
}

/// Ask BlueZ to drop the board connection so it powers off.
///
/// Output of `bluetoothctl` is captured and only logged.
pub fn disconnect(address: &BluetoothAddress) -> Result<(), ActionError> {
    let address = address.to_string();
    let output = Command::new("/usr/bin/env")
        .args(["bluetoothctl", "disconnect", &address])
        .output()
        .map_err(|err| ActionError::Spawn {
            program: "bluetoothctl".to_string(),
            details: err.to_string(),
        })?;

    log::debug!(
        "[disconnect] bluetoothctl stdout: {}",
        String::from_utf8_lossy(&output.stdout).trim()
    );
    check_status(&output)
}

/// Run a user command through `sh -c` with the weight substituted in.
///
/// The command inherits stdout and stderr.
pub fn run_command(template: &str, weight: f64) -> Result<(), ActionError> {
    let command = render_command(template, weight);
    log::info!("[run_command] Running {:?}", command);

    let status = Command::new("sh")
        .arg("-c")
        .arg(&command)
        .status()
        .map_err(|err| ActionError::Spawn {
            program: "sh".to_string(),
            details: err.to_string(),
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(ActionError::CommandFailed {
            status: status.code(),
        })
    }
}

fn check_status(output: &Output) -> Result<(), ActionError> {
    if output.status.success() {
        Ok(())
    } else {
        log::warn!(
            "[disconnect] bluetoothctl stderr: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
        Err(ActionError::CommandFailed {
            status: output.status.code(),
        })
    }
}
