//! smartctl invocation and JSON capture.

use std::io;
use std::process::Command;

/// Query a device's full telemetry as JSON (`smartctl -x -j`).
///
/// smartctl sets exit-status bits for drives that are failing or whose
/// self-assessment tripped, which is exactly the population being triaged,
/// so a nonzero exit is tolerated as long as a JSON payload came back.
pub fn query_device(device: &str) -> io::Result<String> {
    let output = Command::new("smartctl")
        .args(["-x", "-j", device])
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if stdout.trim().is_empty() {
        return Err(io::Error::other(format!(
            "smartctl produced no output for {device} (exit status {})",
            output.status
        )));
    }

    if !output.status.success() {
        log::debug!(
            "smartctl exited with {} for {device}, payload kept",
            output.status
        );
    }

    Ok(stdout)
}
