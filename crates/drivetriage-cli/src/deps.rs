//! Prerequisite checks: smartctl on PATH, root privileges.

use std::env;
use std::path::Path;

/// Check if a program exists somewhere on PATH.
pub fn command_exists(program: &str) -> bool {
    if let Ok(path) = env::var("PATH") {
        for dir in path.split(':') {
            let full_path = Path::new(dir).join(program);
            if full_path.exists() && full_path.is_file() {
                return true;
            }
        }
    }
    false
}

/// Reading SMART data through a USB-SATA bridge needs raw device access.
pub fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

/// Verify prerequisites, printing install/sudo hints for anything missing.
pub fn check() -> bool {
    let mut ok = true;

    if !command_exists("smartctl") {
        eprintln!("ERROR: smartctl not found. Please install smartmontools:");
        eprintln!("  Ubuntu/Debian: sudo apt-get install smartmontools");
        eprintln!("  Fedora/RHEL:   sudo dnf install smartmontools");
        ok = false;
    }

    if !is_root() {
        eprintln!("ERROR: reading SMART data requires root privileges.");
        eprintln!("Please run with: sudo drivetriage test");
        ok = false;
    }

    ok
}
