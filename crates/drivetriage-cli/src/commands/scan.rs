//! `drivetriage scan` — list candidate block devices.

use crate::device;

pub fn run() {
    match device::discover() {
        Ok(devices) if devices.is_empty() => {
            println!("No suitable block devices found.");
        }
        Ok(devices) => {
            println!("Candidate devices:");
            for dev in devices {
                println!("  {} ({})", dev.path(), dev.size);
            }
        }
        Err(e) => {
            eprintln!("Error listing block devices: {e}");
            std::process::exit(1);
        }
    }
}
