//! Subcommand implementations.

pub mod report;
pub mod scan;

use std::io::{self, Write};

use drivetriage_core::NormalizerConfig;

/// Normalizer config with the CLI's threshold override applied.
pub fn make_config(write_unit_threshold: i64) -> NormalizerConfig {
    NormalizerConfig {
        write_unit_threshold,
        ..NormalizerConfig::default()
    }
}

/// Prompt on stdout and read one trimmed line. `None` on EOF.
pub fn prompt(message: &str) -> Option<String> {
    print!("{message}");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}
