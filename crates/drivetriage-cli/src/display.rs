//! ANSI-colored terminal report for one tested drive.
//!
//! Colors encode the threshold evaluator's verdicts rather than duplicating
//! its cutoffs: a field is yellow or red exactly when the evaluator flagged
//! its quantity. Color output is gated on stdout being a terminal.

use std::collections::HashMap;
use std::sync::OnceLock;

use drivetriage_core::{
    HealthRecord, HealthStatus, LogicalQuantity, Severity, Warning, evaluate_thresholds,
};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const CYAN: &str = "\x1b[96m";

fn is_tty() -> bool {
    static TTY: OnceLock<bool> = OnceLock::new();
    *TTY.get_or_init(|| unsafe { libc::isatty(libc::STDOUT_FILENO) } == 1)
}

fn paint(text: &str, code: &str) -> String {
    if is_tty() {
        format!("{code}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Color a measured value by the evaluator's verdict for its quantity.
/// Measured-and-unflagged shows green, N/A stays plain.
fn metric(
    record: &HealthRecord,
    quantity: LogicalQuantity,
    worst: &HashMap<LogicalQuantity, Severity>,
    suffix: &str,
) -> String {
    let value = record.get(quantity);
    match value.value {
        None => "N/A".to_string(),
        Some(v) => {
            let text = format!("{v}{suffix}");
            match worst.get(&quantity) {
                Some(Severity::Critical) => paint(&text, RED),
                Some(Severity::Warn) => paint(&text, YELLOW),
                _ => paint(&text, GREEN),
            }
        }
    }
}

/// Print the full drive report.
pub fn print_report(record: &HealthRecord) {
    let findings: Vec<Warning> = {
        let mut all = record.annotations.clone();
        all.extend(evaluate_thresholds(record));
        all
    };

    let mut worst: HashMap<LogicalQuantity, Severity> = HashMap::new();
    for w in &findings {
        if let Some(q) = w.quantity {
            worst
                .entry(q)
                .and_modify(|s| *s = (*s).max(w.severity))
                .or_insert(w.severity);
        }
    }

    let status = match record.status {
        HealthStatus::Passed => paint("PASSED", GREEN),
        HealthStatus::Failed => paint("FAILED", RED),
        HealthStatus::Unknown => "UNKNOWN".to_string(),
    };

    let na = || "N/A".to_string();
    let bar = paint(&"=".repeat(60), BOLD);
    let rule = "-".repeat(60);

    println!();
    println!("{bar}");
    println!("{}", paint("DRIVE TEST RESULTS", BOLD));
    println!("{bar}");
    println!(
        "Model:           {}",
        paint(record.model.as_deref().unwrap_or("N/A"), CYAN)
    );
    println!("Serial:          {}", record.serial.clone().unwrap_or_else(na));
    println!("Firmware:        {}", record.firmware.clone().unwrap_or_else(na));
    println!(
        "Capacity:        {}",
        record
            .capacity_gb
            .map(|c| format!("{c} GB"))
            .unwrap_or_else(na)
    );
    println!("Health Status:   {status}");
    println!("{rule}");
    println!(
        "Power-On Hours:  {}",
        metric(record, LogicalQuantity::PowerOnHours, &worst, "")
    );
    println!(
        "Power Cycles:    {}",
        metric(record, LogicalQuantity::PowerCycles, &worst, "")
    );
    println!(
        "Temperature:     {}",
        metric(record, LogicalQuantity::TemperatureCelsius, &worst, "\u{00b0}C")
    );
    println!(
        "Total Written:   {}",
        record
            .tb_written()
            .map(|tb| format!("{tb} TB"))
            .unwrap_or_else(na)
    );
    println!(
        "Wear Consumed:   {}",
        metric(record, LogicalQuantity::WearConsumedPercent, &worst, "%")
    );
    println!(
        "Reserved Space:  {}",
        metric(record, LogicalQuantity::ReservedSpacePercent, &worst, "%")
    );
    println!("{rule}");
    println!(
        "Reallocated:     {}",
        metric(record, LogicalQuantity::ReallocatedSectors, &worst, "")
    );
    println!(
        "Pending:         {}",
        metric(record, LogicalQuantity::PendingSectors, &worst, "")
    );
    println!(
        "Uncorrectable:   {}",
        metric(record, LogicalQuantity::UncorrectableSectors, &worst, "")
    );
    println!("{rule}");

    let actionable: Vec<&str> = findings
        .iter()
        .filter(|w| w.severity >= Severity::Warn)
        .map(|w| w.message.as_str())
        .collect();
    if actionable.is_empty() {
        println!("Warnings:        {}", paint("None", GREEN));
    } else {
        println!("Warnings:        {}", paint(&actionable.join(", "), RED));
    }

    // Unassessed-quantity notes, kept visually separate from real warnings.
    let notes: Vec<&str> = findings
        .iter()
        .filter(|w| w.severity == Severity::Info)
        .map(|w| w.message.as_str())
        .collect();
    if !notes.is_empty() {
        println!("Notes:           {}", paint(&notes.join(", "), DIM));
    }

    println!("{bar}");
}
