//! `drivetriage report` — evaluate a saved `smartctl -x -j` capture offline.
//!
//! Useful for re-running normalization over captures collected elsewhere,
//! and for inspecting how a policy change (threshold override) reads an
//! existing capture.

use std::fs;

use drivetriage_core::{ReportRow, TelemetryDocument, evaluate};

use super::make_config;
use crate::csv::{self, CsvSink};
use crate::display;

pub fn run(path: &str, as_json: bool, output: Option<&str>, write_unit_threshold: i64) {
    let payload = match fs::read_to_string(path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    };

    let doc = match TelemetryDocument::from_json(&payload) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {path}: {e}");
            std::process::exit(1);
        }
    };

    let record = evaluate(&doc, &make_config(write_unit_threshold));

    if as_json {
        let json = serde_json::to_string_pretty(&record).expect("health record serializes");
        println!("{json}");
    } else {
        display::print_report(&record);
    }

    if let Some(out) = output {
        let row = ReportRow::from_record(&record, csv::timestamp());
        if let Err(e) = CsvSink::new(out).append(&row) {
            eprintln!("Error writing {out}: {e}");
            std::process::exit(1);
        }
        println!("Row appended to {out}");
    }
}
