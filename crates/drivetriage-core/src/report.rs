//! Flat tabular projection of a health record.
//!
//! One row per tested device, 18 named columns, absent values rendered as
//! the literal `N/A`. The timestamp is caller-supplied so the engine itself
//! stays clock-free and deterministic.

use serde::{Deserialize, Serialize};

use crate::record::HealthRecord;
use crate::threshold::{Severity, Warning, evaluate_thresholds};

/// Column names, in row order. Doubles as the CSV header.
pub const COLUMNS: [&str; 18] = [
    "timestamp",
    "model",
    "serial",
    "firmware",
    "capacity_gb",
    "health_status",
    "power_on_hours",
    "power_cycles",
    "temperature_c",
    "total_lbas_written",
    "total_tb_written",
    "wear_level_pct",
    "reserved_space_pct",
    "reallocated_sectors",
    "pending_sectors",
    "uncorrectable_sectors",
    "self_test_result",
    "warnings",
];

/// One flat result row, every column pre-rendered as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub timestamp: String,
    pub model: String,
    pub serial: String,
    pub firmware: String,
    pub capacity_gb: String,
    pub health_status: String,
    pub power_on_hours: String,
    pub power_cycles: String,
    pub temperature_c: String,
    pub total_lbas_written: String,
    pub total_tb_written: String,
    pub wear_level_pct: String,
    pub reserved_space_pct: String,
    pub reallocated_sectors: String,
    pub pending_sectors: String,
    pub uncorrectable_sectors: String,
    pub self_test_result: String,
    pub warnings: String,
}

impl ReportRow {
    /// Project a health record into a flat row.
    ///
    /// The warnings column combines normalization annotations and threshold
    /// findings of WARN severity or above, joined with `", "`; INFO notes
    /// are deliberately excluded so an unremarkable drive reads `None`.
    pub fn from_record(record: &HealthRecord, timestamp: impl Into<String>) -> Self {
        let mut findings: Vec<Warning> = record.annotations.clone();
        findings.extend(evaluate_thresholds(record));
        let actionable: Vec<&str> = findings
            .iter()
            .filter(|w| w.severity >= Severity::Warn)
            .map(|w| w.message.as_str())
            .collect();
        let warnings = if actionable.is_empty() {
            "None".to_string()
        } else {
            actionable.join(", ")
        };

        Self {
            timestamp: timestamp.into(),
            model: na_string(record.model.clone()),
            serial: na_string(record.serial.clone()),
            firmware: na_string(record.firmware.clone()),
            capacity_gb: na_f64(record.capacity_gb),
            health_status: record.status.to_string(),
            power_on_hours: record.power_on_hours.render(),
            power_cycles: record.power_cycles.render(),
            temperature_c: record.temperature_c.render(),
            total_lbas_written: match record.write_counter_raw {
                Some(raw) => raw.to_string(),
                None => "N/A".to_string(),
            },
            total_tb_written: na_f64(record.tb_written()),
            wear_level_pct: record.wear_consumed_pct.render(),
            reserved_space_pct: record.reserved_space_pct.render(),
            reallocated_sectors: record.reallocated_sectors.render(),
            pending_sectors: record.pending_sectors.render(),
            uncorrectable_sectors: record.uncorrectable_sectors.render(),
            self_test_result: match record.self_test_passed {
                Some(true) => "PASSED".to_string(),
                Some(false) => "FAILED".to_string(),
                None => "N/A".to_string(),
            },
            warnings,
        }
    }

    /// The CSV header line.
    pub fn header_line() -> String {
        COLUMNS.join(",")
    }

    /// This row as one CSV line, fields escaped where needed.
    pub fn to_csv_line(&self) -> String {
        self.fields()
            .iter()
            .map(|f| csv_escape(f))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// All fields in column order.
    pub fn fields(&self) -> [&str; 18] {
        [
            &self.timestamp,
            &self.model,
            &self.serial,
            &self.firmware,
            &self.capacity_gb,
            &self.health_status,
            &self.power_on_hours,
            &self.power_cycles,
            &self.temperature_c,
            &self.total_lbas_written,
            &self.total_tb_written,
            &self.wear_level_pct,
            &self.reserved_space_pct,
            &self.reallocated_sectors,
            &self.pending_sectors,
            &self.uncorrectable_sectors,
            &self.self_test_result,
            &self.warnings,
        ]
    }
}

fn na_string(v: Option<String>) -> String {
    v.unwrap_or_else(|| "N/A".to_string())
}

fn na_f64(v: Option<f64>) -> String {
    match v {
        Some(n) => format!("{n}"),
        None => "N/A".to_string(),
    }
}

/// Quote a field when it contains a separator, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TelemetryDocument;
    use crate::normalize::NormalizerConfig;
    use crate::record::evaluate;

    fn row(json: &str) -> ReportRow {
        let doc = TelemetryDocument::from_json(json).unwrap();
        let record = evaluate(&doc, &NormalizerConfig::default());
        ReportRow::from_record(&record, "2026-08-06 12:00:00")
    }

    #[test]
    fn header_matches_column_count() {
        assert_eq!(ReportRow::header_line().split(',').count(), COLUMNS.len());
    }

    #[test]
    fn absent_values_render_as_na() {
        let r = row("{}");
        assert_eq!(r.model, "N/A");
        assert_eq!(r.temperature_c, "N/A");
        assert_eq!(r.total_tb_written, "N/A");
        assert_eq!(r.self_test_result, "N/A");
        assert_eq!(r.health_status, "UNKNOWN");
        assert_eq!(r.warnings, "None");
    }

    #[test]
    fn warnings_column_joins_actionable_findings() {
        let r = row(
            r#"{"smart_status": {"passed": false},
                "temperature": {"current": 72},
                "ata_smart_attributes": {"table": [
                    {"id": 5, "raw": {"value": 3}}
                ]}}"#,
        );
        assert!(r.warnings.contains("SMART_HEALTH_FAILED"));
        assert!(r.warnings.contains("REALLOCATED_SECTORS:3"));
        assert!(r.warnings.contains("HIGH_TEMP:72C"));
        // INFO notes (unassessed wear etc.) stay out of the column.
        assert!(!r.warnings.contains("NOT_ASSESSED"));
    }

    #[test]
    fn csv_line_has_one_field_per_column() {
        let r = row(r#"{"model_name": "Samsung SSD 860"}"#);
        assert_eq!(r.to_csv_line().split(',').count(), COLUMNS.len());
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("he said \"hi\""), "\"he said \"\"hi\"\"\"");
        assert_eq!(csv_escape("plain"), "plain");
    }

    #[test]
    fn end_to_end_example_row() {
        let r = row(
            r#"{"model_name": "X", "serial_number": "Y",
                "smart_status": {"passed": true},
                "temperature": {"current": 35},
                "ata_smart_attributes": {"table": [
                    {"id": 231, "value": 99, "raw": {"value": 99}}
                ]}}"#,
        );
        assert_eq!(r.model, "X");
        assert_eq!(r.serial, "Y");
        assert_eq!(r.health_status, "PASSED");
        assert_eq!(r.wear_level_pct, "1");
        assert_eq!(r.temperature_c, "35");
        assert_eq!(r.warnings, "None");
    }
}
