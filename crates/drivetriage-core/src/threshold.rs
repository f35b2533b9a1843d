//! Threshold evaluator: flags canonical values outside safe ranges.
//!
//! Pure projection over a completed [`HealthRecord`]; never mutates the
//! record and never alters the underlying canonical values. Quantities that
//! resolved to N/A produce no WARN or CRITICAL entry (absence is not
//! evidence of a problem) but do emit an INFO note so "could not be
//! assessed" stays distinguishable from "measured safe" downstream.

use serde::{Deserialize, Serialize};

use crate::quantity::LogicalQuantity;
use crate::record::{HealthRecord, HealthStatus};

// Policy cutoffs. Sector-error counts warn on any nonzero value.
const WEAR_WARN_PCT: i64 = 70;
const WEAR_CRITICAL_PCT: i64 = 90;
const TEMP_WARN_C: i64 = 60;
const TEMP_CRITICAL_C: i64 = 70;

/// Warning severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single derived finding about a health record.
///
/// `quantity` is `None` for record-level findings (overall SMART verdict).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub quantity: Option<LogicalQuantity>,
    pub message: String,
    pub severity: Severity,
}

impl Warning {
    pub fn new(
        quantity: Option<LogicalQuantity>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            quantity,
            message: message.into(),
            severity,
        }
    }
}

/// Evaluate threshold policy over a completed health record.
pub fn evaluate_thresholds(record: &HealthRecord) -> Vec<Warning> {
    let mut warnings = Vec::new();

    if record.status == HealthStatus::Failed {
        warnings.push(Warning::new(
            None,
            Severity::Critical,
            "SMART_HEALTH_FAILED",
        ));
    }

    for quantity in [
        LogicalQuantity::ReallocatedSectors,
        LogicalQuantity::PendingSectors,
        LogicalQuantity::UncorrectableSectors,
    ] {
        match record.get(quantity).value {
            Some(count) if count > 0 => warnings.push(Warning::new(
                Some(quantity),
                Severity::Warn,
                format!("{}:{count}", quantity.label()),
            )),
            Some(_) => {}
            None => warnings.push(not_assessed(quantity)),
        }
    }

    match record.wear_consumed_pct.value {
        Some(wear) if wear >= WEAR_CRITICAL_PCT => warnings.push(Warning::new(
            Some(LogicalQuantity::WearConsumedPercent),
            Severity::Critical,
            format!("HIGH_WEAR:{wear}%"),
        )),
        Some(wear) if wear >= WEAR_WARN_PCT => warnings.push(Warning::new(
            Some(LogicalQuantity::WearConsumedPercent),
            Severity::Warn,
            format!("HIGH_WEAR:{wear}%"),
        )),
        Some(_) => {}
        None => warnings.push(not_assessed(LogicalQuantity::WearConsumedPercent)),
    }

    match record.temperature_c.value {
        Some(temp) if temp >= TEMP_CRITICAL_C => warnings.push(Warning::new(
            Some(LogicalQuantity::TemperatureCelsius),
            Severity::Critical,
            format!("HIGH_TEMP:{temp}C"),
        )),
        Some(temp) if temp >= TEMP_WARN_C => warnings.push(Warning::new(
            Some(LogicalQuantity::TemperatureCelsius),
            Severity::Warn,
            format!("HIGH_TEMP:{temp}C"),
        )),
        Some(_) => {}
        None => warnings.push(not_assessed(LogicalQuantity::TemperatureCelsius)),
    }

    warnings
}

fn not_assessed(quantity: LogicalQuantity) -> Warning {
    Warning::new(
        Some(quantity),
        Severity::Info,
        format!("{}_NOT_ASSESSED", quantity.label()),
    )
}
