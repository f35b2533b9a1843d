//! Health record assembly: one immutable record per evaluated device.
//!
//! The builder reads identity fields straight from the document and takes
//! the overall verdict only from the device's own reported health status.
//! It never infers a verdict from attribute values; deriving findings from
//! the metrics is the threshold evaluator's job, kept separate so the raw
//! verdict and derived warnings are not conflated.

use serde::{Deserialize, Serialize};

use crate::document::TelemetryDocument;
use crate::normalize::{CanonicalValue, NormalizerConfig, normalize};
use crate::quantity::LogicalQuantity;
use crate::resolve::resolve;
use crate::threshold::Warning;

/// Overall device verdict as reported by the device itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Passed,
    Failed,
    Unknown,
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Passed => write!(f, "PASSED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Normalized health record for one device query.
///
/// Constructed once by [`evaluate`] and never mutated afterwards; it is
/// either persisted or discarded. Two evaluations of the same document with
/// the same config produce identical records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub model: Option<String>,
    pub serial: Option<String>,
    pub firmware: Option<String>,
    /// User capacity in GiB-based GB, rounded to two decimals.
    pub capacity_gb: Option<f64>,
    pub status: HealthStatus,
    /// Last self-test verdict, if the device reported one.
    pub self_test_passed: Option<bool>,

    pub power_on_hours: CanonicalValue,
    pub power_cycles: CanonicalValue,
    pub temperature_c: CanonicalValue,
    pub bytes_written: CanonicalValue,
    pub wear_consumed_pct: CanonicalValue,
    pub reserved_space_pct: CanonicalValue,
    pub reallocated_sectors: CanonicalValue,
    pub pending_sectors: CanonicalValue,
    pub uncorrectable_sectors: CanonicalValue,

    /// Undecoded write counter as reported, for operators comparing against
    /// vendor tools.
    pub write_counter_raw: Option<i64>,
    /// Annotations attached while normalizing (clamps, low-confidence
    /// unit heuristics). Threshold findings are not stored here; they are a
    /// projection computed by [`crate::threshold::evaluate_thresholds`].
    pub annotations: Vec<Warning>,
}

impl HealthRecord {
    /// The canonical value for a quantity.
    pub fn get(&self, quantity: LogicalQuantity) -> &CanonicalValue {
        match quantity {
            LogicalQuantity::PowerOnHours => &self.power_on_hours,
            LogicalQuantity::PowerCycles => &self.power_cycles,
            LogicalQuantity::TemperatureCelsius => &self.temperature_c,
            LogicalQuantity::BytesWritten => &self.bytes_written,
            LogicalQuantity::WearConsumedPercent => &self.wear_consumed_pct,
            LogicalQuantity::ReservedSpacePercent => &self.reserved_space_pct,
            LogicalQuantity::ReallocatedSectors => &self.reallocated_sectors,
            LogicalQuantity::PendingSectors => &self.pending_sectors,
            LogicalQuantity::UncorrectableSectors => &self.uncorrectable_sectors,
        }
    }

    /// Derived terabytes written (decimal TB), rounded to two decimals.
    pub fn tb_written(&self) -> Option<f64> {
        self.bytes_written
            .value
            .map(|bytes| round2(bytes as f64 / 1e12))
    }
}

/// Evaluate one device's telemetry into a health record.
///
/// The single engine entry point: a pure, stateless computation that is safe
/// to call repeatedly, in any order, including concurrently across devices.
/// A failure evaluating one document cannot affect any other evaluation.
pub fn evaluate(doc: &TelemetryDocument, config: &NormalizerConfig) -> HealthRecord {
    let mut annotations = Vec::new();
    let mut canonical = |quantity: LogicalQuantity| -> CanonicalValue {
        let normalized = normalize(doc, quantity, config);
        annotations.extend(normalized.notes);
        normalized.canonical
    };

    let power_on_hours = canonical(LogicalQuantity::PowerOnHours);
    let power_cycles = canonical(LogicalQuantity::PowerCycles);
    let temperature_c = canonical(LogicalQuantity::TemperatureCelsius);
    let bytes_written = canonical(LogicalQuantity::BytesWritten);
    let wear_consumed_pct = canonical(LogicalQuantity::WearConsumedPercent);
    let reserved_space_pct = canonical(LogicalQuantity::ReservedSpacePercent);
    let reallocated_sectors = canonical(LogicalQuantity::ReallocatedSectors);
    let pending_sectors = canonical(LogicalQuantity::PendingSectors);
    let uncorrectable_sectors = canonical(LogicalQuantity::UncorrectableSectors);

    let status = match doc.smart_status.as_ref().and_then(|s| s.passed) {
        Some(true) => HealthStatus::Passed,
        Some(false) => HealthStatus::Failed,
        None => HealthStatus::Unknown,
    };

    let self_test_passed = doc
        .ata_smart_data
        .as_ref()
        .and_then(|d| d.self_test.status.passed);

    let capacity_gb = doc
        .user_capacity
        .as_ref()
        .and_then(|c| c.bytes)
        .map(|bytes| round2(bytes as f64 / (1024.0 * 1024.0 * 1024.0)));

    let write_counter_raw = resolve(doc, LogicalQuantity::BytesWritten)
        .and_then(|(attr, _)| attr.raw_value());

    HealthRecord {
        model: doc.model().map(str::to_string),
        serial: doc.serial_number.clone(),
        firmware: doc.firmware_version.clone(),
        capacity_gb,
        status,
        self_test_passed,
        power_on_hours,
        power_cycles,
        temperature_c,
        bytes_written,
        wear_consumed_pct,
        reserved_space_pct,
        reallocated_sectors,
        pending_sectors,
        uncorrectable_sectors,
        write_counter_raw,
        annotations,
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
