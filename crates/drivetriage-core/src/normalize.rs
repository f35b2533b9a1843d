//! Unit and semantics normalization, one policy per logical quantity.
//!
//! This is where vendor-heterogeneous counters become comparable numbers:
//! remaining-life percentages are inverted into wear consumed, the
//! bytes-written counter's unit is disambiguated by magnitude, and packed
//! temperature records are decoded through a fallback chain. Everything here
//! is deterministic: identical document and config in, bit-identical
//! canonical values out. No clock, no randomness, no external lookups.

use serde::{Deserialize, Serialize};

use crate::document::TelemetryDocument;
use crate::quantity::{LogicalQuantity, id};
use crate::resolve::resolve;
use crate::threshold::{Severity, Warning};

/// Tunable normalization policy.
///
/// The LBA/GB magnitude cutoff is a heuristic, not a law of physics, so it
/// is configuration rather than a hard-coded constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Attribute 241 raw values above this are treated as LBA counts;
    /// values at or below it as GB. Boundary inclusive on the GB side.
    pub write_unit_threshold: i64,
    /// Raw values within this fraction of the threshold get a
    /// lower-confidence annotation.
    pub ambiguity_margin: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            write_unit_threshold: 100_000,
            ambiguity_margin: 0.10,
        }
    }
}

/// A normalized, vendor-independent value for one quantity.
///
/// Invariant: `value` and `source` are absent together, except for
/// quantities sourced from top-level document fields (temperature), where
/// `source` stays `None` while `value` is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalValue {
    pub quantity: LogicalQuantity,
    pub value: Option<i64>,
    /// The attribute ID the value was derived from, when attribute-sourced.
    pub source: Option<u8>,
}

impl CanonicalValue {
    fn absent(quantity: LogicalQuantity) -> Self {
        Self {
            quantity,
            value: None,
            source: None,
        }
    }

    fn from_attribute(quantity: LogicalQuantity, value: i64, source: u8) -> Self {
        Self {
            quantity,
            value: Some(value),
            source: Some(source),
        }
    }

    fn direct(quantity: LogicalQuantity, value: i64) -> Self {
        Self {
            quantity,
            value: Some(value),
            source: None,
        }
    }

    /// Render the value, with absent values as the literal `N/A`.
    pub fn render(&self) -> String {
        match self.value {
            Some(v) => v.to_string(),
            None => "N/A".to_string(),
        }
    }
}

/// A canonical value plus any annotations produced while deriving it
/// (out-of-range clamps, low-confidence unit heuristics).
#[derive(Debug, Clone)]
pub struct Normalized {
    pub canonical: CanonicalValue,
    pub notes: Vec<Warning>,
}

impl Normalized {
    fn clean(canonical: CanonicalValue) -> Self {
        Self {
            canonical,
            notes: Vec::new(),
        }
    }
}

/// Derive the canonical value for one quantity from a telemetry document.
pub fn normalize(
    doc: &TelemetryDocument,
    quantity: LogicalQuantity,
    config: &NormalizerConfig,
) -> Normalized {
    match quantity {
        LogicalQuantity::WearConsumedPercent => wear_consumed(doc),
        LogicalQuantity::TemperatureCelsius => temperature(doc),
        LogicalQuantity::BytesWritten => bytes_written(doc, config),
        _ => passthrough(doc, quantity),
    }
}

/// Wear consumed = 100 - vendor-reported remaining life.
///
/// All candidate attributes (177/231/233) report remaining life in their
/// normalized value: 100 = new, 0 = worn out. Inputs outside [0, 100] clamp
/// to the domain boundary and attach a WARN; an out-of-range reading never
/// propagates out of range.
fn wear_consumed(doc: &TelemetryDocument) -> Normalized {
    let quantity = LogicalQuantity::WearConsumedPercent;
    let Some((attr, matched)) = resolve(doc, quantity) else {
        return Normalized::clean(CanonicalValue::absent(quantity));
    };
    let Some(remaining) = attr.value else {
        return Normalized::clean(CanonicalValue::absent(quantity));
    };

    let wear = 100 - remaining;
    let clamped = wear.clamp(0, 100);
    let mut notes = Vec::new();
    if clamped != wear {
        log::warn!("wear value {wear} out of range, clamped to {clamped}");
        notes.push(Warning::new(
            Some(quantity),
            Severity::Warn,
            format!("WEAR_OUT_OF_RANGE:{wear}"),
        ));
    }

    Normalized {
        canonical: CanonicalValue::from_attribute(quantity, clamped, matched),
        notes,
    }
}

/// Current temperature in Celsius.
///
/// The raw integer of attribute 194 is frequently a packed min/max/current
/// record and must never be used directly. Preference order:
/// 1. the document's direct temperature field, used verbatim;
/// 2. the leading integer of the vendor's raw string ("36 (Min/Max 21/45)");
/// 3. the low byte of the raw counter, where current temperature lives.
fn temperature(doc: &TelemetryDocument) -> Normalized {
    let quantity = LogicalQuantity::TemperatureCelsius;

    if let Some(current) = doc.direct_temperature() {
        return Normalized::clean(CanonicalValue::direct(quantity, current));
    }

    let Some((attr, matched)) = resolve(doc, quantity) else {
        return Normalized::clean(CanonicalValue::absent(quantity));
    };

    if let Some(celsius) = attr.raw_string().and_then(leading_integer) {
        return Normalized::clean(CanonicalValue::from_attribute(quantity, celsius, matched));
    }

    if let Some(raw) = attr.raw_value() {
        log::debug!("temperature from low byte of packed raw value {raw}");
        let low_byte = (raw as u64 & 0xFF) as i64;
        return Normalized::clean(CanonicalValue::from_attribute(quantity, low_byte, matched));
    }

    Normalized::clean(CanonicalValue::absent(quantity))
}

/// Total host bytes written, unit-disambiguated by magnitude.
///
/// Attribute 246 (32 MiB units, Crucial/Micron) has an unambiguous unit and
/// is preferred whenever present. Attribute 241 stores LBAs on some vendors
/// (Samsung/Intel) and GB on others (WD/Kingston/SanDisk) with no unit
/// field, so magnitude decides: raw counts above the configured threshold
/// read as LBAs, at or below it as GB. Values near the cutoff get a
/// lower-confidence annotation.
fn bytes_written(doc: &TelemetryDocument, config: &NormalizerConfig) -> Normalized {
    let quantity = LogicalQuantity::BytesWritten;
    let Some((attr, matched)) = resolve(doc, quantity) else {
        return Normalized::clean(CanonicalValue::absent(quantity));
    };
    let Some(raw) = attr.raw_value() else {
        return Normalized::clean(CanonicalValue::absent(quantity));
    };

    if matched == id::HOST_WRITES_32MIB {
        let bytes = raw.saturating_mul(32 * 1024 * 1024);
        return Normalized::clean(CanonicalValue::from_attribute(quantity, bytes, matched));
    }

    let threshold = config.write_unit_threshold;
    let bytes = if raw > threshold {
        raw.saturating_mul(512)
    } else {
        raw.saturating_mul(1_000_000_000)
    };

    let mut notes = Vec::new();
    let distance = (raw as f64 - threshold as f64).abs();
    if distance <= threshold as f64 * config.ambiguity_margin {
        log::debug!("write counter {raw} near unit threshold {threshold}");
        notes.push(Warning::new(
            Some(quantity),
            Severity::Info,
            format!("WRITE_UNIT_AMBIGUOUS:{raw}"),
        ));
    }

    Normalized {
        canonical: CanonicalValue::from_attribute(quantity, bytes, matched),
        notes,
    }
}

/// Direct passthrough of the resolved field, no transform.
fn passthrough(doc: &TelemetryDocument, quantity: LogicalQuantity) -> Normalized {
    let Some((attr, matched)) = resolve(doc, quantity) else {
        return Normalized::clean(CanonicalValue::absent(quantity));
    };

    // Reserved space is a normalized percentage; the counters live in the
    // raw value.
    let value = match quantity {
        LogicalQuantity::ReservedSpacePercent => attr.value,
        _ => attr.raw_value(),
    };

    match value {
        Some(v) => Normalized::clean(CanonicalValue::from_attribute(quantity, v, matched)),
        None => Normalized::clean(CanonicalValue::absent(quantity)),
    }
}

/// Best-effort extraction of a leading unsigned integer from a vendor
/// string. Returns `None` rather than failing on anything unexpected.
fn leading_integer(s: &str) -> Option<i64> {
    let digits: &str = {
        let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        &s[..end]
    };
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(json: &str) -> TelemetryDocument {
        TelemetryDocument::from_json(json).unwrap()
    }

    fn config() -> NormalizerConfig {
        NormalizerConfig::default()
    }

    // -----------------------------------------------------------------------
    // Wear consumed
    // -----------------------------------------------------------------------

    #[test]
    fn wear_is_inverted_remaining_life() {
        for remaining in 0..=100 {
            let d = doc(&format!(
                r#"{{"ata_smart_attributes": {{"table": [{{"id": 231, "value": {remaining}}}]}}}}"#
            ));
            let n = normalize(&d, LogicalQuantity::WearConsumedPercent, &config());
            assert_eq!(n.canonical.value, Some(100 - remaining));
            assert!(n.notes.is_empty());
        }
    }

    #[test]
    fn wear_99_remaining_is_1_consumed() {
        let d = doc(r#"{"ata_smart_attributes": {"table": [{"id": 231, "value": 99}]}}"#);
        let n = normalize(&d, LogicalQuantity::WearConsumedPercent, &config());
        assert_eq!(n.canonical.value, Some(1));
        assert_eq!(n.canonical.source, Some(231));
    }

    #[test]
    fn wear_out_of_range_clamps_and_warns() {
        // Remaining life 253 is a common bogus normalized value; wear would
        // be -153 and must clamp to 0.
        let d = doc(r#"{"ata_smart_attributes": {"table": [{"id": 177, "value": 253}]}}"#);
        let n = normalize(&d, LogicalQuantity::WearConsumedPercent, &config());
        assert_eq!(n.canonical.value, Some(0));
        assert_eq!(n.notes.len(), 1);
        assert_eq!(n.notes[0].severity, Severity::Warn);
        assert_eq!(n.notes[0].message, "WEAR_OUT_OF_RANGE:-153");

        let d = doc(r#"{"ata_smart_attributes": {"table": [{"id": 177, "value": -40}]}}"#);
        let n = normalize(&d, LogicalQuantity::WearConsumedPercent, &config());
        assert_eq!(n.canonical.value, Some(100));
        assert_eq!(n.notes.len(), 1);
    }

    #[test]
    fn wear_absent_is_na_without_notes() {
        let n = normalize(&doc("{}"), LogicalQuantity::WearConsumedPercent, &config());
        assert_eq!(n.canonical.value, None);
        assert_eq!(n.canonical.source, None);
        assert!(n.notes.is_empty());
    }

    // -----------------------------------------------------------------------
    // Temperature
    // -----------------------------------------------------------------------

    #[test]
    fn direct_temperature_wins_over_packed_attribute() {
        // Packed raw value disagrees with the direct field; direct wins.
        let d = doc(
            r#"{"temperature": {"current": 35},
                "ata_smart_attributes": {"table": [
                    {"id": 194, "raw": {"value": 131108, "string": "42 (Min/Max 20/55)"}}
                ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::TemperatureCelsius, &config());
        assert_eq!(n.canonical.value, Some(35));
        // Direct-sourced: no attribute ID.
        assert_eq!(n.canonical.source, None);
    }

    #[test]
    fn temperature_falls_back_to_raw_string() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 194, "raw": {"value": 131108, "string": "36 (Min/Max 21/45)"}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::TemperatureCelsius, &config());
        assert_eq!(n.canonical.value, Some(36));
        assert_eq!(n.canonical.source, Some(194));
    }

    #[test]
    fn temperature_falls_back_to_low_byte() {
        // 0x2_0024 packs current temp 0x24 = 36 in the low byte.
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 194, "raw": {"value": 131108}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::TemperatureCelsius, &config());
        assert_eq!(n.canonical.value, Some(131108 & 0xFF));
    }

    #[test]
    fn unparseable_temperature_string_falls_through_to_low_byte() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 194, "raw": {"value": 40, "string": "(packed)"}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::TemperatureCelsius, &config());
        assert_eq!(n.canonical.value, Some(40));
    }

    #[test]
    fn temperature_all_sources_absent_is_na() {
        let n = normalize(&doc("{}"), LogicalQuantity::TemperatureCelsius, &config());
        assert_eq!(n.canonical.value, None);
    }

    // -----------------------------------------------------------------------
    // Bytes written
    // -----------------------------------------------------------------------

    #[test]
    fn lba_magnitude_multiplies_by_sector_size() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 241, "raw": {"value": 48828125000}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::BytesWritten, &config());
        assert_eq!(n.canonical.value, Some(48_828_125_000 * 512));
        assert_eq!(n.canonical.source, Some(241));
        assert!(n.notes.is_empty());
    }

    #[test]
    fn gb_magnitude_multiplies_by_billion() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 241, "raw": {"value": 14000}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::BytesWritten, &config());
        assert_eq!(n.canonical.value, Some(14_000 * 1_000_000_000));
    }

    #[test]
    fn threshold_boundary_is_gb_inclusive() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 241, "raw": {"value": 100000}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::BytesWritten, &config());
        assert_eq!(n.canonical.value, Some(100_000 * 1_000_000_000));

        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 241, "raw": {"value": 100001}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::BytesWritten, &config());
        assert_eq!(n.canonical.value, Some(100_001 * 512));
    }

    #[test]
    fn dedicated_32mib_counter_preferred_over_ambiguous() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 241, "raw": {"value": 999999999}},
                {"id": 246, "raw": {"value": 1000000}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::BytesWritten, &config());
        assert_eq!(n.canonical.source, Some(246));
        assert_eq!(n.canonical.value, Some(1_000_000 * 32 * 1024 * 1024));
        assert!(n.notes.is_empty());
    }

    #[test]
    fn near_threshold_values_are_annotated() {
        for (raw, annotated) in [
            (89_999i64, false),
            (90_000, true),
            (100_000, true),
            (110_000, true),
            (110_001, false),
        ] {
            let d = doc(&format!(
                r#"{{"ata_smart_attributes": {{"table": [
                    {{"id": 241, "raw": {{"value": {raw}}}}}
                ]}}}}"#
            ));
            let n = normalize(&d, LogicalQuantity::BytesWritten, &config());
            assert_eq!(
                n.notes.iter().any(|w| w.severity == Severity::Info),
                annotated,
                "raw={raw}"
            );
        }
    }

    #[test]
    fn threshold_is_configurable() {
        let cfg = NormalizerConfig {
            write_unit_threshold: 1_000,
            ambiguity_margin: 0.0,
        };
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 241, "raw": {"value": 5000}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::BytesWritten, &cfg);
        assert_eq!(n.canonical.value, Some(5_000 * 512));
    }

    // -----------------------------------------------------------------------
    // Passthrough
    // -----------------------------------------------------------------------

    #[test]
    fn counters_pass_through_raw_values() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 9, "value": 95, "raw": {"value": 17482}},
                {"id": 12, "value": 99, "raw": {"value": 1211}},
                {"id": 5, "value": 100, "raw": {"value": 0}}
            ]}}"#,
        );
        assert_eq!(
            normalize(&d, LogicalQuantity::PowerOnHours, &config()).canonical.value,
            Some(17482)
        );
        assert_eq!(
            normalize(&d, LogicalQuantity::PowerCycles, &config()).canonical.value,
            Some(1211)
        );
        assert_eq!(
            normalize(&d, LogicalQuantity::ReallocatedSectors, &config()).canonical.value,
            Some(0)
        );
    }

    #[test]
    fn reserved_space_uses_normalized_value() {
        let d = doc(
            r#"{"ata_smart_attributes": {"table": [
                {"id": 170, "value": 98, "raw": {"value": 55834640384}}
            ]}}"#,
        );
        let n = normalize(&d, LogicalQuantity::ReservedSpacePercent, &config());
        assert_eq!(n.canonical.value, Some(98));
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    #[test]
    fn leading_integer_extraction() {
        assert_eq!(leading_integer("36 (Min/Max 21/45)"), Some(36));
        assert_eq!(leading_integer("0"), Some(0));
        assert_eq!(leading_integer("(Min/Max)"), None);
        assert_eq!(leading_integer(""), None);
    }
}
