//! Raw telemetry document model, mirroring `smartctl -x -j` output.
//!
//! The document is treated as an opaque, possibly-incomplete mapping: every
//! field is independently optional and absent fields stay absent rather than
//! being guessed. Unknown JSON fields are ignored, since smartctl emits far
//! more than the engine consumes.

use serde::{Deserialize, Serialize};

/// Failure to interpret one device's telemetry.
///
/// Malformed input is a hard failure for that single device only; it must
/// never abort the evaluation of other devices.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The payload was not parseable as a telemetry document.
    #[error("malformed telemetry document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One SMART attribute row as reported by the device.
///
/// `name` is vendor-reported and informational only; identification goes by
/// `id`. Either the normalized `value` or the `raw` payload may be absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAttribute {
    pub id: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub raw: Option<RawPayload>,
}

/// The `raw` object of an attribute row: a 48-bit counter plus the vendor's
/// textual rendering of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPayload {
    #[serde(default)]
    pub value: Option<i64>,
    #[serde(default)]
    pub string: Option<String>,
}

impl RawAttribute {
    /// The raw counter value, if reported.
    pub fn raw_value(&self) -> Option<i64> {
        self.raw.as_ref().and_then(|r| r.value)
    }

    /// The vendor's textual rendering of the raw value, if reported.
    pub fn raw_string(&self) -> Option<&str> {
        self.raw.as_ref().and_then(|r| r.string.as_deref())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCapacity {
    #[serde(default)]
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmartStatus {
    #[serde(default)]
    pub passed: Option<bool>,
}

/// Direct temperature block. `current` avoids the packed multi-byte encoding
/// of attribute 194 and is preferred whenever present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Temperature {
    #[serde(default)]
    pub current: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeTable {
    #[serde(default)]
    pub table: Vec<RawAttribute>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfTestStatus {
    #[serde(default)]
    pub passed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelfTest {
    #[serde(default)]
    pub status: SelfTestStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AtaSmartData {
    #[serde(default)]
    pub self_test: SelfTest,
}

/// One device query's structured telemetry, as produced by the external
/// diagnostic tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelemetryDocument {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub model_family: Option<String>,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub firmware_version: Option<String>,
    #[serde(default)]
    pub user_capacity: Option<UserCapacity>,
    #[serde(default)]
    pub smart_status: Option<SmartStatus>,
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default)]
    pub ata_smart_attributes: Option<AttributeTable>,
    #[serde(default)]
    pub ata_smart_data: Option<AtaSmartData>,
}

impl TelemetryDocument {
    /// Parse a telemetry document from the diagnostic tool's JSON output.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up an attribute by ID in the reported table.
    ///
    /// Duplicate IDs resolve to the first occurrence, matching the table
    /// order the device reported.
    pub fn attribute(&self, id: u8) -> Option<&RawAttribute> {
        self.ata_smart_attributes
            .as_ref()?
            .table
            .iter()
            .find(|attr| attr.id == id)
    }

    /// Model name, falling back to the model family when the name is absent.
    pub fn model(&self) -> Option<&str> {
        self.model_name
            .as_deref()
            .or(self.model_family.as_deref())
    }

    /// Direct current-temperature field, if reported.
    pub fn direct_temperature(&self) -> Option<i64> {
        self.temperature.as_ref()?.current
    }
}
