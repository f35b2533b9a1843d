//! Logical health quantities and their vendor attribute candidate table.
//!
//! SMART attribute IDs are vendor-defined: the same ID can mean different
//! physical quantities on different vendors, and the same quantity can live
//! under several IDs. Every quantity the engine derives is declared here once,
//! together with the ordered list of attribute IDs that may carry it
//! (vendor-preferred first). Resolution and unit transforms live in
//! [`crate::resolve`] and [`crate::normalize`]; this module is pure data.

/// Well-known SMART attribute IDs used by the candidate table.
pub mod id {
    /// Power-on hours counter.
    pub const POWER_ON_HOURS: u8 = 9;
    /// Power cycle count.
    pub const POWER_CYCLES: u8 = 12;
    /// Reallocated sector count.
    pub const REALLOCATED_SECTORS: u8 = 5;
    /// Current pending sector count.
    pub const PENDING_SECTORS: u8 = 197;
    /// Offline uncorrectable sector count.
    pub const UNCORRECTABLE_SECTORS: u8 = 198;
    /// Available reserved space (normalized percent).
    pub const RESERVED_SPACE: u8 = 170;
    /// Temperature. The raw value is a packed min/max/current record.
    pub const TEMPERATURE: u8 = 194;
    /// Samsung Wear_Leveling_Count: remaining life, 100 = new.
    pub const WEAR_LEVELING: u8 = 177;
    /// SSD_Life_Left: remaining life, 100 = new.
    pub const SSD_LIFE_LEFT: u8 = 231;
    /// Intel Media_Wearout_Indicator: remaining life, 100 = new.
    pub const MEDIA_WEAROUT: u8 = 233;
    /// Total LBAs written, or total GB written, depending on vendor.
    pub const TOTAL_LBAS_WRITTEN: u8 = 241;
    /// Crucial/Micron host writes in 32 MiB units.
    pub const HOST_WRITES_32MIB: u8 = 246;
}

/// A canonical, vendor-independent health quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalQuantity {
    /// Fraction of rated write endurance already used, percent.
    WearConsumedPercent,
    /// Total host bytes written over the device lifetime.
    BytesWritten,
    /// Current drive temperature in Celsius.
    TemperatureCelsius,
    /// Sectors remapped to the spare area.
    ReallocatedSectors,
    /// Sectors waiting to be remapped.
    PendingSectors,
    /// Sectors that could not be corrected.
    UncorrectableSectors,
    /// Remaining spare area, percent.
    ReservedSpacePercent,
    /// Lifetime powered-on hours.
    PowerOnHours,
    /// Lifetime power cycle count.
    PowerCycles,
}

impl LogicalQuantity {
    /// Every quantity the engine derives, in report column order.
    pub const ALL: [LogicalQuantity; 9] = [
        LogicalQuantity::PowerOnHours,
        LogicalQuantity::PowerCycles,
        LogicalQuantity::TemperatureCelsius,
        LogicalQuantity::BytesWritten,
        LogicalQuantity::WearConsumedPercent,
        LogicalQuantity::ReservedSpacePercent,
        LogicalQuantity::ReallocatedSectors,
        LogicalQuantity::PendingSectors,
        LogicalQuantity::UncorrectableSectors,
    ];

    /// Candidate attribute IDs for this quantity, vendor-preferred first.
    ///
    /// The order is a contract: the resolver returns the first present
    /// candidate. For [`LogicalQuantity::BytesWritten`] the dedicated 32 MiB
    /// counter (246) outranks the LBA/GB-ambiguous counter (241) because its
    /// unit is unambiguous.
    pub fn candidates(self) -> &'static [u8] {
        match self {
            Self::WearConsumedPercent => &[id::WEAR_LEVELING, id::SSD_LIFE_LEFT, id::MEDIA_WEAROUT],
            Self::BytesWritten => &[id::HOST_WRITES_32MIB, id::TOTAL_LBAS_WRITTEN],
            Self::TemperatureCelsius => &[id::TEMPERATURE],
            Self::ReallocatedSectors => &[id::REALLOCATED_SECTORS],
            Self::PendingSectors => &[id::PENDING_SECTORS],
            Self::UncorrectableSectors => &[id::UNCORRECTABLE_SECTORS],
            Self::ReservedSpacePercent => &[id::RESERVED_SPACE],
            Self::PowerOnHours => &[id::POWER_ON_HOURS],
            Self::PowerCycles => &[id::POWER_CYCLES],
        }
    }

    /// Short machine-greppable label used in warning messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::WearConsumedPercent => "WEAR",
            Self::BytesWritten => "DATA_WRITTEN",
            Self::TemperatureCelsius => "TEMP",
            Self::ReallocatedSectors => "REALLOCATED_SECTORS",
            Self::PendingSectors => "PENDING_SECTORS",
            Self::UncorrectableSectors => "UNCORRECTABLE_SECTORS",
            Self::ReservedSpacePercent => "RESERVED_SPACE",
            Self::PowerOnHours => "POWER_ON_HOURS",
            Self::PowerCycles => "POWER_CYCLES",
        }
    }
}

impl std::fmt::Display for LogicalQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WearConsumedPercent => write!(f, "wear_consumed_pct"),
            Self::BytesWritten => write!(f, "bytes_written"),
            Self::TemperatureCelsius => write!(f, "temperature_c"),
            Self::ReallocatedSectors => write!(f, "reallocated_sectors"),
            Self::PendingSectors => write!(f, "pending_sectors"),
            Self::UncorrectableSectors => write!(f, "uncorrectable_sectors"),
            Self::ReservedSpacePercent => write!(f, "reserved_space_pct"),
            Self::PowerOnHours => write!(f, "power_on_hours"),
            Self::PowerCycles => write!(f, "power_cycles"),
        }
    }
}
