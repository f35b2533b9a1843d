//! # drivetriage-core
//!
//! **Vendor-heterogeneous SMART telemetry in, comparable health records out.**
//!
//! SMART attribute IDs are reused by different vendors for different
//! physical quantities, some values must be inverted, some unit-converted by
//! magnitude heuristics, and any field may be absent. This crate is the
//! rules-based interpreter that turns that mess into a small set of
//! canonical health metrics: wear-consumed percentage, bytes written,
//! temperature, sector-error counts, and a pass/fail verdict.
//!
//! ## Quick Start
//!
//! ```
//! use drivetriage_core::{NormalizerConfig, TelemetryDocument, evaluate, evaluate_thresholds};
//!
//! let doc = TelemetryDocument::from_json(
//!     r#"{"model_name": "X", "smart_status": {"passed": true},
//!         "temperature": {"current": 35},
//!         "ata_smart_attributes": {"table": [
//!             {"id": 231, "value": 99, "raw": {"value": 99}}
//!         ]}}"#,
//! ).unwrap();
//!
//! let record = evaluate(&doc, &NormalizerConfig::default());
//! assert_eq!(record.wear_consumed_pct.value, Some(1));
//!
//! let warnings = evaluate_thresholds(&record);
//! assert!(warnings.iter().all(|w| w.severity == drivetriage_core::Severity::Info));
//! ```
//!
//! ## Architecture
//!
//! Document → Resolver → Normalizer → Record builder → Threshold evaluator
//!
//! The flow is one-way and every stage is pure: no clock, no shared state,
//! no I/O. Each device's document is processed independently, so concurrent
//! evaluation across devices needs no locking, and a malformed document
//! fails only its own device's evaluation.

pub mod document;
pub mod normalize;
pub mod quantity;
pub mod record;
pub mod report;
pub mod resolve;
pub mod threshold;

pub use document::{DocumentError, RawAttribute, TelemetryDocument};
pub use normalize::{CanonicalValue, Normalized, NormalizerConfig, normalize};
pub use quantity::LogicalQuantity;
pub use record::{HealthRecord, HealthStatus, evaluate};
pub use report::{COLUMNS, ReportRow};
pub use resolve::resolve;
pub use threshold::{Severity, Warning, evaluate_thresholds};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
