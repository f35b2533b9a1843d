//! Attribute resolver: first present candidate wins.
//!
//! Absence is the normal case, not an error. A drive that does not report a
//! quantity under any candidate ID resolves to `None`, which downstream
//! becomes an N/A canonical value.

use crate::document::{RawAttribute, TelemetryDocument};
use crate::quantity::LogicalQuantity;

/// Look up a logical quantity across its vendor candidate IDs.
///
/// Probes the quantity's candidates in priority order and returns the first
/// attribute present in the document together with the ID that matched.
/// Pure lookup, no side effects.
pub fn resolve(
    doc: &TelemetryDocument,
    quantity: LogicalQuantity,
) -> Option<(&RawAttribute, u8)> {
    for &id in quantity.candidates() {
        if let Some(attr) = doc.attribute(id) {
            log::debug!("{quantity} resolved from attribute {id}");
            return Some((attr, id));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_attrs(ids: &[u8]) -> TelemetryDocument {
        let table: Vec<String> = ids
            .iter()
            .map(|id| format!(r#"{{"id": {id}, "value": 99, "raw": {{"value": 7}}}}"#))
            .collect();
        let json = format!(
            r#"{{"ata_smart_attributes": {{"table": [{}]}}}}"#,
            table.join(",")
        );
        TelemetryDocument::from_json(&json).unwrap()
    }

    #[test]
    fn first_present_candidate_wins() {
        // Wear candidates are [177, 231, 233]; with 177 and 231 both present
        // the match must be 177.
        let doc = doc_with_attrs(&[231, 177]);
        let (_, id) = resolve(&doc, LogicalQuantity::WearConsumedPercent).unwrap();
        assert_eq!(id, 177);
    }

    #[test]
    fn lower_priority_candidate_matches_when_alone() {
        let doc = doc_with_attrs(&[233]);
        let (_, id) = resolve(&doc, LogicalQuantity::WearConsumedPercent).unwrap();
        assert_eq!(id, 233);
    }

    #[test]
    fn absent_quantity_resolves_to_none() {
        let doc = doc_with_attrs(&[9, 12]);
        assert!(resolve(&doc, LogicalQuantity::WearConsumedPercent).is_none());
    }

    #[test]
    fn empty_document_resolves_everything_to_none() {
        let doc = TelemetryDocument::default();
        for q in LogicalQuantity::ALL {
            assert!(resolve(&doc, q).is_none());
        }
    }
}
