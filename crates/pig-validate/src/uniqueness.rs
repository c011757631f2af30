//! Id presence and uniqueness across the whole graph.

use crate::violation::ConstraintViolation;
use pig_model::Package;
use std::collections::BTreeMap;

/// Walk the graph in order; the first missing or repeated id fails.
///
/// Blank ids count as missing.
pub fn check_unique_ids(package: &Package) -> Result<(), ConstraintViolation> {
    let mut first_seen: BTreeMap<&str, usize> = BTreeMap::new();

    for (index, item) in package.graph.iter().enumerate() {
        let id = match item.id() {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                return Err(ConstraintViolation::MissingId {
                    kind: item.item_type(),
                    index,
                });
            }
        };
        if let Some(&first) = first_seen.get(id) {
            return Err(ConstraintViolation::DuplicateId {
                id: id.to_string(),
                first,
                second: index,
            });
        }
        first_seen.insert(id, index);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::StatusCode;
    use serde_json::json;

    fn package(graph: serde_json::Value) -> Package {
        serde_json::from_value(json!({ "graph": graph })).expect("package should parse")
    }

    #[test]
    fn distinct_ids_pass() {
        let package = package(json!([
            {"id": "P1", "itemType": "pig:Property"},
            {"id": "E1", "itemType": "pig:Entity"},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E1"}
        ]));
        assert_eq!(check_unique_ids(&package), Ok(()));
    }

    #[test]
    fn duplicate_reports_both_indices() {
        let package = package(json!([
            {"id": "A", "itemType": "pig:Property"},
            {"id": "B", "itemType": "pig:Link"},
            {"id": "A", "itemType": "pig:Entity"},
            {"id": "B", "itemType": "pig:Entity"}
        ]));
        let violation = check_unique_ids(&package).expect_err("duplicate must fail");
        assert_eq!(
            violation,
            ConstraintViolation::DuplicateId {
                id: "A".to_string(),
                first: 0,
                second: 2,
            }
        );
        assert_eq!(violation.status(), StatusCode::DuplicateId);
    }

    #[test]
    fn missing_id_reports_index() {
        let package = package(json!([
            {"id": "A", "itemType": "pig:Property"},
            {"itemType": "pig:anEntity", "hasClass": "E1"}
        ]));
        let violation = check_unique_ids(&package).expect_err("missing id must fail");
        assert_eq!(violation.status(), StatusCode::MissingId);
        assert!(violation.to_string().contains("graph index 1"));
    }

    #[test]
    fn blank_id_counts_as_missing() {
        let package = package(json!([{"id": "  ", "itemType": "pig:Link"}]));
        assert!(matches!(
            check_unique_ids(&package),
            Err(ConstraintViolation::MissingId { index: 0, .. })
        ));
    }

    #[test]
    fn empty_graph_passes() {
        assert_eq!(check_unique_ids(&Package::default()), Ok(()));
    }
}
