//! Typed reference resolution: hasClass, specializes, link class references.
//!
//! One generic rule, [`check_reference`], instantiated per reference kind:
//! an absent reference fails only when mandatory, a present one must resolve
//! to an item of exactly the expected kind.

use crate::index::TypeIndex;
use crate::violation::{ConstraintViolation, Subject};
use pig_model::{Item, ItemType, Package};

pub const FIELD_HAS_CLASS: &str = "hasClass";
pub const FIELD_SPECIALIZES: &str = "specializes";
pub const FIELD_ID_REF: &str = "idRef";

/// Whether an absent reference is itself a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Mandatory,
    Optional,
}

pub fn check_reference(
    subject: &Subject,
    field: &'static str,
    reference: Option<&str>,
    expected: ItemType,
    presence: Presence,
    types: &TypeIndex<'_>,
) -> Result<(), ConstraintViolation> {
    let Some(target) = reference else {
        return match presence {
            Presence::Mandatory => Err(ConstraintViolation::MissingReference {
                subject: subject.clone(),
                field,
            }),
            Presence::Optional => Ok(()),
        };
    };

    match types.get(target) {
        None => Err(ConstraintViolation::ReferenceNotFound {
            subject: subject.clone(),
            field,
            target: target.to_string(),
            expected,
        }),
        Some(found) if found != expected => Err(ConstraintViolation::ReferenceKindMismatch {
            subject: subject.clone(),
            field,
            target: target.to_string(),
            expected,
            found,
        }),
        Some(_) => Ok(()),
    }
}

/// Every aProperty's hasClass must name a Property.
pub fn check_property_classes(
    package: &Package,
    types: &TypeIndex<'_>,
) -> Result<(), ConstraintViolation> {
    for (_, instance) in package.instances() {
        for (index, value) in instance.properties().iter().enumerate() {
            let subject = Subject::attachment(ItemType::AProperty, instance.label(), index);
            check_reference(
                &subject,
                FIELD_HAS_CLASS,
                value.has_class.as_deref(),
                ItemType::Property,
                Presence::Mandatory,
                types,
            )?;
        }
    }
    Ok(())
}

/// Every aSourceLink/aTargetLink must name a Link and point somewhere.
pub fn check_link_classes(
    package: &Package,
    types: &TypeIndex<'_>,
) -> Result<(), ConstraintViolation> {
    for (_, instance) in package.instances() {
        for (direction, index, link) in instance.links() {
            let subject = Subject::attachment(direction.item_type(), instance.label(), index);
            check_reference(
                &subject,
                FIELD_HAS_CLASS,
                link.has_class.as_deref(),
                ItemType::Link,
                Presence::Mandatory,
                types,
            )?;
            if link.id_ref.as_deref().is_none_or(|id| id.trim().is_empty()) {
                return Err(ConstraintViolation::MissingReference {
                    subject,
                    field: FIELD_ID_REF,
                });
            }
        }
    }
    Ok(())
}

/// Every instance of `kind` (anEntity or aRelationship) must name a class of
/// the matching kind.
pub fn check_instance_classes(
    package: &Package,
    types: &TypeIndex<'_>,
    kind: ItemType,
) -> Result<(), ConstraintViolation> {
    for (_, instance) in package.instances() {
        if instance.item_type() != kind {
            continue;
        }
        let subject = Subject::item(kind, instance.label());
        check_reference(
            &subject,
            FIELD_HAS_CLASS,
            instance.has_class(),
            instance.class_type(),
            Presence::Mandatory,
            types,
        )?;
    }
    Ok(())
}

/// Every class of `kind` that declares a parent must specialize a class of the
/// same kind.
pub fn check_specializes(
    package: &Package,
    types: &TypeIndex<'_>,
    kind: ItemType,
) -> Result<(), ConstraintViolation> {
    for item in &package.graph {
        if item.item_type() != kind {
            continue;
        }
        let subject = Subject::item(kind, item_label(item));
        check_reference(
            &subject,
            FIELD_SPECIALIZES,
            item.specializes(),
            kind,
            Presence::Optional,
            types,
        )?;
    }
    Ok(())
}

fn item_label(item: &Item) -> &str {
    item.id().unwrap_or("<no id>")
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
    fn resolved_references_pass() {
        let package = package(json!([
            {"id": "P1", "itemType": "pig:Property"},
            {"id": "L1", "itemType": "pig:Link"},
            {"id": "E1", "itemType": "pig:Entity"},
            {"id": "E2", "itemType": "pig:Entity", "specializes": "E1"},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E2",
             "hasProperty": [{"hasClass": "P1", "value": "x"}],
             "hasTargetLink": [{"hasClass": "L1", "idRef": "e2"}]},
            {"id": "e2", "itemType": "pig:anEntity", "hasClass": "E1"}
        ]));
        let types = TypeIndex::build(&package);
        assert_eq!(check_property_classes(&package, &types), Ok(()));
        assert_eq!(check_link_classes(&package, &types), Ok(()));
        assert_eq!(
            check_instance_classes(&package, &types, ItemType::AnEntity),
            Ok(())
        );
        assert_eq!(
            check_specializes(&package, &types, ItemType::Entity),
            Ok(())
        );
    }

    #[test]
    fn property_class_of_wrong_kind() {
        let package = package(json!([
            {"id": "L1", "itemType": "pig:Link"},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E1",
             "hasProperty": [{"hasClass": "L1", "value": "x"}]}
        ]));
        let types = TypeIndex::build(&package);
        let violation = check_property_classes(&package, &types).expect_err("must fail");
        assert_eq!(violation.status(), StatusCode::InvalidAttachmentReference);
        assert_eq!(
            violation.to_string(),
            "pig:aProperty #0 of 'e1': hasClass 'L1' expected kind pig:Property, found kind pig:Link"
        );
    }

    #[test]
    fn property_without_class() {
        let package = package(json!([
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E1",
             "hasProperty": [{"value": "x"}]}
        ]));
        let types = TypeIndex::build(&package);
        let violation = check_property_classes(&package, &types).expect_err("must fail");
        assert_eq!(violation.status(), StatusCode::MissingAttachmentReference);
    }

    #[test]
    fn link_without_target() {
        let package = package(json!([
            {"id": "L1", "itemType": "pig:Link"},
            {"id": "r1", "itemType": "pig:aRelationship", "hasClass": "R1",
             "hasSourceLink": [{"hasClass": "L1"}]}
        ]));
        let types = TypeIndex::build(&package);
        let violation = check_link_classes(&package, &types).expect_err("must fail");
        assert_eq!(violation.status(), StatusCode::MissingAttachmentReference);
        assert!(violation.to_string().contains("pig:aSourceLink #0 of 'r1' has no idRef"));
    }

    #[test]
    fn unresolved_link_class() {
        let package = package(json!([
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E1",
             "hasTargetLink": [{"hasClass": "L-missing", "idRef": "e1"}]}
        ]));
        let types = TypeIndex::build(&package);
        let violation = check_link_classes(&package, &types).expect_err("must fail");
        assert!(matches!(
            violation,
            ConstraintViolation::ReferenceNotFound { ref target, .. } if target == "L-missing"
        ));
        assert_eq!(violation.status(), StatusCode::InvalidAttachmentReference);
    }

    #[test]
    fn instance_class_checks_are_kind_scoped() {
        let package = package(json!([
            {"id": "E1", "itemType": "pig:Entity"},
            {"id": "r1", "itemType": "pig:aRelationship", "hasClass": "E1"},
            {"id": "e1", "itemType": "pig:anEntity"}
        ]));
        let types = TypeIndex::build(&package);

        let relationship = check_instance_classes(&package, &types, ItemType::ARelationship)
            .expect_err("entity class on relationship must fail");
        assert_eq!(relationship.status(), StatusCode::InvalidClassReference);

        let entity = check_instance_classes(&package, &types, ItemType::AnEntity)
            .expect_err("missing hasClass must fail");
        assert_eq!(entity.status(), StatusCode::MissingInstanceClass);
    }

    #[test]
    fn specializes_is_optional_but_typed() {
        let package = package(json!([
            {"id": "P1", "itemType": "pig:Property"},
            {"id": "P2", "itemType": "pig:Property", "specializes": "E1"},
            {"id": "E1", "itemType": "pig:Entity"},
            {"id": "L1", "itemType": "pig:Link", "specializes": "L0"}
        ]));
        let types = TypeIndex::build(&package);

        assert_eq!(check_specializes(&package, &types, ItemType::Entity), Ok(()));
        let property = check_specializes(&package, &types, ItemType::Property)
            .expect_err("property specializing an entity must fail");
        assert!(matches!(
            property,
            ConstraintViolation::ReferenceKindMismatch { found: ItemType::Entity, .. }
        ));
        let link = check_specializes(&package, &types, ItemType::Link)
            .expect_err("dangling parent must fail");
        assert_eq!(link.status(), StatusCode::InvalidClassReference);
    }
}
