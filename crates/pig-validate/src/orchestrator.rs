//! Fail-fast orchestration of the selected checks.
//!
//! Checks run in [`CheckId`] order whatever order the caller lists them in.
//! The first violation ends the run. Indices are built on first use, so a
//! run of `uniqueIds` alone never builds any.

use crate::check::CheckId;
use crate::eligibility::{check_eligible_links, check_eligible_properties};
use crate::index::{ClassIndex, InstanceIndex, LinkIndex, PropertyIndex, TypeIndex};
use crate::occurrence::check_occurrences;
use crate::reference::{
    check_instance_classes, check_link_classes, check_property_classes, check_specializes,
};
use crate::report::{Rejection, ValidationResult};
use crate::uniqueness::check_unique_ids;
use crate::value_range::check_value_ranges;
use crate::violation::ConstraintViolation;
use pig_model::{ItemType, Package};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeSet;

/// Which checks to run. `None` runs all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_constraints: Option<Vec<CheckId>>,
}

impl ValidationOptions {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(checks: impl IntoIterator<Item = CheckId>) -> Self {
        Self {
            check_constraints: Some(checks.into_iter().collect()),
        }
    }

    /// Selected checks, deduplicated, in run order.
    pub fn selected(&self) -> Vec<CheckId> {
        match &self.check_constraints {
            None => CheckId::ALL.to_vec(),
            Some(checks) => checks
                .iter()
                .copied()
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
        }
    }
}

/// Lookup tables shared by the checks of one run.
struct Indices<'a> {
    package: &'a Package,
    types: OnceCell<TypeIndex<'a>>,
    classes: OnceCell<ClassIndex<'a>>,
    properties: OnceCell<PropertyIndex<'a>>,
    links: OnceCell<LinkIndex<'a>>,
    instances: OnceCell<InstanceIndex<'a>>,
}

impl<'a> Indices<'a> {
    fn new(package: &'a Package) -> Self {
        Self {
            package,
            types: OnceCell::new(),
            classes: OnceCell::new(),
            properties: OnceCell::new(),
            links: OnceCell::new(),
            instances: OnceCell::new(),
        }
    }

    fn types(&self) -> &TypeIndex<'a> {
        self.types.get_or_init(|| TypeIndex::build(self.package))
    }

    fn classes(&self) -> &ClassIndex<'a> {
        self.classes.get_or_init(|| ClassIndex::build(self.package))
    }

    fn properties(&self) -> &PropertyIndex<'a> {
        self.properties
            .get_or_init(|| PropertyIndex::build(self.package))
    }

    fn links(&self) -> &LinkIndex<'a> {
        self.links.get_or_init(|| LinkIndex::build(self.package))
    }

    fn instances(&self) -> &InstanceIndex<'a> {
        self.instances
            .get_or_init(|| InstanceIndex::build(self.package))
    }
}

fn run_check(check: CheckId, indices: &Indices<'_>) -> Result<(), ConstraintViolation> {
    let package = indices.package;
    match check {
        CheckId::UniqueIds => check_unique_ids(package),
        CheckId::PropertyHasClass => check_property_classes(package, indices.types()),
        CheckId::LinkHasClass => check_link_classes(package, indices.types()),
        CheckId::EntityHasClass => {
            check_instance_classes(package, indices.types(), ItemType::AnEntity)
        }
        CheckId::RelationshipHasClass => {
            check_instance_classes(package, indices.types(), ItemType::ARelationship)
        }
        CheckId::EntitySpecializes => check_specializes(package, indices.types(), ItemType::Entity),
        CheckId::RelationshipSpecializes => {
            check_specializes(package, indices.types(), ItemType::Relationship)
        }
        CheckId::PropertySpecializes => {
            check_specializes(package, indices.types(), ItemType::Property)
        }
        CheckId::LinkSpecializes => check_specializes(package, indices.types(), ItemType::Link),
        CheckId::EligibleProperties => check_eligible_properties(package, indices.classes()),
        CheckId::EligibleLinks => check_eligible_links(
            package,
            indices.classes(),
            indices.links(),
            indices.instances(),
        ),
        CheckId::PropertyOccurrences => {
            check_occurrences(package, indices.classes(), indices.properties())
        }
        CheckId::ValueRanges => check_value_ranges(package, indices.properties()),
    }
}

/// Run the selected checks, stopping at the first violation.
pub fn validate(package: &Package, options: &ValidationOptions) -> Result<(), Rejection> {
    let indices = Indices::new(package);
    for check in options.selected() {
        tracing::debug!(check = %check, "running check");
        run_check(check, &indices).map_err(|violation| Rejection { check, violation })?;
    }
    Ok(())
}

/// [`validate`] folded into the caller-facing result record.
pub fn check_constraints(package: &Package, options: &ValidationOptions) -> ValidationResult {
    let package_id = package.id.as_deref().unwrap_or("<no id>");
    match validate(package, options) {
        Ok(()) => {
            tracing::info!(package = package_id, items = package.graph.len(), "package accepted");
            ValidationResult::accepted()
        }
        Err(rejection) => {
            tracing::info!(
                package = package_id,
                check = %rejection.check,
                status = rejection.status().code(),
                "package rejected: {}",
                rejection.violation
            );
            ValidationResult::rejected(&rejection)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::StatusCode;
    use serde_json::{Value, json};

    fn package(graph: Value) -> Package {
        serde_json::from_value(json!({ "id": "pkg", "graph": graph }))
            .expect("package should parse")
    }

    fn percent_package(value: Value) -> Package {
        package(json!([
            {"id": "P", "itemType": "pig:Property", "datatype": "xs:integer",
             "minInclusive": 0, "maxInclusive": 100},
            {"id": "E", "itemType": "pig:Entity", "eligibleProperty": ["P"]},
            {"id": "A", "itemType": "pig:anEntity", "hasClass": "E",
             "hasProperty": [{"hasClass": "P", "value": value}]}
        ]))
    }

    #[test]
    fn value_out_of_range_is_rejected() {
        let result = check_constraints(
            &percent_package(json!(150)),
            &ValidationOptions::only([CheckId::ValueRanges]),
        );
        assert!(!result.ok);
        assert_eq!(result.status, 679);
        assert!(
            result
                .status_text
                .as_deref()
                .is_some_and(|text| text.contains("exceeds maxInclusive"))
        );
        assert_eq!(result.check, Some(CheckId::ValueRanges));
    }

    #[test]
    fn value_in_range_is_accepted() {
        let result = check_constraints(
            &percent_package(json!(50)),
            &ValidationOptions::only([CheckId::ValueRanges]),
        );
        assert_eq!(result, ValidationResult::accepted());
        assert_eq!(result.status, 0);

        let all = check_constraints(&percent_package(json!(50)), &ValidationOptions::all());
        assert!(all.is_accepted());
    }

    #[test]
    fn first_failing_check_wins_regardless_of_listing_order() {
        // Duplicate id and a dangling hasClass: uniqueIds runs first.
        let package = package(json!([
            {"id": "E", "itemType": "pig:Entity"},
            {"id": "E", "itemType": "pig:Entity"},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "Missing"}
        ]));
        let options = ValidationOptions::only([CheckId::EntityHasClass, CheckId::UniqueIds]);
        let rejection = validate(&package, &options).expect_err("must fail");
        assert_eq!(rejection.check, CheckId::UniqueIds);
        assert_eq!(rejection.status(), StatusCode::DuplicateId);

        let options = ValidationOptions::only([CheckId::EntityHasClass]);
        let rejection = validate(&package, &options).expect_err("must fail");
        assert_eq!(rejection.check, CheckId::EntityHasClass);
        assert_eq!(rejection.status(), StatusCode::InvalidClassReference);
    }

    #[test]
    fn unselected_checks_do_not_run() {
        let package = package(json!([
            {"id": "e1", "itemType": "pig:anEntity"}
        ]));
        assert_eq!(
            validate(&package, &ValidationOptions::only([CheckId::UniqueIds])),
            Ok(())
        );
        assert_eq!(validate(&package, &ValidationOptions::only(Vec::new())), Ok(()));
    }

    #[test]
    fn occurrence_runs_before_value_ranges() {
        let package = package(json!([
            {"id": "P", "itemType": "pig:Property", "datatype": "xs:integer", "maxInclusive": 1},
            {"id": "E", "itemType": "pig:Entity"},
            {"id": "A", "itemType": "pig:anEntity", "hasClass": "E",
             "hasProperty": [{"hasClass": "P", "value": 7}, {"hasClass": "P", "value": 8}]}
        ]));
        let rejection = validate(&package, &ValidationOptions::all()).expect_err("must fail");
        assert_eq!(rejection.check, CheckId::PropertyOccurrences);
        assert_eq!(rejection.status(), StatusCode::Cardinality);
    }

    #[test]
    fn selection_is_deduplicated_and_ordered() {
        let options = ValidationOptions::only([
            CheckId::ValueRanges,
            CheckId::UniqueIds,
            CheckId::ValueRanges,
        ]);
        assert_eq!(
            options.selected(),
            vec![CheckId::UniqueIds, CheckId::ValueRanges]
        );
        assert_eq!(ValidationOptions::all().selected(), CheckId::ALL.to_vec());
    }

    #[test]
    fn options_deserialize_from_wire_names() {
        let options: ValidationOptions =
            serde_json::from_value(json!({"checkConstraints": ["valueRanges", "uniqueIds"]}))
                .expect("options should parse");
        assert_eq!(
            options.selected(),
            vec![CheckId::UniqueIds, CheckId::ValueRanges]
        );
    }
}
