//! Cardinality of attached property values.
//!
//! Non-string properties are counted once per instance. String properties are
//! counted per language tag: values in "en" and "de" are two independent
//! counts, each of which must lie within `[minCount, maxCount]`. Untagged
//! strings form their own bucket.
//!
//! Per instance, the property classes examined are the explicitly eligible
//! ones of its class plus those actually attached. An unrestricted class
//! therefore only has its attached properties counted.

use crate::eligibility::resolved_class;
use crate::index::{ClassIndex, PropertyIndex};
use crate::inheritance::eligible_properties;
use crate::violation::{ConstraintViolation, OccurrenceCount, Subject};
use pig_model::{InstanceRef, Literal, Package, PropertyClass};
use std::collections::BTreeMap;

type LanguageCounts<'a> = BTreeMap<Option<&'a str>, u32>;

pub fn check_occurrences(
    package: &Package,
    classes: &ClassIndex<'_>,
    properties: &PropertyIndex<'_>,
) -> Result<(), ConstraintViolation> {
    for (_, instance) in package.instances() {
        let counts = count_values(instance, properties);
        for property_id in examined_properties(instance, classes, &counts) {
            let Some(property) = properties.get(&property_id) else {
                continue;
            };
            check_property(
                instance,
                &property_id,
                property,
                counts.get(property_id.as_str()),
            )?;
        }
    }
    Ok(())
}

fn count_values<'a>(
    instance: InstanceRef<'a>,
    properties: &PropertyIndex<'_>,
) -> BTreeMap<&'a str, LanguageCounts<'a>> {
    let mut counts: BTreeMap<&'a str, LanguageCounts<'a>> = BTreeMap::new();
    for value in instance.properties() {
        let Some(property_id) = value.has_class.as_deref() else {
            continue;
        };
        let Some(property) = properties.get(property_id) else {
            continue;
        };
        let lang = if property.datatype.is_string() {
            value.value.as_ref().and_then(Literal::lang)
        } else {
            None
        };
        *counts
            .entry(property_id)
            .or_default()
            .entry(lang)
            .or_default() += 1;
    }
    counts
}

fn examined_properties(
    instance: InstanceRef<'_>,
    classes: &ClassIndex<'_>,
    counts: &BTreeMap<&str, LanguageCounts<'_>>,
) -> Vec<String> {
    let mut examined: Vec<String> = resolved_class(instance, classes)
        .and_then(|(class_id, _)| {
            eligible_properties(class_id, classes)
                .ids()
                .map(<[String]>::to_vec)
        })
        .unwrap_or_default();
    for &attached in counts.keys() {
        if !examined.iter().any(|id| id == attached) {
            examined.push(attached.to_string());
        }
    }
    examined
}

fn check_property(
    instance: InstanceRef<'_>,
    property_id: &str,
    property: &PropertyClass,
    counts: Option<&LanguageCounts<'_>>,
) -> Result<(), ConstraintViolation> {
    let (min, max) = (property.min_count(), property.max_count());
    if min == 0 && max == 0 {
        return Ok(());
    }
    let subject = || Subject::item(instance.item_type(), instance.label());
    let within = |count: u32| (min..=max).contains(&count);

    if property.datatype.is_string() {
        let Some(counts) = counts.filter(|counts| !counts.is_empty()) else {
            if min > 0 {
                return Err(ConstraintViolation::MissingOccurrence {
                    instance: subject(),
                    property: property_id.to_string(),
                    min,
                });
            }
            return Ok(());
        };
        let violations: Vec<OccurrenceCount> = counts
            .iter()
            .filter(|&(_, &count)| !within(count))
            .map(|(lang, &count)| OccurrenceCount {
                lang: Some(lang.unwrap_or("untagged").to_string()),
                count,
            })
            .collect();
        if violations.is_empty() {
            return Ok(());
        }
        return Err(ConstraintViolation::Occurrence {
            instance: subject(),
            property: property_id.to_string(),
            min,
            max,
            counts: violations,
        });
    }

    let total: u32 = counts.map(|counts| counts.values().sum()).unwrap_or(0);
    if within(total) {
        return Ok(());
    }
    Err(ConstraintViolation::Occurrence {
        instance: subject(),
        property: property_id.to_string(),
        min,
        max,
        counts: vec![OccurrenceCount {
            lang: None,
            count: total,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::StatusCode;
    use serde_json::json;

    fn run(graph: serde_json::Value) -> Result<(), ConstraintViolation> {
        let package: Package =
            serde_json::from_value(json!({ "graph": graph })).expect("package should parse");
        check_occurrences(
            &package,
            &ClassIndex::build(&package),
            &PropertyIndex::build(&package),
        )
    }

    fn title_graph(values: serde_json::Value) -> serde_json::Value {
        json!([
            {"id": "P-title", "itemType": "pig:Property", "datatype": "xs:string",
             "minCount": 1, "maxCount": 1},
            {"id": "E", "itemType": "pig:Entity", "eligibleProperty": ["P-title"]},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E", "hasProperty": values}
        ])
    }

    #[test]
    fn one_value_per_language_passes() {
        let result = run(title_graph(json!([
            {"hasClass": "P-title", "value": {"text": "Pump", "lang": "en"}},
            {"hasClass": "P-title", "value": {"text": "Pumpe", "lang": "de"}}
        ])));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn two_values_in_one_language_fail() {
        let violation = run(title_graph(json!([
            {"hasClass": "P-title", "value": {"text": "Pump", "lang": "en"}},
            {"hasClass": "P-title", "value": {"text": "Impeller", "lang": "en"}}
        ])))
        .expect_err("two english titles must fail");
        assert_eq!(violation.status(), StatusCode::Cardinality);
        match violation {
            ConstraintViolation::Occurrence { counts, .. } => {
                assert_eq!(
                    counts,
                    vec![OccurrenceCount {
                        lang: Some("en".to_string()),
                        count: 2,
                    }]
                );
            }
            other => panic!("expected occurrence violation, got {other:?}"),
        }
    }

    #[test]
    fn every_violating_language_is_reported() {
        let violation = run(title_graph(json!([
            {"hasClass": "P-title", "value": {"text": "Pump", "lang": "en"}},
            {"hasClass": "P-title", "value": {"text": "Impeller", "lang": "en"}},
            {"hasClass": "P-title", "value": {"text": "Pumpe", "lang": "de"}},
            {"hasClass": "P-title", "value": {"text": "Laufrad", "lang": "de"}},
            {"hasClass": "P-title", "value": {"text": "Pompe", "lang": "fr"}}
        ])))
        .expect_err("two languages over maxCount must fail");
        match violation {
            ConstraintViolation::Occurrence { counts, .. } => {
                assert_eq!(
                    counts,
                    vec![
                        OccurrenceCount {
                            lang: Some("de".to_string()),
                            count: 2,
                        },
                        OccurrenceCount {
                            lang: Some("en".to_string()),
                            count: 2,
                        },
                    ]
                );
            }
            other => panic!("expected occurrence violation, got {other:?}"),
        }
    }

    #[test]
    fn required_string_without_values_fails() {
        let violation = run(title_graph(json!([]))).expect_err("missing title must fail");
        assert!(matches!(
            violation,
            ConstraintViolation::MissingOccurrence { min: 1, .. }
        ));
        assert!(
            violation
                .to_string()
                .contains("need at least one language with 1 value(s)")
        );
    }

    #[test]
    fn non_string_values_are_counted_in_total() {
        let result = run(json!([
            {"id": "P-mass", "itemType": "pig:Property", "datatype": "xs:decimal"},
            {"id": "E", "itemType": "pig:Entity"},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E", "hasProperty": [
                {"hasClass": "P-mass", "value": 1.5},
                {"hasClass": "P-mass", "value": 2.5}
            ]}
        ]));
        match result {
            Err(ConstraintViolation::Occurrence { max, counts, .. }) => {
                assert_eq!(max, 1);
                assert_eq!(counts[0].count, 2);
                assert_eq!(counts[0].lang, None);
            }
            other => panic!("expected occurrence violation, got {other:?}"),
        }
    }

    #[test]
    fn required_number_missing_fails() {
        let result = run(json!([
            {"id": "P-qty", "itemType": "pig:Property", "datatype": "xs:integer", "minCount": 1},
            {"id": "E", "itemType": "pig:Entity", "eligibleProperty": ["P-qty"]},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E"}
        ]));
        assert!(matches!(
            result,
            Err(ConstraintViolation::Occurrence { min: 1, .. })
        ));
    }

    #[test]
    fn zero_zero_cardinality_is_skipped() {
        let result = run(json!([
            {"id": "P", "itemType": "pig:Property", "minCount": 0, "maxCount": 0},
            {"id": "E", "itemType": "pig:Entity"},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E", "hasProperty": [
                {"hasClass": "P", "value": "a"},
                {"hasClass": "P", "value": "b"}
            ]}
        ]));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn multi_valued_property_within_bounds() {
        let result = run(json!([
            {"id": "P-tag", "itemType": "pig:Property", "maxCount": 3},
            {"id": "E", "itemType": "pig:Entity"},
            {"id": "e1", "itemType": "pig:anEntity", "hasClass": "E", "hasProperty": [
                {"hasClass": "P-tag", "value": "a"},
                {"hasClass": "P-tag", "value": "b"},
                {"hasClass": "P-tag", "value": "c"}
            ]}
        ]));
        assert_eq!(result, Ok(()));
    }
}
