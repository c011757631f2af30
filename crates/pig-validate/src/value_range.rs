//! Datatype-aware validation of attached property values.
//!
//! Enumerated properties (those declaring `eligibleValue`) take an `idRef`
//! matched by id against the eligible entries. Free-form properties take a
//! literal `value`, checked against the declared datatype and its facets.
//!
//! A `pattern` that does not compile is logged and skipped. The data is not
//! rejected for a broken facet.

use crate::index::PropertyIndex;
use crate::violation::{ConstraintViolation, Subject};
use chrono::{DateTime, NaiveDate};
use pig_model::{Datatype, EligibleValue, ItemType, Package, PropertyClass, PropertyValue};
use regex::Regex;
use std::collections::BTreeMap;

pub fn check_value_ranges(
    package: &Package,
    properties: &PropertyIndex<'_>,
) -> Result<(), ConstraintViolation> {
    let mut patterns = PatternCache::default();
    for (_, instance) in package.instances() {
        for (index, value) in instance.properties().iter().enumerate() {
            let Some(property_id) = value.has_class.as_deref() else {
                continue;
            };
            let Some(property) = properties.get(property_id) else {
                continue;
            };
            check_property_value(property_id, property, value, &mut patterns).map_err(
                |reason| ConstraintViolation::ValueRange {
                    subject: Subject::attachment(ItemType::AProperty, instance.label(), index),
                    property: property_id.to_string(),
                    reason,
                },
            )?;
        }
    }
    Ok(())
}

/// Compiled patterns per property id; `None` marks a pattern that failed to
/// compile.
#[derive(Default)]
struct PatternCache {
    compiled: BTreeMap<String, Option<Regex>>,
}

impl PatternCache {
    fn get(&mut self, property_id: &str, pattern: &str) -> Option<&Regex> {
        self.compiled
            .entry(property_id.to_string())
            .or_insert_with(|| match Regex::new(&format!("^(?:{pattern})$")) {
                Ok(regex) => Some(regex),
                Err(error) => {
                    tracing::warn!(
                        property = property_id,
                        pattern,
                        %error,
                        "ignoring malformed pattern"
                    );
                    None
                }
            })
            .as_ref()
    }
}

fn check_property_value(
    property_id: &str,
    property: &PropertyClass,
    value: &PropertyValue,
    patterns: &mut PatternCache,
) -> Result<(), String> {
    if value.value.is_some() && value.id_ref.is_some() {
        return Err("value and idRef are mutually exclusive".to_string());
    }

    if let Some(eligible) = &property.eligible_value {
        return check_enumerated(eligible, value);
    }

    if let Some(id_ref) = &value.id_ref {
        return Err(format!(
            "idRef '{id_ref}' given but the property declares no eligibleValue"
        ));
    }
    let Some(literal) = &value.value else {
        return Err("no value present".to_string());
    };
    let lexical = literal.lexical();
    let lexical = lexical.as_ref();

    match property.datatype {
        datatype if datatype.is_string() => check_string(property_id, property, lexical, patterns),
        datatype if datatype.is_numeric() => check_number(property, lexical),
        Datatype::Boolean => match lexical {
            "true" | "false" | "1" | "0" => Ok(()),
            _ => Err(format!("'{lexical}' is not a valid xs:boolean")),
        },
        Datatype::DateTime => DateTime::parse_from_rfc3339(lexical)
            .map(|_| ())
            .map_err(|_| format!("'{lexical}' is not a valid xs:dateTime")),
        Datatype::Date => NaiveDate::parse_from_str(lexical, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| format!("'{lexical}' is not a valid xs:date")),
        Datatype::AnyUri => {
            if lexical.is_empty() || lexical.chars().any(char::is_whitespace) {
                Err(format!("'{lexical}' is not a valid xs:anyURI"))
            } else {
                Ok(())
            }
        }
        _ => Ok(()),
    }
}

fn check_enumerated(eligible: &[EligibleValue], value: &PropertyValue) -> Result<(), String> {
    let Some(id_ref) = value.id_ref.as_deref() else {
        return Err(if value.value.is_some() {
            "literal value given, expected an idRef into eligibleValue".to_string()
        } else {
            "no idRef present for an enumerated property".to_string()
        });
    };
    if eligible.iter().any(|entry| entry.id() == id_ref) {
        return Ok(());
    }
    let ids: Vec<String> = eligible.iter().map(|entry| entry.id().into_owned()).collect();
    Err(format!(
        "idRef '{id_ref}' is not one of the eligible values [{}]",
        ids.join(", ")
    ))
}

fn check_string(
    property_id: &str,
    property: &PropertyClass,
    lexical: &str,
    patterns: &mut PatternCache,
) -> Result<(), String> {
    if let Some(max_length) = property.max_length {
        let length = lexical.chars().count();
        if length > max_length {
            return Err(format!("length {length} exceeds maxLength {max_length}"));
        }
    }
    if let Some(pattern) = property.pattern.as_deref()
        && let Some(regex) = patterns.get(property_id, pattern)
        && !regex.is_match(lexical)
    {
        return Err(format!("'{lexical}' does not match pattern '{pattern}'"));
    }
    Ok(())
}

fn check_number(property: &PropertyClass, lexical: &str) -> Result<(), String> {
    let datatype = property.datatype;
    if let Some(bounds) = datatype.integer_bounds() {
        return check_integer(property, lexical, bounds);
    }

    let number = lexical
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| format!("'{lexical}' is not a valid number"))?;
    if let Some(min) = property.min_inclusive
        && number < min
    {
        return Err(format!("value {lexical} is below minInclusive {min}"));
    }
    if let Some(max) = property.max_inclusive
        && number > max
    {
        return Err(format!("value {lexical} exceeds maxInclusive {max}"));
    }
    Ok(())
}

/// Integer kinds: `[+-]?[0-9]+` held exactly as `i128`. Facets are rounded
/// inward before comparison.
fn check_integer(
    property: &PropertyClass,
    lexical: &str,
    (low, high): (i128, i128),
) -> Result<(), String> {
    let datatype = property.datatype;
    let trimmed = lexical.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let number = (!digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit()))
        .then(|| trimmed.parse::<i128>().ok())
        .flatten()
        .ok_or_else(|| format!("'{lexical}' is not a valid {datatype}"))?;

    if !(low..=high).contains(&number) {
        return Err(format!(
            "value {lexical} is outside the value space of {datatype}"
        ));
    }
    if let Some(min) = property.min_inclusive
        && number < min.ceil() as i128
    {
        return Err(format!("value {lexical} is below minInclusive {min}"));
    }
    if let Some(max) = property.max_inclusive
        && number > max.floor() as i128
    {
        return Err(format!("value {lexical} exceeds maxInclusive {max}"));
    }
    Ok(())
}
