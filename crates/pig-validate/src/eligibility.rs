//! Attachment eligibility: properties and links against the resolved eligible
//! sets of the instance's class.
//!
//! Instances whose hasClass is absent or does not resolve to a class of the
//! matching kind are skipped here; the reference checks own those failures.

use crate::index::{ClassDef, ClassIndex, InstanceIndex, LinkIndex};
use crate::inheritance::{
    Eligibility, class_lineage, eligible_endpoints, eligible_properties, eligible_source_links,
    eligible_target_links,
};
use crate::violation::{ConstraintViolation, Subject};
use pig_model::{InstanceRef, ItemType, LinkDirection, LinkValue, Package};

pub const LIST_ELIGIBLE_PROPERTY: &str = "eligibleProperty";
pub const LIST_ELIGIBLE_SOURCE_LINK: &str = "eligibleSourceLink";
pub const LIST_ELIGIBLE_TARGET_LINK: &str = "eligibleTargetLink";

/// The instance's class, if hasClass resolves to a class of the right kind.
pub(crate) fn resolved_class<'a>(
    instance: InstanceRef<'a>,
    classes: &ClassIndex<'a>,
) -> Option<(&'a str, ClassDef<'a>)> {
    let class_id = instance.has_class()?;
    let class = classes.get(class_id)?;
    (class.item_type() == instance.class_type()).then_some((class_id, class))
}

pub fn check_eligible_properties(
    package: &Package,
    classes: &ClassIndex<'_>,
) -> Result<(), ConstraintViolation> {
    for (_, instance) in package.instances() {
        let Some((class_id, _)) = resolved_class(instance, classes) else {
            continue;
        };
        let eligible = eligible_properties(class_id, classes);
        if eligible == Eligibility::Unrestricted {
            continue;
        }
        for (index, value) in instance.properties().iter().enumerate() {
            let Some(property) = value.has_class.as_deref() else {
                continue;
            };
            if !eligible.admits(property) {
                return Err(ConstraintViolation::IneligibleAttachment {
                    subject: Subject::attachment(ItemType::AProperty, instance.label(), index),
                    class: property.to_string(),
                    list: LIST_ELIGIBLE_PROPERTY,
                    owner: class_id.to_string(),
                    eligible: eligible.ids().map(<[String]>::to_vec).unwrap_or_default(),
                });
            }
        }
    }
    Ok(())
}

/// Link class eligibility per direction, then endpoint eligibility of every
/// link whose target is an instance of this package. An endpoint is admitted
/// when its class or any class it specializes is listed.
pub fn check_eligible_links(
    package: &Package,
    classes: &ClassIndex<'_>,
    links: &LinkIndex<'_>,
    instances: &InstanceIndex<'_>,
) -> Result<(), ConstraintViolation> {
    for (_, instance) in package.instances() {
        let Some((class_id, _)) = resolved_class(instance, classes) else {
            continue;
        };
        let source = eligible_source_links(class_id, classes);
        let target = eligible_target_links(class_id, classes);

        for (direction, index, link) in instance.links() {
            let Some(link_class) = link.has_class.as_deref() else {
                continue;
            };
            let subject = Subject::attachment(direction.item_type(), instance.label(), index);
            let (eligible, list) = match direction {
                LinkDirection::Source => (&source, LIST_ELIGIBLE_SOURCE_LINK),
                LinkDirection::Target => (&target, LIST_ELIGIBLE_TARGET_LINK),
            };
            if !eligible.admits(link_class) {
                return Err(ConstraintViolation::IneligibleAttachment {
                    subject,
                    class: link_class.to_string(),
                    list,
                    owner: class_id.to_string(),
                    eligible: eligible.ids().map(<[String]>::to_vec).unwrap_or_default(),
                });
            }
            check_endpoint(subject, link_class, link, classes, links, instances)?;
        }
    }
    Ok(())
}

fn check_endpoint(
    subject: Subject,
    link_class: &str,
    link: &LinkValue,
    classes: &ClassIndex<'_>,
    links: &LinkIndex<'_>,
    instances: &InstanceIndex<'_>,
) -> Result<(), ConstraintViolation> {
    if links.get(link_class).is_none() {
        return Ok(());
    }
    let Some(endpoint) = link.id_ref.as_deref() else {
        return Ok(());
    };
    let Some(target) = instances.get(endpoint) else {
        return Ok(());
    };
    let Some(endpoint_class) = target.has_class() else {
        return Ok(());
    };
    let eligible = eligible_endpoints(link_class, links);
    if class_lineage(endpoint_class, classes)
        .into_iter()
        .any(|class| eligible.admits(class))
    {
        return Ok(());
    }
    Err(ConstraintViolation::IneligibleEndpoint {
        subject,
        link_class: link_class.to_string(),
        endpoint: endpoint.to_string(),
        endpoint_class: endpoint_class.to_string(),
        eligible: eligible.ids().map(<[String]>::to_vec).unwrap_or_default(),
    })
}
