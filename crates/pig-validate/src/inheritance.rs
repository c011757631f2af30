//! Eligibility resolution along `specializes` chains.
//!
//! Classes are plain records keyed by id; a parent is an id looked up in the
//! same index, never a language-level supertype. Resolution is an explicit
//! depth-first walk carrying a visited set.
//!
//! Rules, per class on the chain:
//! - no declaration: [`Eligibility::Unrestricted`], the parent is not consulted
//! - explicit list (possibly empty): the list, unioned with the parent's
//!   resolution unless the parent is unrestricted
//! - already visited (cycle) or unknown class: contributes nothing
//!
//! Target-link eligibility of Entity/Relationship classes does not climb the
//! chain; only the class's own declaration counts. Property and source-link
//! eligibility do climb. This asymmetry is a known inconsistency kept until
//! the product decision on inherited link eligibility is made.

use crate::index::{ClassDef, ClassIndex, LinkIndex};
use std::collections::BTreeSet;

/// Resolved eligible set for one class and one dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    /// Nothing declared: every id is eligible.
    Unrestricted,
    /// Explicit ids, duplicates removed, first occurrence order kept.
    Only(Vec<String>),
}

impl Eligibility {
    pub fn admits(&self, id: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Only(ids) => ids.iter().any(|eligible| eligible == id),
        }
    }

    pub fn ids(&self) -> Option<&[String]> {
        match self {
            Self::Unrestricted => None,
            Self::Only(ids) => Some(ids),
        }
    }
}

/// What one class on a chain declares.
struct Declaration<'a> {
    eligible: Option<&'a [String]>,
    specializes: Option<&'a str>,
}

fn resolve_chain<'a>(
    class_id: &str,
    declared: &dyn Fn(&str) -> Option<Declaration<'a>>,
    visited: &mut BTreeSet<String>,
) -> Eligibility {
    if !visited.insert(class_id.to_string()) {
        return Eligibility::Only(Vec::new());
    }
    let Some(declaration) = declared(class_id) else {
        return Eligibility::Only(Vec::new());
    };
    let Some(own) = declaration.eligible else {
        return Eligibility::Unrestricted;
    };

    let mut ids = own.to_vec();
    if let Some(parent) = declaration.specializes
        && let Eligibility::Only(inherited) = resolve_chain(parent, declared, visited)
    {
        ids.extend(inherited);
    }
    Eligibility::Only(dedup_ids(ids))
}

fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

fn class_chain<'a>(
    classes: &'a ClassIndex<'a>,
    select: fn(&ClassDef<'a>) -> Option<&'a [String]>,
) -> impl Fn(&str) -> Option<Declaration<'a>> + 'a {
    move |id: &str| {
        classes.get(id).map(|class| Declaration {
            eligible: select(&class),
            specializes: class.specializes(),
        })
    }
}

/// Properties eligible on instances of `class_id`, inherited.
pub fn eligible_properties<'a>(class_id: &str, classes: &'a ClassIndex<'a>) -> Eligibility {
    let declared = class_chain(classes, |class| class.eligible_property());
    resolve_chain(class_id, &declared, &mut BTreeSet::new())
}

/// Source links eligible on relationships of `class_id`, inherited.
pub fn eligible_source_links<'a>(class_id: &str, classes: &'a ClassIndex<'a>) -> Eligibility {
    let declared = class_chain(classes, |class| class.eligible_source_link());
    resolve_chain(class_id, &declared, &mut BTreeSet::new())
}

/// Target links eligible on instances of `class_id`: direct declaration only.
pub fn eligible_target_links(class_id: &str, classes: &ClassIndex<'_>) -> Eligibility {
    match classes.get(class_id) {
        None => Eligibility::Only(Vec::new()),
        Some(class) => match class.eligible_target_link() {
            None => Eligibility::Unrestricted,
            Some(ids) => Eligibility::Only(dedup_ids(ids.to_vec())),
        },
    }
}

/// `class_id` followed by its `specializes` ancestors, stopping at a cycle or
/// an id that is not a class.
pub fn class_lineage<'a>(class_id: &'a str, classes: &ClassIndex<'a>) -> Vec<&'a str> {
    let mut lineage = Vec::new();
    let mut visited = BTreeSet::new();
    let mut current = Some(class_id);
    while let Some(id) = current {
        if !visited.insert(id) {
            break;
        }
        lineage.push(id);
        current = classes.get(id).and_then(|class| class.specializes());
    }
    lineage
}

/// Classes a link of `link_id` may point at, inherited over Link classes.
pub fn eligible_endpoints<'a>(link_id: &str, links: &'a LinkIndex<'a>) -> Eligibility {
    let declared = move |id: &str| {
        links.get(id).map(|link| Declaration {
            eligible: link.eligible_endpoint.as_deref(),
            specializes: link.specializes.as_deref(),
        })
    };
    resolve_chain(link_id, &declared, &mut BTreeSet::new())
}
