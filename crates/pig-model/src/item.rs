//! Graph items: the four metaclasses and the two instance kinds.
//!
//! Attachments (`pig:aProperty`, `pig:aSourceLink`, `pig:aTargetLink`) are not
//! top-level graph items; they live inside the instance that owns them.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::value::{Datatype, EligibleValue, Literal};

/// Declared kind of an item, as carried in its `itemType` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "pig:Property")]
    Property,
    #[serde(rename = "pig:Link")]
    Link,
    #[serde(rename = "pig:Entity")]
    Entity,
    #[serde(rename = "pig:Relationship")]
    Relationship,
    #[serde(rename = "pig:aProperty")]
    AProperty,
    #[serde(rename = "pig:aSourceLink")]
    ASourceLink,
    #[serde(rename = "pig:aTargetLink")]
    ATargetLink,
    #[serde(rename = "pig:anEntity")]
    AnEntity,
    #[serde(rename = "pig:aRelationship")]
    ARelationship,
}

impl ItemType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Property => "pig:Property",
            Self::Link => "pig:Link",
            Self::Entity => "pig:Entity",
            Self::Relationship => "pig:Relationship",
            Self::AProperty => "pig:aProperty",
            Self::ASourceLink => "pig:aSourceLink",
            Self::ATargetLink => "pig:aTargetLink",
            Self::AnEntity => "pig:anEntity",
            Self::ARelationship => "pig:aRelationship",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item of a package graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "itemType")]
pub enum Item {
    #[serde(rename = "pig:Property")]
    Property(PropertyClass),
    #[serde(rename = "pig:Link")]
    Link(LinkClass),
    #[serde(rename = "pig:Entity")]
    Entity(EntityClass),
    #[serde(rename = "pig:Relationship")]
    Relationship(RelationshipClass),
    #[serde(rename = "pig:anEntity")]
    AnEntity(EntityInstance),
    #[serde(rename = "pig:aRelationship")]
    ARelationship(RelationshipInstance),
}

impl Item {
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Property(item) => item.id.as_deref(),
            Self::Link(item) => item.id.as_deref(),
            Self::Entity(item) => item.id.as_deref(),
            Self::Relationship(item) => item.id.as_deref(),
            Self::AnEntity(item) => item.id.as_deref(),
            Self::ARelationship(item) => item.id.as_deref(),
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Property(_) => ItemType::Property,
            Self::Link(_) => ItemType::Link,
            Self::Entity(_) => ItemType::Entity,
            Self::Relationship(_) => ItemType::Relationship,
            Self::AnEntity(_) => ItemType::AnEntity,
            Self::ARelationship(_) => ItemType::ARelationship,
        }
    }

    /// Parent class id, for the metaclasses that declare one.
    pub fn specializes(&self) -> Option<&str> {
        match self {
            Self::Property(item) => item.specializes.as_deref(),
            Self::Link(item) => item.specializes.as_deref(),
            Self::Entity(item) => item.specializes.as_deref(),
            Self::Relationship(item) => item.specializes.as_deref(),
            Self::AnEntity(_) | Self::ARelationship(_) => None,
        }
    }

    /// View over the instance fields shared by anEntity and aRelationship.
    pub fn as_instance(&self) -> Option<InstanceRef<'_>> {
        match self {
            Self::AnEntity(item) => Some(InstanceRef::Entity(item)),
            Self::ARelationship(item) => Some(InstanceRef::Relationship(item)),
            _ => None,
        }
    }
}

/// Property class: datatype and value constraints for attached values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyClass {
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub datatype: Datatype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_inclusive: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_inclusive: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_value: Option<Vec<EligibleValue>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializes: Option<String>,
}

pub const DEFAULT_MIN_COUNT: u32 = 0;
pub const DEFAULT_MAX_COUNT: u32 = 1;

impl PropertyClass {
    /// Lower cardinality bound; optional unless declared otherwise.
    pub fn min_count(&self) -> u32 {
        self.min_count.unwrap_or(DEFAULT_MIN_COUNT)
    }

    /// Upper cardinality bound; single-valued unless declared otherwise.
    pub fn max_count(&self) -> u32 {
        self.max_count.unwrap_or(DEFAULT_MAX_COUNT)
    }
}

/// Link class: which classes a link may point at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkClass {
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligible_endpoint: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializes: Option<String>,
}

/// Entity class.
///
/// `None` on an eligibility field means the declaration is absent, which makes
/// the class unrestricted in that dimension. `Some(vec![])` restricts it to
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityClass {
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligible_property: Option<Vec<String>>,
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligible_target_link: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializes: Option<String>,
}

/// Relationship class; like [`EntityClass`] plus source-link eligibility.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationshipClass {
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligible_property: Option<Vec<String>>,
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligible_source_link: Option<Vec<String>>,
    #[serde(
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub eligible_target_link: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityInstance {
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_property: Vec<PropertyValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_target_link: Vec<LinkValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationshipInstance {
    #[serde(alias = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_property: Vec<PropertyValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_source_link: Vec<LinkValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub has_target_link: Vec<LinkValue>,
}

/// An aProperty: a value attached to an instance.
///
/// Carries either a literal `value` or an `idRef` into the owning Property
/// class's `eligibleValue` list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Literal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_ref: Option<String>,
}

/// An aSourceLink or aTargetLink: a typed pointer to another instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_ref: Option<String>,
}

/// Which side of an instance a link attachment sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    Source,
    Target,
}

impl LinkDirection {
    pub const fn item_type(self) -> ItemType {
        match self {
            Self::Source => ItemType::ASourceLink,
            Self::Target => ItemType::ATargetLink,
        }
    }
}

/// Borrowed view over either instance kind.
#[derive(Debug, Clone, Copy)]
pub enum InstanceRef<'a> {
    Entity(&'a EntityInstance),
    Relationship(&'a RelationshipInstance),
}

impl<'a> InstanceRef<'a> {
    pub fn id(&self) -> Option<&'a str> {
        match self {
            Self::Entity(item) => item.id.as_deref(),
            Self::Relationship(item) => item.id.as_deref(),
        }
    }

    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Entity(_) => ItemType::AnEntity,
            Self::Relationship(_) => ItemType::ARelationship,
        }
    }

    /// The class kind `hasClass` must resolve to.
    pub fn class_type(&self) -> ItemType {
        match self {
            Self::Entity(_) => ItemType::Entity,
            Self::Relationship(_) => ItemType::Relationship,
        }
    }

    pub fn has_class(&self) -> Option<&'a str> {
        match self {
            Self::Entity(item) => item.has_class.as_deref(),
            Self::Relationship(item) => item.has_class.as_deref(),
        }
    }

    pub fn properties(&self) -> &'a [PropertyValue] {
        match self {
            Self::Entity(item) => &item.has_property,
            Self::Relationship(item) => &item.has_property,
        }
    }

    pub fn target_links(&self) -> &'a [LinkValue] {
        match self {
            Self::Entity(item) => &item.has_target_link,
            Self::Relationship(item) => &item.has_target_link,
        }
    }

    /// Source links; always empty for anEntity.
    pub fn source_links(&self) -> &'a [LinkValue] {
        match self {
            Self::Entity(_) => &[],
            Self::Relationship(item) => &item.has_source_link,
        }
    }

    /// All link attachments, source links first.
    pub fn links(self) -> impl Iterator<Item = (LinkDirection, usize, &'a LinkValue)> + 'a {
        let source = self
            .source_links()
            .iter()
            .enumerate()
            .map(|(index, link)| (LinkDirection::Source, index, link));
        let target = self
            .target_links()
            .iter()
            .enumerate()
            .map(|(index, link)| (LinkDirection::Target, index, link));
        source.chain(target)
    }

    /// Label used in diagnostics: the id, or a placeholder.
    pub fn label(&self) -> &'a str {
        self.id().unwrap_or("<no id>")
    }
}

/// Accept a single id or a list of ids.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|refs| match refs {
            OneOrMany::One(id) => vec![id],
            OneOrMany::Many(ids) => ids,
        }),
    )
}
