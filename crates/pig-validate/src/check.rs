//! Check identifiers and their fixed priority order.

use crate::violation::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One selectable check. The derived `Ord` is the run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckId {
    #[serde(rename = "uniqueIds")]
    UniqueIds,
    #[serde(rename = "aPropertyHasClass")]
    PropertyHasClass,
    #[serde(rename = "aLinkHasClass")]
    LinkHasClass,
    #[serde(rename = "anEntityHasClass")]
    EntityHasClass,
    #[serde(rename = "aRelationshipHasClass")]
    RelationshipHasClass,
    #[serde(rename = "entitySpecializes")]
    EntitySpecializes,
    #[serde(rename = "relationshipSpecializes")]
    RelationshipSpecializes,
    #[serde(rename = "propertySpecializes")]
    PropertySpecializes,
    #[serde(rename = "linkSpecializes")]
    LinkSpecializes,
    #[serde(rename = "eligibleProperties")]
    EligibleProperties,
    #[serde(rename = "eligibleLinks")]
    EligibleLinks,
    #[serde(rename = "propertyOccurrences")]
    PropertyOccurrences,
    #[serde(rename = "valueRanges")]
    ValueRanges,
}

impl CheckId {
    pub const ALL: [CheckId; 13] = [
        Self::UniqueIds,
        Self::PropertyHasClass,
        Self::LinkHasClass,
        Self::EntityHasClass,
        Self::RelationshipHasClass,
        Self::EntitySpecializes,
        Self::RelationshipSpecializes,
        Self::PropertySpecializes,
        Self::LinkSpecializes,
        Self::EligibleProperties,
        Self::EligibleLinks,
        Self::PropertyOccurrences,
        Self::ValueRanges,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UniqueIds => "uniqueIds",
            Self::PropertyHasClass => "aPropertyHasClass",
            Self::LinkHasClass => "aLinkHasClass",
            Self::EntityHasClass => "anEntityHasClass",
            Self::RelationshipHasClass => "aRelationshipHasClass",
            Self::EntitySpecializes => "entitySpecializes",
            Self::RelationshipSpecializes => "relationshipSpecializes",
            Self::PropertySpecializes => "propertySpecializes",
            Self::LinkSpecializes => "linkSpecializes",
            Self::EligibleProperties => "eligibleProperties",
            Self::EligibleLinks => "eligibleLinks",
            Self::PropertyOccurrences => "propertyOccurrences",
            Self::ValueRanges => "valueRanges",
        }
    }

    /// Status codes this check can reject with.
    pub const fn statuses(self) -> &'static [StatusCode] {
        match self {
            Self::UniqueIds => &[StatusCode::MissingId, StatusCode::DuplicateId],
            Self::PropertyHasClass | Self::LinkHasClass => &[
                StatusCode::MissingAttachmentReference,
                StatusCode::InvalidAttachmentReference,
            ],
            Self::EntityHasClass | Self::RelationshipHasClass => &[
                StatusCode::MissingInstanceClass,
                StatusCode::InvalidClassReference,
            ],
            Self::EntitySpecializes
            | Self::RelationshipSpecializes
            | Self::PropertySpecializes
            | Self::LinkSpecializes => &[StatusCode::InvalidClassReference],
            Self::EligibleProperties => &[StatusCode::IneligibleAttachment],
            Self::EligibleLinks => &[
                StatusCode::IneligibleAttachment,
                StatusCode::IneligibleEndpoint,
            ],
            Self::PropertyOccurrences => &[StatusCode::Cardinality],
            Self::ValueRanges => &[StatusCode::ValueRange],
        }
    }
}

impl fmt::Display for CheckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check id '{0}'")]
pub struct CheckIdError(pub String);

impl FromStr for CheckId {
    type Err = CheckIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|check| check.as_str() == s)
            .ok_or_else(|| CheckIdError(s.to_string()))
    }
}
