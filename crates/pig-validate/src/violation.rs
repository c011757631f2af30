//! Constraint violations and their stable status codes.
//!
//! Every checker reports the first violation it finds as a
//! [`ConstraintViolation`]. The rendered message becomes the `statusText` of a
//! rejected [`crate::ValidationResult`]; [`ConstraintViolation::status`] picks
//! the numeric code downstream tooling branches on.

use pig_model::ItemType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric status codes, one per violation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum StatusCode {
    Ok = 0,
    MissingId = 670,
    DuplicateId = 671,
    MissingAttachmentReference = 672,
    InvalidAttachmentReference = 673,
    MissingInstanceClass = 674,
    InvalidClassReference = 675,
    IneligibleAttachment = 676,
    IneligibleEndpoint = 677,
    Cardinality = 678,
    ValueRange = 679,
}

impl StatusCode {
    pub const ALL: [StatusCode; 11] = [
        Self::Ok,
        Self::MissingId,
        Self::DuplicateId,
        Self::MissingAttachmentReference,
        Self::InvalidAttachmentReference,
        Self::MissingInstanceClass,
        Self::InvalidClassReference,
        Self::IneligibleAttachment,
        Self::IneligibleEndpoint,
        Self::Cardinality,
        Self::ValueRange,
    ];

    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Short human-readable category.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Ok => "accepted",
            Self::MissingId => "item without id",
            Self::DuplicateId => "duplicate id",
            Self::MissingAttachmentReference => "attachment missing hasClass or idRef",
            Self::InvalidAttachmentReference => "attachment hasClass unresolved or of wrong kind",
            Self::MissingInstanceClass => "instance missing hasClass",
            Self::InvalidClassReference => {
                "instance hasClass or specializes unresolved or of wrong kind"
            }
            Self::IneligibleAttachment => "ineligible property or link",
            Self::IneligibleEndpoint => "ineligible link endpoint",
            Self::Cardinality => "cardinality violation",
            Self::ValueRange => "value-range violation",
        }
    }
}

impl From<StatusCode> for u16 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl TryFrom<u16> for StatusCode {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == code)
            .ok_or_else(|| format!("unknown status code {code}"))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// What a reference or finding is about: a graph item, or one attachment of
/// an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    Item {
        kind: ItemType,
        id: String,
    },
    Attachment {
        kind: ItemType,
        instance: String,
        index: usize,
    },
}

impl Subject {
    pub fn item(kind: ItemType, id: impl Into<String>) -> Self {
        Self::Item {
            kind,
            id: id.into(),
        }
    }

    pub fn attachment(kind: ItemType, instance: impl Into<String>, index: usize) -> Self {
        Self::Attachment {
            kind,
            instance: instance.into(),
            index,
        }
    }

    pub fn is_attachment(&self) -> bool {
        matches!(self, Self::Attachment { .. })
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item { kind, id } => write!(f, "{kind} '{id}'"),
            Self::Attachment {
                kind,
                instance,
                index,
            } => write!(f, "{kind} #{index} of '{instance}'"),
        }
    }
}

/// Per-language (or total) count that fell outside `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrenceCount {
    /// `None` for non-string properties and for untagged strings.
    pub lang: Option<String>,
    pub count: u32,
}

impl fmt::Display for OccurrenceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lang {
            Some(lang) => write!(f, "language '{lang}' has {}", self.count),
            None => write!(f, "{} occurrence(s)", self.count),
        }
    }
}

/// First violation found by a checker.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConstraintViolation {
    #[error("{kind} at graph index {index} has no id")]
    MissingId { kind: ItemType, index: usize },

    #[error("id '{id}' is used twice: first at graph index {first}, again at {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    #[error("{subject} has no {field}")]
    MissingReference {
        subject: Subject,
        field: &'static str,
    },

    #[error("{subject}: {field} '{target}' not found in package (expected kind {expected})")]
    ReferenceNotFound {
        subject: Subject,
        field: &'static str,
        target: String,
        expected: ItemType,
    },

    #[error("{subject}: {field} '{target}' expected kind {expected}, found kind {found}")]
    ReferenceKindMismatch {
        subject: Subject,
        field: &'static str,
        target: String,
        expected: ItemType,
        found: ItemType,
    },

    #[error(
        "{subject}: class '{class}' is not in {list} of '{owner}' (eligible: [{}])",
        .eligible.join(", ")
    )]
    IneligibleAttachment {
        subject: Subject,
        class: String,
        list: &'static str,
        owner: String,
        eligible: Vec<String>,
    },

    #[error(
        "{subject}: link class '{link_class}' does not admit '{endpoint}' of class '{endpoint_class}' (eligibleEndpoint: [{}])",
        .eligible.join(", ")
    )]
    IneligibleEndpoint {
        subject: Subject,
        link_class: String,
        endpoint: String,
        endpoint_class: String,
        eligible: Vec<String>,
    },

    #[error(
        "{instance}: property '{property}' has no values present, need at least one language with {min} value(s)"
    )]
    MissingOccurrence {
        instance: Subject,
        property: String,
        min: u32,
    },

    #[error(
        "{instance}: property '{property}' must occur {min}..={max} time(s): {}",
        render_counts(.counts)
    )]
    Occurrence {
        instance: Subject,
        property: String,
        min: u32,
        max: u32,
        counts: Vec<OccurrenceCount>,
    },

    #[error("{subject} (class '{property}'): {reason}")]
    ValueRange {
        subject: Subject,
        property: String,
        reason: String,
    },
}

fn render_counts(counts: &[OccurrenceCount]) -> String {
    counts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConstraintViolation {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingId { .. } => StatusCode::MissingId,
            Self::DuplicateId { .. } => StatusCode::DuplicateId,
            Self::MissingReference { subject, .. } => {
                if subject.is_attachment() {
                    StatusCode::MissingAttachmentReference
                } else {
                    StatusCode::MissingInstanceClass
                }
            }
            Self::ReferenceNotFound { subject, .. }
            | Self::ReferenceKindMismatch { subject, .. } => {
                if subject.is_attachment() {
                    StatusCode::InvalidAttachmentReference
                } else {
                    StatusCode::InvalidClassReference
                }
            }
            Self::IneligibleAttachment { .. } => StatusCode::IneligibleAttachment,
            Self::IneligibleEndpoint { .. } => StatusCode::IneligibleEndpoint,
            Self::MissingOccurrence { .. } | Self::Occurrence { .. } => StatusCode::Cardinality,
            Self::ValueRange { .. } => StatusCode::ValueRange,
        }
    }
}
