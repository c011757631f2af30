//! # pig-model
//!
//! Data model for product information graphs (PIG).
//!
//! This crate provides:
//! - the metaclasses (`PropertyClass`, `LinkClass`, `EntityClass`,
//!   `RelationshipClass`) and instances (`EntityInstance`,
//!   `RelationshipInstance`) as serde types
//! - attached values (`PropertyValue`, `LinkValue`) and literals
//! - `Package` and a guarded document loader
//!
//! It does not judge whether a graph is valid. That is `pig-validate`'s job.
//!
//! ## Data model
//!
//! ```text
//! Package { id, modified, graph }
//!     │
//! Item ─┬─ Property / Link / Entity / Relationship      (classes)
//!       └─ anEntity / aRelationship ── hasClass ──▶ class
//!              ├─ hasProperty   [aProperty  → Property]
//!              ├─ hasSourceLink [aSourceLink → Link]     (aRelationship only)
//!              └─ hasTargetLink [aTargetLink → Link]
//! ```

pub mod item;
pub mod package;
pub mod value;

pub use item::{
    DEFAULT_MAX_COUNT, DEFAULT_MIN_COUNT, EntityClass, EntityInstance, InstanceRef, Item, ItemType,
    LinkClass, LinkDirection, LinkValue, PropertyClass, PropertyValue, RelationshipClass,
    RelationshipInstance,
};
pub use package::{
    DEFAULT_MAX_PACKAGE_BYTES, LoadedPackage, Package, PackageError, PackageLimits,
    package_digest, read_package, read_package_from_path,
};
pub use value::{Datatype, EligibleValue, EligibleValueEntry, LanguageText, Literal};
