//! # pig-validate
//!
//! Package-level constraint validation for product information graphs.
//!
//! A [`Package`](pig_model::Package) is accepted only when every selected
//! check passes. The first violation rejects the whole package; later checks
//! are not run.
//!
//! ## Pipeline
//!
//! ```text
//! uniqueIds                              670 / 671
//!     │
//! a{Property,Link}HasClass               672 / 673
//!     │
//! {anEntity,aRelationship}HasClass       674 / 675
//!     │
//! {entity,relationship,property,link}Specializes   675
//!     │
//! eligibleProperties / eligibleLinks     676 / 677   ← inheritance-aware
//!     │
//! propertyOccurrences                    678         ← per language
//!     │
//! valueRanges                            679         ← datatype-aware
//! ```
//!
//! Every check is a plain function over the package and the lookup tables in
//! [`index`], returning `Result<(), ConstraintViolation>`.

pub mod check;
pub mod eligibility;
pub mod index;
pub mod inheritance;
pub mod occurrence;
pub mod orchestrator;
pub mod reference;
pub mod report;
pub mod uniqueness;
pub mod value_range;
pub mod violation;

pub use check::{CheckId, CheckIdError};
pub use inheritance::Eligibility;
pub use orchestrator::{ValidationOptions, check_constraints, validate};
pub use report::{Rejection, ValidationResult};
pub use violation::{ConstraintViolation, OccurrenceCount, StatusCode, Subject};
