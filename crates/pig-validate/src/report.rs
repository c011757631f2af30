//! The result record handed back to callers.

use crate::check::CheckId;
use crate::violation::{ConstraintViolation, StatusCode};
use serde::{Deserialize, Serialize};

/// First failing check and what it found.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{check}: {violation}")]
pub struct Rejection {
    pub check: CheckId,
    #[source]
    pub violation: ConstraintViolation,
}

impl Rejection {
    pub fn status(&self) -> StatusCode {
        self.violation.status()
    }
}

/// `{ ok, status, statusText?, check? }`. `ok` is true exactly when
/// `status` is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub ok: bool,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<CheckId>,
}

impl ValidationResult {
    pub fn accepted() -> Self {
        Self {
            ok: true,
            status: StatusCode::Ok.code(),
            status_text: None,
            check: None,
        }
    }

    pub fn rejected(rejection: &Rejection) -> Self {
        Self {
            ok: false,
            status: rejection.status().code(),
            status_text: Some(rejection.violation.to_string()),
            check: Some(rejection.check),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.ok
    }
}

impl From<Result<(), Rejection>> for ValidationResult {
    fn from(outcome: Result<(), Rejection>) -> Self {
        match outcome {
            Ok(()) => Self::accepted(),
            Err(rejection) => Self::rejected(&rejection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::Subject;
    use pig_model::ItemType;
    use serde_json::json;

    #[test]
    fn accepted_serializes_without_text() {
        let value = serde_json::to_value(ValidationResult::accepted()).expect("serialize");
        assert_eq!(value, json!({"ok": true, "status": 0}));
    }

    #[test]
    fn rejected_carries_code_text_and_check() {
        let rejection = Rejection {
            check: CheckId::UniqueIds,
            violation: ConstraintViolation::DuplicateId {
                id: "e1".to_string(),
                first: 0,
                second: 3,
            },
        };
        let value = serde_json::to_value(ValidationResult::rejected(&rejection))
            .expect("serialize");
        assert_eq!(
            value,
            json!({
                "ok": false,
                "status": 671,
                "statusText": "id 'e1' is used twice: first at graph index 0, again at 3",
                "check": "uniqueIds"
            })
        );
    }

    #[test]
    fn rejection_display_prefixes_check() {
        let rejection = Rejection {
            check: CheckId::EntityHasClass,
            violation: ConstraintViolation::MissingReference {
                subject: Subject::item(ItemType::AnEntity, "e1"),
                field: "hasClass",
            },
        };
        assert_eq!(
            rejection.to_string(),
            "anEntityHasClass: pig:anEntity 'e1' has no hasClass"
        );
        assert_eq!(rejection.status(), StatusCode::MissingInstanceClass);
    }
}
