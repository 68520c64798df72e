pub mod departments;
pub mod employees;
pub mod skills;

pub use departments::{DepartmentService, DepartmentServiceImpl};
pub use employees::{EmployeeService, EmployeeServiceImpl};
pub use skills::{SkillService, SkillServiceImpl};

use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record not found")]
    NotFound,
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("record is still referenced by employees")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl FieldError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    Required,
    TooLong,
    Invalid,
    NotUnique,
    NotFound,
}

/// Employee reference embedded in department and skill detail payloads.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeRef {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email: String,
}

impl From<crate::entities::employees::Model> for EmployeeRef {
    fn from(employee: crate::entities::employees::Model) -> Self {
        Self {
            id: employee.id,
            full_name: employee.full_name(),
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
        }
    }
}

pub(crate) const MAX_FIELD_LEN: usize = 255;

pub(crate) fn validate_required_text(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, ValidationReason::Required));
    } else if value.chars().count() > MAX_FIELD_LEN {
        errors.push(FieldError::new(field, ValidationReason::TooLong));
    }
}

pub(crate) fn validate_email_text(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FieldError>,
) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, ValidationReason::Required));
    } else if value.chars().count() > MAX_FIELD_LEN {
        errors.push(FieldError::new(field, ValidationReason::TooLong));
    } else if !validator::validate_email(value) {
        errors.push(FieldError::new(field, ValidationReason::Invalid));
    }
}

/// The store-level unique index is the authoritative uniqueness check; the
/// lookups in the services are a friendlier pre-check. A concurrent
/// duplicate write gets mapped back to the same field error here.
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_empty_and_whitespace() {
        let mut errors = Vec::new();
        validate_required_text("name", "", &mut errors);
        validate_required_text("name", "   ", &mut errors);
        assert_eq!(
            errors,
            vec![
                FieldError::new("name", ValidationReason::Required),
                FieldError::new("name", ValidationReason::Required),
            ]
        );
    }

    #[test]
    fn required_text_rejects_over_255_chars() {
        let mut errors = Vec::new();
        validate_required_text("name", &"x".repeat(256), &mut errors);
        assert_eq!(errors, vec![FieldError::new("name", ValidationReason::TooLong)]);

        errors.clear();
        validate_required_text("name", &"x".repeat(255), &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn email_text_rejects_malformed_addresses() {
        for bad in ["", "   ", "not-an-email", "a@", "@x.com", "a b@x.com"] {
            let mut errors = Vec::new();
            validate_email_text("email", bad, &mut errors);
            assert!(!errors.is_empty(), "expected {:?} to be rejected", bad);
        }

        let mut errors = Vec::new();
        validate_email_text("email", "john@x.com", &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn validation_reason_serializes_snake_case() {
        let err = FieldError::new("email", ValidationReason::NotUnique);
        assert_eq!(
            serde_json::to_value(err).unwrap(),
            serde_json::json!({"field": "email", "reason": "not_unique"})
        );
    }
}
