use std::collections::BTreeMap;

use serde::Serialize;

use crate::auth::{Module, Role};
use crate::models::work_order::{OrderType, WorkOrderStatus};

/// Field name to the first message reported for that field.
///
/// Rendered inline next to the offending input; never raised as a panic.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {}", format_field_errors(.0))]
    ValidationError(FieldErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot transition from status '{from}' to '{to}'")]
    InvalidTransition {
        from: WorkOrderStatus,
        to: WorkOrderStatus,
    },

    #[error("Order type mismatch: expected '{expected}', found '{found}'")]
    OrderTypeMismatch {
        expected: OrderType,
        found: OrderType,
    },

    #[error("Permission table has no entry for module '{module}' and role '{role}'")]
    IncompletePermissionTable { module: Module, role: Role },
}

impl ServiceError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound(_) => "resource_not_found",
            ServiceError::Forbidden(_) => "forbidden",
            ServiceError::ValidationError(_) => "validation_error",
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::InvalidTransition { .. } => "invalid_transition",
            ServiceError::OrderTypeMismatch { .. } => "order_type_mismatch",
            ServiceError::IncompletePermissionTable { .. } => "incomplete_permission_table",
        }
    }

    /// Per-field messages for form errors, if this is one.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ServiceError::ValidationError(errors) => Some(errors),
            _ => None,
        }
    }

    /// Build a validation error for a single field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.to_string(), message.into());
        ServiceError::ValidationError(errors)
    }
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_field() {
        let mut errors = FieldErrors::new();
        errors.insert("client_name".into(), "required".into());
        errors.insert("order_date".into(), "in the future".into());

        let err = ServiceError::ValidationError(errors);
        assert_eq!(
            err.to_string(),
            "Validation error: client_name: required; order_date: in the future"
        );
        assert_eq!(err.code(), "validation_error");
        assert_eq!(err.field_errors().map(|e| e.len()), Some(2));
    }

    #[test]
    fn transition_error_uses_status_ids() {
        let err = ServiceError::InvalidTransition {
            from: WorkOrderStatus::Registration,
            to: WorkOrderStatus::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Cannot transition from status 'registration' to 'completed'"
        );
        assert!(err.field_errors().is_none());
    }

    #[test]
    fn single_field_helper() {
        let err = ServiceError::field("personal_file_id", "unknown file");
        assert_eq!(
            err.field_errors().and_then(|e| e.get("personal_file_id")).map(String::as_str),
            Some("unknown file")
        );
    }
}
