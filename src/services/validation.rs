//! Form validation: turns `validator` output into a flat field→message map.

use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::errors::{FieldErrors, ServiceError};

/// Key used by `validator` for struct-level (schema) errors
const SCHEMA_FIELD: &str = "__all__";

/// Validate an input and collect per-field messages
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ServiceError> {
    input
        .validate()
        .map_err(|errors| ServiceError::ValidationError(field_errors(&errors)))
}

/// Flatten nested errors.
///
/// Nested structs report under their own field names since shared order
/// fields are flattened into the parent form. List items are reported as
/// `field[index].inner`. Only the first message per field is kept.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    collect(errors, None, &mut out);
    out
}

fn collect(errors: &ValidationErrors, prefix: Option<&str>, out: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let name = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(first) = list.first() {
                    let key = if *field == SCHEMA_FIELD {
                        prefix.map_or_else(|| SCHEMA_FIELD.to_string(), str::to_string)
                    } else {
                        name
                    };
                    out.entry(key).or_insert_with(|| message(first));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, prefix, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{}[{}]", name, index)), out);
                }
            }
        }
    }
}

fn message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::ValidationError(field_errors(&errors))
    }
}
