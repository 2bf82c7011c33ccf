//! Field validation for the schema-driven product form.
//!
//! Each rule mirrors a schema flag: `required`, `min_length`, and for
//! number fields a decimal pattern plus an optional `min` bound. The
//! first failing rule wins, checked in that order.

use thiserror::Error;

use crate::models::schema_model::{FieldSchema, FieldType, FieldValue};

/// Why a single field failed validation. The messages are what the form
/// shows next to the field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("This field must be checked")]
    MustBeChecked,

    #[error("Must be at least {min} characters")]
    TooShort { min: usize },

    #[error("Must be a number")]
    NotANumber,

    #[error("Must be at least {min}")]
    BelowMin { min: f64 },
}

/// Validate one entered value against its field schema.
///
/// Blank optional fields always pass: `min_length`, the number pattern
/// and `min` only apply once something was entered.
pub fn validate_field(schema: &FieldSchema, value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Bool(checked) => {
            if schema.required && !checked {
                return Err(ValidationError::MustBeChecked);
            }
            Ok(())
        }
        FieldValue::Text(text) => {
            if schema.required && text.is_empty() {
                return Err(ValidationError::Required);
            }
            if let Some(min) = schema.min_length {
                if !text.is_empty() && text.chars().count() < min {
                    return Err(ValidationError::TooShort { min });
                }
            }
            if schema.field_type == FieldType::Number && !text.is_empty() {
                if !is_decimal_string(text) {
                    return Err(ValidationError::NotANumber);
                }
                if let Some(min) = schema.min {
                    let entered: f64 = text.parse().map_err(|_| ValidationError::NotANumber)?;
                    if entered < min {
                        return Err(ValidationError::BelowMin { min });
                    }
                }
            }
            Ok(())
        }
    }
}

/// `^[0-9]+(\.[0-9]+)?$`: digits with an optional single decimal part.
/// Signs, exponents and stray whitespace all fail.
fn is_decimal_string(text: &str) -> bool {
    let mut parts = text.splitn(2, '.');
    let all_digits =
        |part: &str| !part.is_empty() && part.bytes().all(|byte| byte.is_ascii_digit());
    let integer = parts.next().unwrap_or("");
    let fraction = parts.next();
    all_digits(integer) && fraction.map_or(true, all_digits)
}
