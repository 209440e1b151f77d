//! Form validation helpers shared by the create/update inputs.

use std::borrow::Cow;

use businessos_shared::{AppError, AppResult};
use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Validates an input and maps failures to [`AppError::Validation`].
///
/// # Errors
///
/// Returns `AppError::Validation` listing every failing field.
pub fn validate_input<T: Validate>(input: &T) -> AppResult<()> {
    input
        .validate()
        .map_err(|errors| AppError::Validation(describe(&errors)))
}

/// Flattens validation errors into `"msg; msg"`, ordered by field name.
///
/// Nested structs and list items are walked depth-first.
#[must_use]
pub fn describe(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_messages(errors, &mut messages);
    messages.join("; ")
}

fn collect_messages(errors: &ValidationErrors, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| {
                    e.message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_messages(inner, out),
            ValidationErrorsKind::List(items) => {
                for inner in items.values() {
                    collect_messages(inner, out);
                }
            }
        }
    }
}

/// Rejects negative amounts.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative")
            .with_message(Cow::Borrowed("Amount cannot be negative")));
    }
    Ok(())
}

/// Rejects zero and negative amounts.
pub fn positive(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive")
            .with_message(Cow::Borrowed("Amount must be greater than zero")));
    }
    Ok(())
}

/// Rejects strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[derive(Validate)]
    struct Form {
        #[validate(custom(function = "not_blank", message = "Name is required"))]
        name: String,
        #[validate(custom(function = "non_negative"))]
        amount: Decimal,
    }

    #[test]
    fn test_valid_form() {
        let form = Form {
            name: "Travel".into(),
            amount: dec!(0),
        };
        assert!(validate_input(&form).is_ok());
    }

    #[test]
    fn test_messages_sorted_by_field() {
        let form = Form {
            name: "  ".into(),
            amount: dec!(-1),
        };
        let err = validate_input(&form).unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("Amount cannot be negative; Name is required".into())
        );
    }

    #[derive(Validate)]
    struct Order {
        #[validate(nested)]
        lines: Vec<Form>,
    }

    #[test]
    fn test_nested_messages_included() {
        let order = Order {
            lines: vec![Form {
                name: String::new(),
                amount: dec!(1),
            }],
        };
        let err = validate_input(&order).unwrap_err();
        assert_eq!(err, AppError::Validation("Name is required".into()));
    }

    #[test]
    fn test_positive() {
        assert!(positive(&dec!(0.01)).is_ok());
        assert!(positive(&dec!(0)).is_err());
        assert!(positive(&dec!(-5)).is_err());
    }
}
