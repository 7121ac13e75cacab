use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::Template;

/// Custom validator rejecting empty or whitespace-only text.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(Cow::from("title required"));
        return Err(error);
    }

    Ok(())
}

/// Every section needs a title and at least one valid item after filtering.
/// Errors are keyed by family and carry the offending section's index and
/// title.
pub fn validate_sections(template: &Template) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for (family, index, section) in template.iter() {
        if let Err(mut error) = not_blank(section.title()) {
            error.add_param(Cow::from("index"), &index);
            errors.add(family.key(), error);
        }

        if section.valid_items().next().is_some() {
            continue;
        }

        let mut error = ValidationError::new("items");
        error.message = Some(Cow::from("at least one valid item required"));
        error.add_param(Cow::from("index"), &index);
        error.add_param(Cow::from("title"), &section.title());
        errors.add(family.key(), error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Folds the result of a derived `validate()` and extra errors into one.
pub(crate) fn merge(
    derived: Result<(), ValidationErrors>,
    extra: Result<(), ValidationErrors>,
) -> Result<(), ValidationErrors> {
    match (derived, extra) {
        (Ok(()), Ok(())) => Ok(()),
        (Err(errors), Ok(())) | (Ok(()), Err(errors)) => Err(errors),
        (Err(mut errors), Err(extra)) => {
            let merged = errors.errors_mut();
            for (field, kind) in extra.into_errors() {
                match (merged.get_mut(&field), kind) {
                    (
                        Some(ValidationErrorsKind::Field(existing)),
                        ValidationErrorsKind::Field(more),
                    ) => existing.extend(more),
                    (_, kind) => {
                        merged.insert(field, kind);
                    }
                }
            }

            Err(errors)
        }
    }
}
