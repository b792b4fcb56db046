//! Presence checks shared by every form.

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("required");
        err.message = Some("is required".into());
        return Err(err);
    }
    Ok(())
}

/// Records a required-field failure on `errors` when `value` is blank.
pub fn require(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if let Err(err) = validate_not_blank(value) {
        errors.add(field, err);
    }
}

/// Adds a field error with a custom message.
pub fn reject(errors: &mut ValidationErrors, field: &'static str, code: &'static str, message: &str) {
    let mut err = ValidationError::new(code);
    err.message = Some(message.to_string().into());
    errors.add(field, err);
}

/// One line per failing field, sorted by field name: `shop name is required`.
pub fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut lines: Vec<String> = errors
        .errors()
        .iter()
        .flat_map(|(field, kind)| {
            let label = field.replace('_', " ");
            match kind {
                ValidationErrorsKind::Field(errs) => errs
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => format!("{} {}", label, message),
                        None => format!("{} is invalid", label),
                    })
                    .collect::<Vec<_>>(),
                _ => vec![format!("{} is invalid", label)],
            }
        })
        .collect();
    lines.sort();
    lines
}

/// `Ok` when nothing was recorded.
pub fn finish(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_are_reported_by_field() {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "vendor_name", "  ");
        require(&mut errors, "address", "Main Road");
        reject(&mut errors, "quantity", "range", "must be > 0");

        assert_eq!(
            describe(&errors),
            vec!["quantity must be > 0", "vendor name is required"]
        );
        assert!(finish(errors).is_err());
        assert!(finish(ValidationErrors::new()).is_ok());
    }
}
