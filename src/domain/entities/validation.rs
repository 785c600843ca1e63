use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

pub const MIN_SKILL_LEVEL: i32 = 1;
pub const MAX_SKILL_LEVEL: i32 = 5;

/// Required text fields must contain something other than whitespace.
pub fn validate_required_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(new_validation_error("blank", "Value cannot be empty"));
    }
    Ok(())
}

/// Every technology token must be non-empty; the list itself may be empty.
pub fn validate_tokens(tokens: &[String]) -> Result<(), ValidationError> {
    if tokens.iter().any(|t| t.trim().is_empty()) {
        return Err(new_validation_error("blank_token", "Entries cannot be empty"));
    }
    Ok(())
}

pub fn validate_level(level: i32) -> Result<(), ValidationError> {
    if !(MIN_SKILL_LEVEL..=MAX_SKILL_LEVEL).contains(&level) {
        return Err(new_validation_error("level_range", "Level must be between 1 and 5"));
    }
    Ok(())
}

pub fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

/// Collects per-field failures for hand-written validation paths.
#[derive(Default)]
pub struct FieldChecks {
    errors: ValidationErrors,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: &'static str, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.errors.add(field, err);
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert!(validate_required_text("   ").is_err());
        assert!(validate_required_text("Rust").is_ok());
    }

    #[test]
    fn level_bounds_are_inclusive() {
        assert!(validate_level(1).is_ok());
        assert!(validate_level(5).is_ok());
        assert!(validate_level(0).is_err());
        assert!(validate_level(6).is_err());
    }

    #[test]
    fn field_checks_report_each_failing_field() {
        let mut checks = FieldChecks::new();
        checks.check("title", validate_required_text(""));
        checks.check("level", validate_level(3));
        checks.check("technologies", validate_tokens(&["Rust".into(), " ".into()]));

        let errors = checks.finish().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 2);
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("technologies"));
    }
}
