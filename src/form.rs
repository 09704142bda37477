//! Create/edit form values and their validation rules.
//!
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles")
});

/// Raw text entered into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
}

impl FormData {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
    }
}

/// Per-field error shown beneath each input after a rejected submit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<ValidationError>,
    pub email: Option<ValidationError>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Check both fields; every failing field is reported, not just the first.
pub fn validate(data: &FormData) -> Result<(), FieldErrors> {
    let errors = FieldErrors {
        name: validate_name(&data.name).err(),
        email: validate_email(&data.email).err(),
    };
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_pattern_accepts_and_rejects() {
        assert!(validate_email("bob@x.com").is_ok());
        assert!(validate_email("a.b@sub.example.org").is_ok());
        assert_eq!(validate_email("foo"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("foo@bar"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a b@x.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a@@x.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn both_fields_reported_together() {
        let errs = validate(&FormData::new("", "nope")).unwrap_err();
        assert_eq!(errs.name, Some(ValidationError::NameRequired));
        assert_eq!(errs.email, Some(ValidationError::InvalidEmail));
    }

    #[test]
    fn whitespace_name_counts_as_present() {
        assert!(validate_name(" ").is_ok());
    }
}
