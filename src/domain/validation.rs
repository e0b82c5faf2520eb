//! Field-level validation rules shared by the request schemas

use once_cell::sync::Lazy;
use regex::Regex;

use super::{DomainError, FieldError};

pub const NAME_MAX_LEN: usize = 100;
pub const TITLE_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 254;
pub const YEAR_STARTED_MIN: i32 = 1900;
pub const YEAR_STARTED_MAX: i32 = 2100;
pub const PAGES_MIN: i32 = 1;
pub const PAGES_MAX: i32 = 10_000;

// Dot-atom local part, then a dotted domain of word/hyphen labels
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\w!#$%&'*+/=?^`{|}~-]+(\.[\w!#$%&'*+/=?^`{|}~-]+)*@[\w-]+(\.[\w-]+)+$",
    )
    .expect("email pattern is a valid regex")
});

/// Implemented by every request body accepted by the API.
///
/// Handlers only ever see payloads for which `validate` returned `Ok`.
pub trait Validate {
    fn validate(&self) -> Result<(), DomainError>;
}

/// Accumulates field errors so a single response reports every bad field.
#[derive(Debug, Default)]
pub struct Violations {
    errors: Vec<FieldError>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Non-blank string of at most `max` characters.
    ///
    /// Stricter than a bare minimum length: a value made only of whitespace
    /// is rejected as empty.
    pub fn text(&mut self, field: &str, value: &str, max: usize) {
        if value.trim().is_empty() {
            self.push(field, "must not be empty");
        } else if value.chars().count() > max {
            self.push(field, format!("must be at most {} characters", max));
        }
    }

    pub fn email(&mut self, field: &str, value: &str) {
        if value.len() > EMAIL_MAX_LEN {
            self.push(field, format!("must be at most {} characters", EMAIL_MAX_LEN));
        } else if !is_valid_email(value) {
            self.push(field, "is not a valid email address");
        }
    }

    pub fn range(&mut self, field: &str, value: i32, min: i32, max: i32) {
        if value < min || value > max {
            self.push(field, format!("must be between {} and {}", min, max));
        }
    }

    /// Unwraps a patch field, recording an error when it was sent as `null`.
    ///
    /// Returns the value only when the field was present with a value.
    pub fn present<'a, T>(&mut self, field: &str, value: &'a Option<Option<T>>) -> Option<&'a T> {
        match value {
            None => None,
            Some(None) => {
                self.push(field, "must not be null");
                None
            }
            Some(Some(v)) => Some(v),
        }
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.errors))
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Lowercases the domain of an address, leaving the local part untouched.
///
/// Stored emails always go through here, so uniqueness ignores domain case.
pub fn normalize_email(value: &str) -> String {
    match value.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(result: Result<(), DomainError>) -> Vec<String> {
        match result {
            Err(DomainError::Validation(errors)) => errors.into_iter().map(|e| e.field).collect(),
            Ok(()) => vec![],
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("ada@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.org"));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ada@localhost"));
        assert!(!is_valid_email("ada@@x.com"));
        assert!(!is_valid_email("a da@x.com"));
        assert!(!is_valid_email("ada@x..com"));
        assert!(!is_valid_email("a<b@x.com"));
        assert!(!is_valid_email("a,b@x.com"));
        assert!(!is_valid_email("a;b@x.com"));
        assert!(!is_valid_email("\"ada\"@x.com"));
        assert!(!is_valid_email(".ada@x.com"));
        assert!(!is_valid_email("ada.@x.com"));
        assert!(is_valid_email("o'brien@x.com"));
    }

    #[test]
    fn test_normalize_email_lowercases_domain_only() {
        assert_eq!(normalize_email("Ada@X.COM"), "Ada@x.com");
        assert_eq!(normalize_email("ada@x.com"), "ada@x.com");
    }

    #[test]
    fn test_text_bounds() {
        let mut v = Violations::new();
        v.text("name", "", NAME_MAX_LEN);
        v.text("title", "   ", TITLE_MAX_LEN);
        v.text("ok", "Ada", NAME_MAX_LEN);
        assert_eq!(fields(v.into_result()), vec!["name", "title"]);

        let mut v = Violations::new();
        v.text("name", &"a".repeat(NAME_MAX_LEN), NAME_MAX_LEN);
        assert!(v.into_result().is_ok());

        let mut v = Violations::new();
        v.text("name", &"a".repeat(NAME_MAX_LEN + 1), NAME_MAX_LEN);
        assert_eq!(fields(v.into_result()), vec!["name"]);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let mut v = Violations::new();
        v.text("name", &"é".repeat(NAME_MAX_LEN), NAME_MAX_LEN);
        assert!(v.into_result().is_ok());
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut v = Violations::new();
        v.range("year_started", YEAR_STARTED_MIN, YEAR_STARTED_MIN, YEAR_STARTED_MAX);
        v.range("year_started", YEAR_STARTED_MAX, YEAR_STARTED_MIN, YEAR_STARTED_MAX);
        assert!(v.into_result().is_ok());

        let mut v = Violations::new();
        v.range("pages", PAGES_MIN - 1, PAGES_MIN, PAGES_MAX);
        v.range("pages", PAGES_MAX + 1, PAGES_MIN, PAGES_MAX);
        assert_eq!(fields(v.into_result()), vec!["pages", "pages"]);
    }

    #[test]
    fn test_present_distinguishes_null_from_absent() {
        let mut v = Violations::new();
        let absent: Option<Option<String>> = None;
        let null: Option<Option<String>> = Some(None);
        let set = Some(Some("Ada".to_string()));

        assert!(v.present("a", &absent).is_none());
        assert!(v.present("b", &null).is_none());
        assert_eq!(v.present("c", &set).map(String::as_str), Some("Ada"));
        assert_eq!(fields(v.into_result()), vec!["b"]);
    }
}
