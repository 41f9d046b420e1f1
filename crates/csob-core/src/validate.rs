//! Field validation helpers shared by the request models.
//!
//! Lengths are counted in characters, not bytes: the gateway limits are
//! expressed on Unicode text (Czech names, addresses).

use crate::error::ValidationError;

/// Fail when `value` is longer than `max` characters.
pub fn max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Fail when `value` is empty or longer than `max` characters.
pub fn non_empty_max_chars(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    max_chars(field, value, max)
}

/// Fail when `value` lies outside `min..=max`.
pub fn in_range<T>(field: &str, value: T, min: T, max: T) -> Result<(), ValidationError>
where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if value < min || value > max {
        return Err(ValidationError::new(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

/// Apply `check` to an optional value, accepting `None`.
pub fn optional<T, F>(value: Option<T>, check: F) -> Result<(), ValidationError>
where
    F: FnOnce(T) -> Result<(), ValidationError>,
{
    match value {
        Some(v) => check(v),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        // 5 characters, 10 bytes
        assert!(max_chars("name", "ščřžý", 5).is_ok());
        assert!(max_chars("name", "ščřžýá", 5).is_err());
    }

    #[test]
    fn max_chars_reports_field() {
        let err = max_chars("city", &"a".repeat(51), 50).unwrap_err();
        assert_eq!(err.field, "city");
        assert!(err.reason.contains("51"));
    }

    #[test]
    fn non_empty_rejects_empty() {
        let err = non_empty_max_chars("orderNo", "", 10).unwrap_err();
        assert_eq!(err.reason, "must not be empty");
    }

    #[test]
    fn in_range_is_inclusive() {
        assert!(in_range("quantity", 1u32, 1, 99).is_ok());
        assert!(in_range("quantity", 99u32, 1, 99).is_ok());
        assert!(in_range("quantity", 0u32, 1, 99).is_err());
        assert!(in_range("quantity", 100u32, 1, 99).is_err());
    }

    #[test]
    fn optional_skips_none() {
        assert!(optional(None::<&str>, |v| max_chars("x", v, 0)).is_ok());
        assert!(optional(Some("a"), |v| max_chars("x", v, 0)).is_err());
    }
}
