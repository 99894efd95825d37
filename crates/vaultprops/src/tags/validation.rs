//! Field validation for tags.
//!
//! - Tag names are required: absent or empty names are rejected.
//! - Tag values are required but may be empty.
//! - Both are bounded by a configured maximum length, counted in characters.

/// Validates a tag name against `max_len`, returning the accepted name.
///
/// # Examples
/// ```
/// use vaultprops::tags::validation::validate_tag_name;
///
/// assert!(validate_tag_name(Some("Env"), 256).is_ok());
/// assert!(validate_tag_name(Some("environment"), 3).is_err());
/// assert!(validate_tag_name(Some(""), 256).is_err());
/// assert!(validate_tag_name(None, 256).is_err());
/// ```
pub fn validate_tag_name(name: Option<&str>, max_len: usize) -> Result<&str, FieldValidationError> {
    let name = match name {
        Some(n) if !n.is_empty() => n,
        _ => return Err(FieldValidationError::Empty { field: "name" }),
    };
    check_length("name", name, max_len)?;
    Ok(name)
}

/// Validates a tag value against `max_len`, returning the accepted value.
///
/// # Examples
/// ```
/// use vaultprops::tags::validation::validate_tag_value;
///
/// assert!(validate_tag_value(Some(""), 256).is_ok());
/// assert!(validate_tag_value(Some("Prod"), 2).is_err());
/// assert!(validate_tag_value(None, 256).is_err());
/// ```
pub fn validate_tag_value(value: Option<&str>, max_len: usize) -> Result<&str, FieldValidationError> {
    let value = value.ok_or(FieldValidationError::Missing { field: "value" })?;
    check_length("value", value, max_len)?;
    Ok(value)
}

fn check_length(field: &'static str, text: &str, max: usize) -> Result<(), FieldValidationError> {
    let actual = text.chars().count();
    if actual > max {
        return Err(FieldValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Error type for tag field validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    /// Required field is absent or empty
    Empty { field: &'static str },
    /// Field is absent (empty is allowed)
    Missing { field: &'static str },
    /// Field is longer than the configured maximum
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl std::fmt::Display for FieldValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValidationError::Empty { field } => write!(f, "tag {} cannot be empty", field),
            FieldValidationError::Missing { field } => write!(f, "tag {} cannot be null", field),
            FieldValidationError::TooLong { field, max, actual } => write!(
                f,
                "tag {} is too long ({} characters), maximum length is {}",
                field, actual, max
            ),
        }
    }
}

impl std::error::Error for FieldValidationError {}
