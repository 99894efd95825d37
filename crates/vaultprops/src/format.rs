//! Display helpers shared by property projections.

/// Text shown in place of an unset optional value.
pub const UNSET: &str = "(none)";

/// Render an optional value for display, using [`UNSET`] when absent.
pub fn optional_to_string<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => UNSET.to_string(),
    }
}

/// Parse optional display text back into an integer.
///
/// Blank input and the [`UNSET`] sentinel both mean "no value".
pub fn parse_optional_int(text: Option<&str>) -> Result<Option<i32>, std::num::ParseIntError> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(t) if t == UNSET => Ok(None),
        Some(t) => t.parse().map(Some),
    }
}

/// "1 tag", "2 tags".
pub fn pluralize(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_to_string_uses_sentinel() {
        assert_eq!(optional_to_string(Some(30)), "30");
        assert_eq!(optional_to_string::<i32>(None), "(none)");
    }

    #[test]
    fn parse_optional_int_accepts_blank_and_sentinel() {
        assert_eq!(parse_optional_int(None), Ok(None));
        assert_eq!(parse_optional_int(Some("  ")), Ok(None));
        assert_eq!(parse_optional_int(Some("(none)")), Ok(None));
        assert_eq!(parse_optional_int(Some(" 80 ")), Ok(Some(80)));
        assert!(parse_optional_int(Some("eighty")).is_err());
    }

    #[test]
    fn pluralize_counts() {
        assert_eq!(pluralize(0, "tag"), "0 tags");
        assert_eq!(pluralize(1, "tag"), "1 tag");
        assert_eq!(pluralize(2, "lifetime action"), "2 lifetime actions");
    }
}
