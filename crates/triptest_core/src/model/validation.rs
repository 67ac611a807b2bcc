//! Input validation shared by packing and planner constructors.

use crate::calendar::date_grid::{date_key, parse_date_key};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection raised before any entity is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text is empty after trimming. Carries the field name.
    BlankText(&'static str),
    /// Date field is present but not a valid `YYYY-MM-DD` key.
    InvalidDateKey { field: &'static str, value: String },
    /// Category string outside the closed category set.
    UnknownCategory(String),
    /// Bucket string outside the closed bucket set.
    UnknownBucket(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText(field) => write!(f, "{field} must not be blank"),
            Self::InvalidDateKey { field, value } => {
                write!(f, "{field} must be a YYYY-MM-DD date, got `{value}`")
            }
            Self::UnknownCategory(value) => write!(f, "unknown category `{value}`"),
            Self::UnknownBucket(value) => write!(f, "unknown bucket `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects blank results.
pub(crate) fn require_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankText(field));
    }
    Ok(trimmed.to_string())
}

/// Trims `value` and maps blank to `None`.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Parses `value` as a date key and re-renders it zero-padded.
pub(crate) fn canonical_date_key(value: &str) -> Option<String> {
    parse_date_key(value.trim()).map(date_key)
}

/// Checks that `value` parses as a date key and returns its canonical form.
///
/// Stored keys are compared as strings, so `2024-3-5` becomes `2024-03-05`.
pub(crate) fn require_date_key(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankText(field));
    }
    match canonical_date_key(trimmed) {
        Some(key) => Ok(key),
        None => Err(ValidationError::InvalidDateKey {
            field,
            value: trimmed.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{optional_text, require_date_key, require_text, ValidationError};

    #[test]
    fn require_text_trims_and_rejects_blank() {
        assert_eq!(require_text("name", "  Spoon \n"), Ok("Spoon".to_string()));
        assert_eq!(
            require_text("name", "   "),
            Err(ValidationError::BlankText("name"))
        );
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" gate 4 ")), Some("gate 4".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn require_date_key_rejects_garbage() {
        let err = require_date_key("date", "tomorrow").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDateKey { field: "date", .. }));
        assert_eq!(require_date_key("date", "2024-03-05").unwrap(), "2024-03-05");
    }

    #[test]
    fn require_date_key_pads_month_and_day() {
        assert_eq!(require_date_key("date", " 2024-3-5 ").unwrap(), "2024-03-05");
        assert!(require_date_key("date", "2024-2-30").is_err());
    }
}
