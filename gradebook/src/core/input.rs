//! Validation of raw text coming from a front end.

use super::error::ActionError;

/// Trim `raw` and reject it if nothing is left.
pub fn require_field<'a>(label: &'static str, raw: &'a str) -> Result<&'a str, ActionError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ActionError::MissingField(label));
    }
    Ok(value)
}

/// Parse a grade as a signed integer. Surrounding whitespace is ignored.
pub fn parse_grade(raw: &str) -> Result<i64, ActionError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ActionError::InvalidGradeFormat(raw.to_string()))
}
