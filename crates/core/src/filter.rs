//! The single optional name/title filter accepted by list endpoints.

use crate::error::CoreError;

/// Longest filter term accepted, in characters.
pub const MAX_FILTER_LEN: usize = 100;

/// Trim a raw filter value and check its length.
///
/// `None` stays `None`; a value that is blank after trimming is rejected
/// rather than treated as "no filter".
pub fn normalize(field: &str, raw: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let term = raw.trim();
    if term.is_empty() {
        return Err(CoreError::invalid_field(field, format!("{field} cannot be empty")));
    }
    if term.chars().count() > MAX_FILTER_LEN {
        return Err(CoreError::invalid_field(
            field,
            format!("{field} cannot exceed {MAX_FILTER_LEN} characters"),
        ));
    }

    Ok(Some(term.to_string()))
}

/// Build an `ILIKE` pattern matching `term` as a literal substring.
///
/// Must be used with `ESCAPE '\'`.
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
