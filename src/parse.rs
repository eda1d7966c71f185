//! Per-type parse rules used by the accessors.

use crate::errors::ParseError;

/// Parses a base-10 signed integer of platform-native width.
///
/// An optional leading `+` or `-` is accepted. Whitespace, digit separators
/// and overflow are errors.
pub fn parse_int(value: &str) -> Result<isize, ParseError> {
    if value.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(value.parse::<isize>()?)
}

/// Parses `true`/`false` in any ASCII case, or the literals `1`/`0`.
pub fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "1" => Ok(true),
        "0" => Ok(false),
        v if v.eq_ignore_ascii_case("true") => Ok(true),
        v if v.eq_ignore_ascii_case("false") => Ok(false),
        "" => Err(ParseError::Empty),
        other => Err(ParseError::InvalidBool(other.to_string())),
    }
}

/// Splits on `,`, trims each item and drops the ones left empty.
///
/// Never fails. A value made only of separators and whitespace yields an
/// empty list.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
