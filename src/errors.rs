use thiserror::Error;

/// Errors produced by the per-type parse rules.
///
/// These are public so the parse rules can be reused on their own, but the
/// accessors never return them: every failure collapses to the caller's
/// fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was the empty string.
    #[error("empty value")]
    Empty,

    /// The value is not a base-10 integer that fits in an `isize`.
    ///
    /// Automatically converted from `std::num::ParseIntError` through the
    /// `From` trait, which covers non-numeric content and overflow alike.
    #[error("invalid integer: {0}")]
    InvalidInt(#[from] std::num::ParseIntError),

    /// The value is not one of `true`, `false`, `1` or `0`.
    #[error("invalid boolean: {0:?}")]
    InvalidBool(String),

    /// The value is not a well-formed duration expression such as `1h30m`.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration { input: String, reason: &'static str },

    /// The variable is set but its value is not valid Unicode.
    #[error("value is not valid unicode")]
    NotUnicode,
}

impl ParseError {
    pub(crate) fn duration(input: &str, reason: &'static str) -> Self {
        Self::InvalidDuration {
            input: input.to_string(),
            reason,
        }
    }
}

/// Why a lookup fell back to the caller's default.
///
/// Internal only. It exists so the fallback path can be traced; callers of the
/// accessors cannot observe it.
#[derive(Debug, Error)]
pub(crate) enum LookupError {
    #[error("not set")]
    Absent,

    #[error("set to the empty string")]
    Empty,

    #[error("malformed: {0}")]
    Malformed(#[from] ParseError),
}

impl LookupError {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Empty => "empty",
            Self::Malformed(_) => "malformed",
        }
    }
}
