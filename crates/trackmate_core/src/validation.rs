//! Title validation rules shared by task creation and edit.
//!
//! # Invariants
//! - Validation operates on the trimmed title and returns it; callers persist
//!   the returned value, never the raw input.
//! - Length is counted in UTF-16 code units, the unit browser clients use for
//!   string length, so both sides accept exactly the same titles.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum accepted title length after trimming, in UTF-16 code units.
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum accepted title length after trimming, in UTF-16 code units.
pub const TITLE_MAX_LEN: usize = 200;

/// Reason a candidate title was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleValidationError {
    Empty,
    TooShort { len: usize },
    TooLong { len: usize },
}

impl Display for TitleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "title must not be empty"),
            Self::TooShort { len } => write!(
                f,
                "title must be at least {TITLE_MIN_LEN} characters, got {len}"
            ),
            Self::TooLong { len } => write!(
                f,
                "title must be at most {TITLE_MAX_LEN} characters, got {len}"
            ),
        }
    }
}

impl Error for TitleValidationError {}

/// Length of `title` in UTF-16 code units.
///
/// Characters outside the Basic Multilingual Plane (most emoji) count as two.
pub fn title_len(title: &str) -> usize {
    title.encode_utf16().count()
}

/// Validates a raw title and returns its trimmed form.
///
/// # Errors
/// - `Empty` when nothing but whitespace remains.
/// - `TooShort` below [`TITLE_MIN_LEN`].
/// - `TooLong` above [`TITLE_MAX_LEN`].
pub fn validate_title(raw: &str) -> Result<String, TitleValidationError> {
    let trimmed = raw.trim();
    let len = title_len(trimmed);

    if len == 0 {
        return Err(TitleValidationError::Empty);
    }
    if len < TITLE_MIN_LEN {
        return Err(TitleValidationError::TooShort { len });
    }
    if len > TITLE_MAX_LEN {
        return Err(TitleValidationError::TooLong { len });
    }

    Ok(trimmed.to_string())
}
