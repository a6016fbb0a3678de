//! User name value object
//!
//! Login names are matched exactly as stored. The only rules enforced are
//! the ones no stored name could violate: non-empty, bounded, printable.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub const MAX_USER_NAME_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("User name is empty")]
    Empty,

    #[error("User name must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("User name contains control characters")]
    ControlCharacter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let raw = raw.into();

        if raw.is_empty() {
            return Err(UserNameError::Empty);
        }

        let char_count = raw.chars().count();
        if char_count > MAX_USER_NAME_LENGTH {
            return Err(UserNameError::TooLong {
                max: MAX_USER_NAME_LENGTH,
                actual: char_count,
            });
        }

        if raw.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
