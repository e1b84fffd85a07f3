//! Messaging destination (seller phone number) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`DestinationId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DestinationIdError {
    /// The input string is empty.
    #[error("destination id cannot be empty")]
    Empty,
    /// The input contains something other than digits and separators.
    #[error("destination id contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// Wrong number of digits.
    #[error("destination id must have {min}-{max} digits (got {actual})")]
    Length {
        /// Minimum digit count.
        min: usize,
        /// Maximum digit count.
        max: usize,
        /// Digits found.
        actual: usize,
    },
}

/// The contact a checkout deep link is addressed to.
///
/// Messaging links take the phone number in international format as bare
/// digits, so a leading `+` and any spaces or hyphens are stripped.
///
/// ## Constraints
///
/// - 7-15 digits after stripping (E.164 allows at most 15)
/// - Only digits, `+`, spaces and `-` in the input
///
/// ## Examples
///
/// ```
/// use fa_portfolio_core::DestinationId;
///
/// let id = DestinationId::parse("+91 97983-03821").unwrap();
/// assert_eq!(id.as_str(), "919798303821");
///
/// assert!(DestinationId::parse("").is_err());
/// assert!(DestinationId::parse("call-me").is_err());
/// assert!(DestinationId::parse("123").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DestinationId(String);

impl DestinationId {
    /// Minimum number of digits.
    pub const MIN_DIGITS: usize = 7;
    /// Maximum number of digits (E.164).
    pub const MAX_DIGITS: usize = 15;

    /// Parse a `DestinationId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Contains characters other than digits, `+`, spaces or `-`
    /// - Has fewer than 7 or more than 15 digits
    pub fn parse(s: &str) -> Result<Self, DestinationIdError> {
        if s.trim().is_empty() {
            return Err(DestinationIdError::Empty);
        }

        let mut digits = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '+' | ' ' | '-' => {}
                other => return Err(DestinationIdError::InvalidCharacter(other)),
            }
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(DestinationIdError::Length {
                min: Self::MIN_DIGITS,
                max: Self::MAX_DIGITS,
                actual: digits.len(),
            });
        }

        Ok(Self(digits))
    }

    /// Returns the digits as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DestinationId {
    type Err = DestinationIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DestinationId {
    type Error = DestinationIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DestinationId> for String {
    fn from(id: DestinationId) -> Self {
        id.0
    }
}

impl AsRef<str> for DestinationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_digits() {
        let id = DestinationId::parse("919798303821").unwrap();
        assert_eq!(id.as_str(), "919798303821");
    }

    #[test]
    fn test_parse_strips_separators() {
        let id = DestinationId::parse("+1 415-555-0100").unwrap();
        assert_eq!(id.as_str(), "14155550100");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(DestinationId::parse("  "), Err(DestinationIdError::Empty));
    }

    #[test]
    fn test_parse_invalid_character() {
        assert_eq!(
            DestinationId::parse("91(979)8303821"),
            Err(DestinationIdError::InvalidCharacter('('))
        );
    }

    #[test]
    fn test_parse_length() {
        assert!(matches!(
            DestinationId::parse("12345"),
            Err(DestinationIdError::Length { actual: 5, .. })
        ));
        assert!(matches!(
            DestinationId::parse("1234567890123456"),
            Err(DestinationIdError::Length { actual: 16, .. })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = DestinationId::parse("919798303821").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"919798303821\"");
        let parsed: DestinationId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
