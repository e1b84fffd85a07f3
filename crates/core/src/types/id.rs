//! Product identifiers.
//!
//! Product ids are short opaque strings (`w1`, `s1`, ...). Cart lines hold
//! them as weak references, so an id that parses is not guaranteed to exist
//! in the catalog.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input is empty or only whitespace.
    #[error("product id cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("product id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains whitespace or a control character.
    #[error("product id contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A product identifier.
///
/// Surrounding whitespace is trimmed. The remaining text must be non-empty,
/// at most [`ProductId::MAX_LENGTH`] characters and free of whitespace and control
/// characters.
///
/// ```
/// use fa_portfolio_core::ProductId;
///
/// let id = ProductId::parse(" w1 ").unwrap();
/// assert_eq!(id.as_str(), "w1");
///
/// assert!(ProductId::parse("").is_err());
/// assert!(ProductId::parse("w 1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Maximum length of a product id, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, too long, or contains
    /// whitespace or control characters.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ProductIdError::Empty);
        }

        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(ProductIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = trimmed
            .chars()
            .find(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ProductIdError::InvalidCharacter(bad));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert!(ProductId::parse("w1").is_ok());
        assert!(ProductId::parse("ghost-id").is_ok());
        assert!(ProductId::parse("alarm_clock.v2").is_ok());
    }

    #[test]
    fn test_parse_trims() {
        let id = ProductId::parse("  s1\n").unwrap();
        assert_eq!(id.as_str(), "s1");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse("   "), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(ProductId::MAX_LENGTH + 1);
        assert!(matches!(
            ProductId::parse(&long),
            Err(ProductIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_length_counts_characters() {
        let at_limit = "é".repeat(ProductId::MAX_LENGTH);
        assert!(ProductId::parse(&at_limit).is_ok());

        let over = "é".repeat(ProductId::MAX_LENGTH + 1);
        assert_eq!(
            ProductId::parse(&over),
            Err(ProductIdError::TooLong {
                max: ProductId::MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_parse_inner_whitespace() {
        assert_eq!(
            ProductId::parse("w 1"),
            Err(ProductIdError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let parsed: Result<ProductId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let id: ProductId = serde_json::from_str("\"a1\"").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"a1\"");
    }

    #[test]
    fn test_display() {
        let id = ProductId::parse("w2").unwrap();
        assert_eq!(format!("{id}"), "w2");
    }
}
