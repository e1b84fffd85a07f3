//! Product categories.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Category`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0} (expected one of: Wrist Watch, Stopwatch, Alarm Clock)")]
pub struct CategoryParseError(pub String);

/// The fixed set of categories the portfolio sells.
///
/// Serialized with the display names used on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Wrist Watch")]
    WristWatch,
    #[serde(rename = "Stopwatch")]
    Stopwatch,
    #[serde(rename = "Alarm Clock")]
    AlarmClock,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 3] = [Self::WristWatch, Self::Stopwatch, Self::AlarmClock];

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::WristWatch => "Wrist Watch",
            Self::Stopwatch => "Stopwatch",
            Self::AlarmClock => "Alarm Clock",
        }
    }

    /// URL/CLI friendly name.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::WristWatch => "wrist-watch",
            Self::Stopwatch => "stopwatch",
            Self::AlarmClock => "alarm-clock",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.display_name())
    }
}

impl std::str::FromStr for Category {
    type Err = CategoryParseError;

    /// Accepts the display name or slug, ignoring case, spaces, `-` and `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "wristwatch" => Ok(Self::WristWatch),
            "stopwatch" => Ok(Self::Stopwatch),
            "alarmclock" => Ok(Self::AlarmClock),
            _ => Err(CategoryParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_variants() {
        assert_eq!("Wrist Watch".parse::<Category>().unwrap(), Category::WristWatch);
        assert_eq!("wrist-watch".parse::<Category>().unwrap(), Category::WristWatch);
        assert_eq!("STOPWATCH".parse::<Category>().unwrap(), Category::Stopwatch);
        assert_eq!("alarm_clock".parse::<Category>().unwrap(), Category::AlarmClock);
        assert!("Wall Clock".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&Category::AlarmClock).unwrap();
        assert_eq!(json, "\"Alarm Clock\"");
        let parsed: Category = serde_json::from_str("\"Wrist Watch\"").unwrap();
        assert_eq!(parsed, Category::WristWatch);
    }

    #[test]
    fn test_display_matches_slug_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.display_name());
        }
    }
}
