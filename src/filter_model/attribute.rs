//! Attribute references and date levels

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Granularity of a date attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateLevel {
    Years,
    Quarters,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
}

impl fmt::Display for DateLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLevel::Years => write!(f, "years"),
            DateLevel::Quarters => write!(f, "quarters"),
            DateLevel::Months => write!(f, "months"),
            DateLevel::Weeks => write!(f, "weeks"),
            DateLevel::Days => write!(f, "days"),
            DateLevel::Hours => write!(f, "hours"),
            DateLevel::Minutes => write!(f, "minutes"),
        }
    }
}

impl FromStr for DateLevel {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "years" | "year" => Ok(DateLevel::Years),
            "quarters" | "quarter" => Ok(DateLevel::Quarters),
            "months" | "month" => Ok(DateLevel::Months),
            "weeks" | "week" => Ok(DateLevel::Weeks),
            "days" | "day" => Ok(DateLevel::Days),
            "hours" | "hour" => Ok(DateLevel::Hours),
            "minutes" | "minute" => Ok(DateLevel::Minutes),
            _ => Err(ParseAttributeError {
                input: s.to_string(),
                message: "unknown date level".to_string(),
            }),
        }
    }
}

/// Reference to the dimension column a filter constrains
///
/// Text form is `dimension.column`, optionally suffixed with a date level:
/// `dates.date:months`. Two references are the same slot only if the
/// dimension, column and level all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeRef {
    pub dimension: String,
    pub column: String,
    pub level: Option<DateLevel>,
}

impl AttributeRef {
    pub fn new(dimension: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            dimension: dimension.into(),
            column: column.into(),
            level: None,
        }
    }

    /// Same column at a given date granularity
    pub fn at_level(mut self, level: DateLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn is_date_level(&self) -> bool {
        self.level.is_some()
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Some(level) => write!(f, "{}.{}:{}", self.dimension, self.column, level),
            None => write!(f, "{}.{}", self.dimension, self.column),
        }
    }
}

/// Error when parsing an attribute reference or date level
#[derive(Debug, Clone)]
pub struct ParseAttributeError {
    pub input: String,
    pub message: String,
}

impl fmt::Display for ParseAttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid attribute '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for ParseAttributeError {}

impl FromStr for AttributeRef {
    type Err = ParseAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, level) = match s.split_once(':') {
            Some((path, level)) => (path, Some(level.trim().parse::<DateLevel>()?)),
            None => (s, None),
        };

        let parts: Vec<&str> = path.trim().split('.').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(ParseAttributeError {
                input: s.to_string(),
                message: "expected 'dimension.column' or 'dimension.column:level'".to_string(),
            });
        }

        Ok(AttributeRef {
            dimension: parts[0].to_string(),
            column: parts[1].to_string(),
            level,
        })
    }
}

impl<'de> Deserialize<'de> for AttributeRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AttributeRef::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for AttributeRef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_attribute() {
        let attr: AttributeRef = "markets.country".parse().unwrap();
        assert_eq!(attr.dimension, "markets");
        assert_eq!(attr.column, "country");
        assert!(attr.level.is_none());
    }

    #[test]
    fn test_parse_date_level_attribute() {
        let attr: AttributeRef = "dates.date:Months".parse().unwrap();
        assert_eq!(attr.level, Some(DateLevel::Months));
        assert_eq!(attr.to_string(), "dates.date:months");
    }

    #[test]
    fn test_level_distinguishes_slots() {
        let years = AttributeRef::new("dates", "date").at_level(DateLevel::Years);
        let months = AttributeRef::new("dates", "date").at_level(DateLevel::Months);
        assert_ne!(years, months);
    }

    #[test]
    fn test_parse_invalid_attribute() {
        assert!("country".parse::<AttributeRef>().is_err());
        assert!("a.b.c".parse::<AttributeRef>().is_err());
        assert!("dates.date:fortnights".parse::<AttributeRef>().is_err());
    }
}
