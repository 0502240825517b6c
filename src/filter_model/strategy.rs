//! Merge strategy for caller-supplied override filters

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How override filters interact with a widget's intrinsic filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergeStrategy {
    /// Intrinsic filters win attribute conflicts
    WidgetFirst,
    /// Override filters win attribute conflicts
    #[default]
    CodeFirst,
    /// Only override filters are used
    CodeOnly,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::WidgetFirst => write!(f, "widgetFirst"),
            MergeStrategy::CodeFirst => write!(f, "codeFirst"),
            MergeStrategy::CodeOnly => write!(f, "codeOnly"),
        }
    }
}

/// Error when parsing a merge strategy string
#[derive(Debug, Clone)]
pub struct ParseMergeStrategyError {
    pub input: String,
}

impl fmt::Display for ParseMergeStrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown merge strategy '{}'. Valid options: widgetFirst, codeFirst, codeOnly", self.input)
    }
}

impl std::error::Error for ParseMergeStrategyError {}

impl FromStr for MergeStrategy {
    type Err = ParseMergeStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['_', '-'], "").as_str() {
            "widgetfirst" => Ok(MergeStrategy::WidgetFirst),
            "codefirst" => Ok(MergeStrategy::CodeFirst),
            "codeonly" => Ok(MergeStrategy::CodeOnly),
            _ => Err(ParseMergeStrategyError { input: s.to_string() }),
        }
    }
}

impl MergeStrategy {
    /// Parse, falling back to `CodeFirst` for unrecognised values
    pub fn from_str_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|e: ParseMergeStrategyError| {
            tracing::warn!(input = %e.input, "unknown merge strategy, using codeFirst");
            MergeStrategy::CodeFirst
        })
    }
}

// Deserialization is lenient: configuration typos degrade to the default
impl<'de> Deserialize<'de> for MergeStrategy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(MergeStrategy::from_str_lenient(&s))
    }
}

impl Serialize for MergeStrategy {
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
    fn test_parse_strategies() {
        assert_eq!("widgetFirst".parse::<MergeStrategy>().unwrap(), MergeStrategy::WidgetFirst);
        assert_eq!("code_only".parse::<MergeStrategy>().unwrap(), MergeStrategy::CodeOnly);
        assert!("bogus".parse::<MergeStrategy>().is_err());
    }

    #[test]
    fn test_lenient_falls_back_to_code_first() {
        assert_eq!(MergeStrategy::from_str_lenient("bogus"), MergeStrategy::CodeFirst);
        assert_eq!(MergeStrategy::default(), MergeStrategy::CodeFirst);
    }
}
