//! Error types for dashboard loading

use std::fmt;
use crate::relations::RelationWarning;

/// Errors that can occur while loading a dashboard definition
#[derive(Debug)]
pub enum ParseError {
    /// The definition file could not be read
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The YAML is malformed or does not describe a dashboard
    Yaml {
        source: serde_yaml::Error,
    },
    /// Strict loading only: the relation tree disagrees with the filter list
    Relations {
        dashboard: String,
        warnings: Vec<RelationWarning>,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io { path, source } => {
                write!(f, "Cannot read dashboard file '{}': {}", path, source)
            }
            ParseError::Yaml { source } => {
                write!(f, "Invalid dashboard definition: {}", source)
            }
            ParseError::Relations { dashboard, warnings } => {
                write!(f, "Dashboard '{}' has an inconsistent relation tree", dashboard)?;
                for warning in warnings {
                    write!(f, "; {}", warning)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
            ParseError::Yaml { source } => Some(source),
            ParseError::Relations { .. } => None,
        }
    }
}

impl From<serde_yaml::Error> for ParseError {
    fn from(err: serde_yaml::Error) -> Self {
        ParseError::Yaml { source: err }
    }
}
