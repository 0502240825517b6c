use std::fmt;

/// Errors raised by the jump-to-dashboard interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The action is not valid in the current state
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    /// Menu selection out of range
    UnknownTarget { index: usize, available: usize },
    /// Filters were requested before a target was chosen
    NoTargetSelected,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationError::InvalidTransition { state, action } => {
                write!(f, "Cannot {} while navigation is {}", action, state)
            }
            NavigationError::UnknownTarget { index, available } => {
                write!(f, "Target {} does not exist ({} available)", index, available)
            }
            NavigationError::NoTargetSelected => {
                write!(f, "No jump target has been selected")
            }
        }
    }
}

impl std::error::Error for NavigationError {}
