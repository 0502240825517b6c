//! Navigation filter composer (verb module)
//!
//! Builds the seed filters for a "jump to dashboard" navigation and drives
//! the interaction that leads to it.

mod compose;
mod config;
mod data_point;
mod error;
mod interaction;

pub use compose::compose;
pub use config::{ExtraFilters, JtdConfig, JtdTarget, JtdTrigger, OpenMode};
pub use data_point::{filters_from_points, DataPoint, DataPointEntry};
pub use error::NavigationError;
pub use interaction::{JtdInteraction, NavigationContext, OpenedDashboard};
