//! Filter model types (nouns)
//!
//! Plain data consumed and produced by the engine.

mod attribute;
mod dashboard;
mod filter;
mod ids;
mod relation;
mod strategy;
mod widget;

pub use attribute::{AttributeRef, DateLevel, ParseAttributeError};
pub use dashboard::Dashboard;
pub use filter::{Filter, FilterGuid, FilterKind, FilterShape, MembersFilter, ConditionalFilter, Condition, CascadingFilter};
pub use ids::{IdSource, UuidIds, SequentialIds};
pub use relation::{RelationNode, RelationOp};
pub use strategy::{MergeStrategy, ParseMergeStrategyError};
pub use widget::{Widget, WidgetType, Panel, PanelRole, FilterMode, FilterExclusionRules};
