//! Dashboard to widget filter resolver (verb module)
//!
//! Dashboard filters + widget metadata -> WidgetFilterScope

mod eligibility;
mod resolve;
mod types;

pub use eligibility::{highlight_attributes, highlight_roles, is_highlight_candidate};
pub use resolve::{resolve, resolve_with_relations};
pub use types::WidgetFilterScope;
