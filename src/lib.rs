//! dashfilter - Resolve dashboard filters into per-widget query scopes
//!
//! This library provides:
//! - Filter model types (Filter, AttributeRef, RelationNode, Widget, Dashboard)
//! - Dashboard parsing from YAML
//! - Filter identity predicates and cascading split/join
//! - Relation tree reconciliation
//! - Dashboard → widget filter resolution
//! - External merge strategies
//! - Jump-to-dashboard filter composition
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `filter_model/` - filters, relation trees, widgets, dashboards, merge strategies
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → Dashboard
//! - `identity/` - Filter → shape and identity predicates
//! - `cascade/` - cascading Filter ↔ level filters
//! - `relations/` - old list + tree + new list → reconciled tree
//! - `resolver/` - Dashboard filters + Widget → WidgetFilterScope
//! - `merge/` - WidgetFilterScope + external filters → WidgetFilterScope
//! - `navigation/` - source filters + data points → target seed filters
//!
//! # Example
//!
//! ```ignore
//! use dashfilter::{parser, merge_scope, ExternalFilters, MergeStrategy};
//!
//! let dashboard = parser::parse_file("dashboard.yaml")?;
//! let scope = dashboard.scope_for("revenue-by-country").unwrap();
//! let scope = merge_scope(&scope, &ExternalFilters::default(), MergeStrategy::CodeFirst);
//! ```

pub mod filter_model;
pub mod identity;
pub mod cascade;
pub mod relations;
pub mod resolver;
pub mod merge;
pub mod navigation;
pub mod parser;
pub mod error;

// Re-export commonly used types
pub use filter_model::{
    AttributeRef, CascadingFilter, Condition, ConditionalFilter, Dashboard, DateLevel, Filter,
    FilterExclusionRules, FilterGuid, FilterKind, FilterMode, FilterShape, IdSource, MembersFilter,
    MergeStrategy, Panel, PanelRole, RelationNode, RelationOp, SequentialIds, UuidIds, Widget,
    WidgetType,
};
pub use cascade::{join, join_into, split, split_all, split_in_relations};
pub use relations::{reconcile, reconcile_with_warnings, check_relations, Reconciliation, RelationWarning};
pub use resolver::{resolve, resolve_with_relations, WidgetFilterScope};
pub use merge::{merge_by_strategy, merge_scope, ExternalFilters};
pub use navigation::{compose, filters_from_points, ExtraFilters, JtdConfig, JtdInteraction, JtdTarget, NavigationError};
pub use error::ParseError;
