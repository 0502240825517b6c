//! Relation tree reconciler (verb module)
//!
//! Keeps an optional AND/OR tree valid as its filter list is edited.

mod reconcile;
mod tree;

pub use reconcile::{reconcile, reconcile_with_warnings, Reconciliation};
pub use tree::{
    append_with_and, check_relations, collect_leaves, map_leaves, order_by_filters, query_relations,
    replace_filter_in_relations, restrict_relations, RelationWarning,
};
