//! Cascading filter splitter/joiner (verb module)
//!
//! Resolution only ever works on the flattened form: one filter per level,
//! in level order. Joining is the inverse used when edits are written back.

use std::collections::HashMap;
use crate::filter_model::{CascadingFilter, Filter, FilterGuid, FilterKind, RelationNode};
use crate::relations::map_leaves;

/// Flatten a filter into its level filters
///
/// Non-cascading filters come back unchanged as a single-element list. Each
/// level inherits the parent's `disabled` and `background` flags (a level is
/// disabled or background if either it or the parent is) and the parent's
/// instance id when the parent has one. Levels keep their own guids and
/// attributes, including the date level, so each is valid on its own.
pub fn split(filter: &Filter) -> Vec<Filter> {
    let FilterKind::Cascading(cascade) = &filter.kind else {
        return vec![filter.clone()];
    };

    cascade
        .levels
        .iter()
        .map(|level| Filter {
            disabled: filter.disabled || level.disabled,
            background: filter.background || level.background,
            instance_id: filter.instance_id.clone().or_else(|| level.instance_id.clone()),
            ..level.clone()
        })
        // A nested cascade is flattened as part of its parent
        .flat_map(|level| split(&level))
        .collect()
}

/// Flatten every cascading filter of a list, preserving list order
pub fn split_all(filters: &[Filter]) -> Vec<Filter> {
    filters.iter().flat_map(split).collect()
}

/// Rebuild a cascade from level filters
pub fn join(levels: &[Filter]) -> CascadingFilter {
    CascadingFilter { levels: levels.to_vec() }
}

/// Rebuild a whole cascading filter
///
/// The parent is disabled or background only when every level is; the
/// shared instance id is kept if all levels agree on it.
pub fn join_into(guid: impl Into<FilterGuid>, levels: &[Filter]) -> Filter {
    let all = |pred: fn(&Filter) -> bool| !levels.is_empty() && levels.iter().all(pred);
    let instance_id = match levels.first().and_then(|l| l.instance_id.clone()) {
        Some(id) if levels.iter().all(|l| l.instance_id.as_deref() == Some(id.as_str())) => Some(id),
        _ => None,
    };

    Filter {
        disabled: all(|l| l.disabled),
        background: all(|l| l.background),
        instance_id,
        ..Filter::cascading(guid, join(levels))
    }
}

/// Replace leaves that reference cascading filters by an AND over their levels
///
/// A cascade with no levels drops out of the tree entirely.
pub fn split_in_relations(tree: &RelationNode, filters: &[Filter]) -> Option<RelationNode> {
    let level_guids: HashMap<&FilterGuid, Vec<FilterGuid>> = filters
        .iter()
        .filter(|f| matches!(f.kind, FilterKind::Cascading(_)))
        .map(|f| (&f.guid, split(f).into_iter().map(|l| l.guid).collect()))
        .collect();

    map_leaves(tree, |guid| match level_guids.get(guid) {
        None => Some(RelationNode::Leaf(guid.clone())),
        Some(levels) if levels.is_empty() => None,
        Some(levels) if levels.len() == 1 => Some(RelationNode::Leaf(levels[0].clone())),
        Some(levels) => Some(RelationNode::and(
            levels.iter().cloned().map(RelationNode::Leaf).collect(),
        )),
    })
}
