use std::collections::HashSet;
use crate::filter_model::{Filter, FilterGuid, RelationNode};
use super::tree::{
    append_with_and, check_relations, order_by_filters, replace_filter_in_relations,
    restrict_relations, RelationWarning,
};

/// A reconciled tree together with the contract problems found on the way in
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub relations: Option<RelationNode>,
    pub warnings: Vec<RelationWarning>,
}

/// Carry a relation tree across a change of the filter list
///
/// Returns None when there was no tree (implicit AND) or no filters remain.
pub fn reconcile(
    old_filters: &[Filter],
    old_tree: Option<&RelationNode>,
    new_filters: &[Filter],
) -> Option<RelationNode> {
    reconcile_with_warnings(old_filters, old_tree, new_filters).relations
}

/// [`reconcile`], also reporting caller contract violations in the old pair
///
/// Violations never stop reconciliation: leaves with unknown guids are
/// pruned, duplicate leaves keep their first occurrence and filters missing
/// from the tree are ANDed on like new ones.
pub fn reconcile_with_warnings(
    old_filters: &[Filter],
    old_tree: Option<&RelationNode>,
    new_filters: &[Filter],
) -> Reconciliation {
    let Some(tree) = old_tree else {
        return Reconciliation { relations: None, warnings: vec![] };
    };

    let warnings = check_relations(old_filters, tree);
    for warning in &warnings {
        tracing::warn!(%warning, "relation tree does not match its filter list");
    }

    if new_filters.is_empty() {
        return Reconciliation { relations: None, warnings };
    }

    let old_guids: Vec<FilterGuid> = old_filters.iter().map(|f| f.guid.clone()).collect();
    let new_guids: Vec<FilterGuid> = new_filters.iter().map(|f| f.guid.clone()).collect();
    let old_set: HashSet<&FilterGuid> = old_guids.iter().collect();
    let new_set: HashSet<&FilterGuid> = new_guids.iter().collect();

    let removed: Vec<(usize, &FilterGuid)> = old_guids
        .iter()
        .enumerate()
        .filter(|(_, g)| !new_set.contains(g))
        .collect();
    let added: Vec<(usize, &FilterGuid)> = new_guids
        .iter()
        .enumerate()
        .filter(|(_, g)| !old_set.contains(g))
        .collect();

    // One filter swapped for another at the same position takes over its leaf
    let mut working = tree.clone();
    let mut carried: Vec<FilterGuid> = old_guids
        .iter()
        .filter(|g| new_set.contains(g))
        .cloned()
        .collect();
    if let ([(old_pos, old_guid)], [(new_pos, new_guid)]) = (removed.as_slice(), added.as_slice()) {
        if old_pos == new_pos && working.contains(old_guid) {
            tracing::debug!(old = %old_guid, new = %new_guid, "filter replaced in place");
            working = replace_filter_in_relations(&working, old_guid, new_guid);
            carried.push((*new_guid).clone());
        }
    }

    let pruned = restrict_relations(&working, &carried);

    let present: HashSet<FilterGuid> = pruned
        .as_ref()
        .map(|t| t.leaves().into_iter().cloned().collect())
        .unwrap_or_default();
    let missing: Vec<FilterGuid> = new_guids
        .iter()
        .filter(|g| !present.contains(*g))
        .cloned()
        .collect();

    tracing::debug!(
        removed = removed.len(),
        added = added.len(),
        appended = missing.len(),
        "reconciled relation tree"
    );

    let relations = append_with_and(pruned, &missing).map(|t| order_by_filters(&t, &new_guids));
    Reconciliation { relations, warnings }
}
