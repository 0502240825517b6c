//! Structural operations on relation trees
//!
//! Every operation returns a new tree. Groups left empty are removed and
//! groups left with a single child are replaced by that child. When such a
//! collapse, or a leaf rewritten into a group, puts a group directly under a
//! parent with the same operator, its children are spliced into the parent.
//! Only that one level is flattened; same-operator nesting the user built is
//! left alone.

use std::collections::{HashMap, HashSet};
use std::fmt;
use crate::filter_model::{Filter, FilterGuid, RelationNode, RelationOp};

/// Caller contract violations found in a filter list / tree pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationWarning {
    /// A leaf references a guid that is not in the filter list
    UnknownLeaf(FilterGuid),
    /// The same guid appears in more than one leaf
    DuplicateLeaf(FilterGuid),
    /// A filter in the list has no leaf
    MissingLeaf(FilterGuid),
    /// Leaf count differs from the filter count
    CountMismatch { filters: usize, leaves: usize },
}

impl fmt::Display for RelationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationWarning::UnknownLeaf(guid) => {
                write!(f, "Relation leaf '{}' references no filter in the list", guid)
            }
            RelationWarning::DuplicateLeaf(guid) => {
                write!(f, "Filter '{}' appears in more than one relation leaf", guid)
            }
            RelationWarning::MissingLeaf(guid) => {
                write!(f, "Filter '{}' is missing from the relation tree", guid)
            }
            RelationWarning::CountMismatch { filters, leaves } => {
                write!(f, "Relation tree has {} leaves for {} filters", leaves, filters)
            }
        }
    }
}

/// Leaf guids in depth-first order, owned
pub fn collect_leaves(tree: &RelationNode) -> Vec<FilterGuid> {
    tree.leaves().into_iter().cloned().collect()
}

/// Check that every leaf names a listed filter and every filter has exactly one leaf
pub fn check_relations(filters: &[Filter], tree: &RelationNode) -> Vec<RelationWarning> {
    let listed: HashSet<&FilterGuid> = filters.iter().map(|f| &f.guid).collect();
    let leaves = tree.leaves();
    let mut warnings = Vec::new();

    let mut seen: HashSet<&FilterGuid> = HashSet::new();
    for guid in &leaves {
        if !listed.contains(guid) {
            warnings.push(RelationWarning::UnknownLeaf((*guid).clone()));
        } else if !seen.insert(*guid) {
            warnings.push(RelationWarning::DuplicateLeaf((*guid).clone()));
        }
    }

    for filter in filters {
        if !seen.contains(&filter.guid) {
            warnings.push(RelationWarning::MissingLeaf(filter.guid.clone()));
        }
    }

    if leaves.len() != filters.len() {
        warnings.push(RelationWarning::CountMismatch {
            filters: filters.len(),
            leaves: leaves.len(),
        });
    }

    warnings
}

enum Rebuilt {
    Kept(RelationNode),
    /// Result of a unary group collapsing into its only child
    Collapsed(RelationNode),
    /// A leaf rewritten into a group
    Expanded(RelationNode),
}

impl Rebuilt {
    fn into_node(self) -> RelationNode {
        match self {
            Rebuilt::Kept(node) | Rebuilt::Collapsed(node) | Rebuilt::Expanded(node) => node,
        }
    }
}

fn rebuild(
    node: &RelationNode,
    map_leaf: &mut dyn FnMut(&FilterGuid) -> Option<RelationNode>,
) -> Option<Rebuilt> {
    match node {
        RelationNode::Leaf(guid) => map_leaf(guid).map(|node| match node {
            RelationNode::Leaf(_) => Rebuilt::Kept(node),
            group => Rebuilt::Expanded(group),
        }),
        RelationNode::Group { op, children } => {
            let mut kept = Vec::with_capacity(children.len());
            for child in children {
                match rebuild(child, map_leaf) {
                    None => {}
                    Some(
                        Rebuilt::Collapsed(RelationNode::Group { op: inner, children: grand })
                        | Rebuilt::Expanded(RelationNode::Group { op: inner, children: grand }),
                    ) if inner == *op => {
                        kept.extend(grand);
                    }
                    Some(rebuilt) => kept.push(rebuilt.into_node()),
                }
            }
            match kept.len() {
                0 => None,
                1 => kept.pop().map(Rebuilt::Collapsed),
                _ => Some(Rebuilt::Kept(RelationNode::Group { op: *op, children: kept })),
            }
        }
    }
}

/// Rewrite leaves through `map_leaf` (None drops the leaf), then collapse
pub fn map_leaves<F>(tree: &RelationNode, mut map_leaf: F) -> Option<RelationNode>
where
    F: FnMut(&FilterGuid) -> Option<RelationNode>,
{
    rebuild(tree, &mut map_leaf).map(Rebuilt::into_node)
}

/// Keep only leaves whose guid is in `keep`; duplicate leaves keep their first occurrence
pub fn restrict_relations(tree: &RelationNode, keep: &[FilterGuid]) -> Option<RelationNode> {
    let allowed: HashSet<&FilterGuid> = keep.iter().collect();
    let mut seen: HashSet<FilterGuid> = HashSet::new();
    map_leaves(tree, |guid| {
        if allowed.contains(guid) && seen.insert(guid.clone()) {
            Some(RelationNode::Leaf(guid.clone()))
        } else {
            None
        }
    })
}

/// The tree with disabled filters removed, for query composition
pub fn query_relations(filters: &[Filter], tree: &RelationNode) -> Option<RelationNode> {
    let active: Vec<FilterGuid> = filters
        .iter()
        .filter(|f| !f.disabled)
        .map(|f| f.guid.clone())
        .collect();
    restrict_relations(tree, &active)
}

/// Point every leaf of `old` at `new` instead
pub fn replace_filter_in_relations(
    tree: &RelationNode,
    old: &FilterGuid,
    new: &FilterGuid,
) -> RelationNode {
    map_leaves(tree, |guid| {
        let target = if guid == old { new } else { guid };
        Some(RelationNode::Leaf(target.clone()))
    })
    // Mapping never drops a leaf, so the tree cannot vanish
    .unwrap_or_else(|| tree.clone())
}

/// AND new leaves onto a tree
///
/// A top-level AND group is extended in place; anything else is wrapped
/// in a new AND group. With no tree, a single guid becomes a lone leaf.
pub fn append_with_and(tree: Option<RelationNode>, guids: &[FilterGuid]) -> Option<RelationNode> {
    if guids.is_empty() {
        return tree;
    }
    let mut leaves: Vec<RelationNode> = guids.iter().cloned().map(RelationNode::Leaf).collect();

    match tree {
        None if leaves.len() == 1 => leaves.pop(),
        None => Some(RelationNode::and(leaves)),
        Some(RelationNode::Group { op: RelationOp::And, mut children }) => {
            children.extend(leaves);
            Some(RelationNode::and(children))
        }
        Some(other) => {
            let mut children = vec![other];
            children.extend(leaves);
            Some(RelationNode::and(children))
        }
    }
}

/// Sort the children of every AND group by filter list position
///
/// OR groups keep their order. A child is positioned by its earliest leaf.
pub fn order_by_filters(tree: &RelationNode, order: &[FilterGuid]) -> RelationNode {
    let positions: HashMap<&FilterGuid, usize> =
        order.iter().enumerate().map(|(i, g)| (g, i)).collect();
    sort_node(tree, &positions)
}

fn first_position(node: &RelationNode, positions: &HashMap<&FilterGuid, usize>) -> usize {
    node.leaves()
        .into_iter()
        .filter_map(|g| positions.get(g).copied())
        .min()
        .unwrap_or(usize::MAX)
}

fn sort_node(node: &RelationNode, positions: &HashMap<&FilterGuid, usize>) -> RelationNode {
    match node {
        RelationNode::Leaf(_) => node.clone(),
        RelationNode::Group { op, children } => {
            let mut sorted: Vec<RelationNode> =
                children.iter().map(|c| sort_node(c, positions)).collect();
            if *op == RelationOp::And {
                sorted.sort_by_key(|c| first_position(c, positions));
            }
            RelationNode::Group { op: *op, children: sorted }
        }
    }
}
