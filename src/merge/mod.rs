//! External merge strategy engine (verb module)
//!
//! Merges a widget's own filters with caller-supplied overrides. Conflicts
//! are detected by attribute, never by guid.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::filter_model::{Filter, FilterGuid, MergeStrategy};
use crate::identity::{covers_attribute, dedupe_by_attribute};
use crate::relations::reconcile;
use crate::resolver::WidgetFilterScope;

/// Override filters supplied by the embedding code
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExternalFilters {
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub highlights: Vec<Filter>,
}

/// Merge intrinsic filters with overrides under a strategy
///
/// Override duplicates on one attribute are collapsed first, the last one
/// winning.
pub fn merge_by_strategy(
    intrinsic: &[Filter],
    overrides: &[Filter],
    strategy: MergeStrategy,
) -> Vec<Filter> {
    let overrides = dedupe_by_attribute(overrides);

    match strategy {
        MergeStrategy::CodeOnly => overrides,
        MergeStrategy::CodeFirst => {
            let mut merged = overrides;
            let kept: Vec<Filter> = intrinsic
                .iter()
                .filter(|f| !covers_attribute(&merged, f))
                .cloned()
                .collect();
            merged.extend(kept);
            merged
        }
        MergeStrategy::WidgetFirst => {
            let mut merged = intrinsic.to_vec();
            merged.extend(overrides.into_iter().filter(|f| !covers_attribute(intrinsic, f)));
            merged
        }
    }
}

/// `base` without the attributes `top` constrains, followed by `top`
pub fn overlay(base: &[Filter], top: &[Filter]) -> Vec<Filter> {
    base.iter()
        .filter(|f| !covers_attribute(top, f))
        .chain(top.iter())
        .cloned()
        .collect()
}

/// Apply external filters and highlights to a resolved scope
///
/// Filters and highlights go through separate, independent merges. The
/// relation tree is reconciled against the merged filter list, and any
/// highlight whose guid ended up among the filters is dropped.
pub fn merge_scope(
    scope: &WidgetFilterScope,
    external: &ExternalFilters,
    strategy: MergeStrategy,
) -> WidgetFilterScope {
    let filters = merge_by_strategy(&scope.filters, &external.filters, strategy);
    let highlights = merge_by_strategy(&scope.highlights, &external.highlights, strategy);

    let filter_guids: HashSet<&FilterGuid> = filters.iter().map(|f| &f.guid).collect();
    let highlights: Vec<Filter> = highlights
        .into_iter()
        .filter(|h| !filter_guids.contains(&h.guid))
        .collect();

    let relations = reconcile(&scope.filters, scope.relations.as_ref(), &filters);

    tracing::debug!(
        %strategy,
        filters = filters.len(),
        highlights = highlights.len(),
        "merged external filters"
    );

    WidgetFilterScope { filters, highlights, relations }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_model::{AttributeRef, RelationNode};

    fn country(guid: &str, value: &str) -> Filter {
        Filter::members(guid, AttributeRef::new("markets", "country"), vec![value.to_string()])
    }

    fn city(guid: &str, value: &str) -> Filter {
        Filter::members(guid, AttributeRef::new("markets", "city"), vec![value.to_string()])
    }

    fn guids(filters: &[Filter]) -> Vec<&str> {
        filters.iter().map(|f| f.guid.as_str()).collect()
    }

    #[test]
    fn test_code_only() {
        let intrinsic = vec![country("fr", "France")];
        let overrides = vec![country("de", "Germany"), city("paris", "Paris")];
        let merged = merge_by_strategy(&intrinsic, &overrides, MergeStrategy::CodeOnly);
        assert_eq!(guids(&merged), vec!["de", "paris"]);
    }

    #[test]
    fn test_code_first() {
        let intrinsic = vec![country("fr", "France")];
        let overrides = vec![country("de", "Germany"), city("paris", "Paris")];
        let merged = merge_by_strategy(&intrinsic, &overrides, MergeStrategy::CodeFirst);
        assert_eq!(guids(&merged), vec!["de", "paris"]);
    }

    #[test]
    fn test_widget_first() {
        let intrinsic = vec![country("fr", "France")];
        let overrides = vec![country("de", "Germany"), city("paris", "Paris")];
        let merged = merge_by_strategy(&intrinsic, &overrides, MergeStrategy::WidgetFirst);
        assert_eq!(guids(&merged), vec!["fr", "paris"]);
    }

    #[test]
    fn test_code_first_keeps_unrelated_intrinsic_after_overrides() {
        let intrinsic = vec![city("lyon", "Lyon"), country("fr", "France")];
        let overrides = vec![country("de", "Germany")];
        let merged = merge_by_strategy(&intrinsic, &overrides, MergeStrategy::CodeFirst);
        assert_eq!(guids(&merged), vec!["de", "lyon"]);
    }

    #[test]
    fn test_code_only_duplicate_overrides_last_wins() {
        let overrides = vec![country("a", "France"), country("b", "Spain")];
        let merged = merge_by_strategy(&[], &overrides, MergeStrategy::CodeOnly);
        assert_eq!(guids(&merged), vec!["b"]);
    }

    #[test]
    fn test_overlay() {
        let base = vec![country("fr", "France"), city("lyon", "Lyon")];
        let top = vec![country("de", "Germany")];
        assert_eq!(guids(&overlay(&base, &top)), vec!["lyon", "de"]);
    }

    #[test]
    fn test_merge_scope_independent_arrays() {
        let scope = WidgetFilterScope::new(vec![city("lyon", "Lyon")], vec![country("fr", "France")]);
        let external = ExternalFilters {
            filters: vec![country("de", "Germany")],
            highlights: vec![],
        };
        let merged = merge_scope(&scope, &external, MergeStrategy::CodeFirst);
        assert_eq!(guids(&merged.filters), vec!["de", "lyon"]);
        assert_eq!(guids(&merged.highlights), vec!["fr"]);
    }

    #[test]
    fn test_merge_scope_keeps_disjointness() {
        let shared = country("same", "France");
        let scope = WidgetFilterScope::new(vec![], vec![]);
        let external = ExternalFilters {
            filters: vec![shared.clone()],
            highlights: vec![shared],
        };
        let merged = merge_scope(&scope, &external, MergeStrategy::CodeFirst);
        assert_eq!(guids(&merged.filters), vec!["same"]);
        assert!(merged.highlights.is_empty());
        assert!(merged.is_disjoint());
    }

    #[test]
    fn test_merge_scope_reconciles_relations() {
        let mut scope = WidgetFilterScope::new(vec![country("fr", "France"), city("lyon", "Lyon")], vec![]);
        scope.relations = Some(RelationNode::or(vec![RelationNode::leaf("fr"), RelationNode::leaf("lyon")]));
        let external = ExternalFilters {
            filters: vec![country("de", "Germany")],
            highlights: vec![],
        };

        let merged = merge_scope(&scope, &external, MergeStrategy::CodeFirst);

        // "de" replaced "fr" at the same position, so it inherits the OR
        assert_eq!(guids(&merged.filters), vec!["de", "lyon"]);
        assert_eq!(merged.relations.unwrap().to_string(), "(de OR lyon)");
    }
}
