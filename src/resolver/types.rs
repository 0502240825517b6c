//! Types for resolved widget filter scopes

use std::collections::HashSet;
use crate::filter_model::{Filter, FilterGuid, RelationNode};
use crate::relations::query_relations;

/// The filters that apply to one widget's query
///
/// `filters` slice the data, `highlights` only emphasise matching data.
/// No guid ever appears in both lists.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetFilterScope {
    pub filters: Vec<Filter>,
    pub highlights: Vec<Filter>,
    /// Dashboard relation tree restricted to `filters`; None means AND of all
    pub relations: Option<RelationNode>,
}

impl WidgetFilterScope {
    pub fn new(filters: Vec<Filter>, highlights: Vec<Filter>) -> Self {
        Self { filters, highlights, relations: None }
    }

    pub fn filter_guids(&self) -> Vec<&FilterGuid> {
        self.filters.iter().map(|f| &f.guid).collect()
    }

    pub fn highlight_guids(&self) -> Vec<&FilterGuid> {
        self.highlights.iter().map(|f| &f.guid).collect()
    }

    /// Check the filters/highlights disjointness invariant
    pub fn is_disjoint(&self) -> bool {
        let filters: HashSet<&FilterGuid> = self.filter_guids().into_iter().collect();
        self.highlights.iter().all(|h| !filters.contains(&h.guid))
    }

    /// Relation tree to hand to the query layer (disabled filters removed)
    pub fn query_relations(&self) -> Option<RelationNode> {
        self.relations
            .as_ref()
            .and_then(|tree| query_relations(&self.filters, tree))
    }
}
