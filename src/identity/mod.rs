//! Filter identity and shape predicates
//!
//! Identity is guid equality. Equivalence ("same slot") is attribute
//! equality, used when filters from different sources must be reconciled.

use crate::filter_model::{Filter, FilterGuid, FilterKind, FilterShape};

/// Same filter, possibly a different version of it
pub fn same_identity(a: &Filter, b: &Filter) -> bool {
    a.guid == b.guid
}

/// Both filters constrain the same attribute(s)
///
/// Cascading filters compare their full level attribute lists.
pub fn same_attribute(a: &Filter, b: &Filter) -> bool {
    a.attributes() == b.attributes()
}

pub fn classify(filter: &Filter) -> FilterShape {
    filter.shape()
}

pub fn is_cascading(filter: &Filter) -> bool {
    matches!(filter.kind, FilterKind::Cascading(_))
}

pub fn is_conditional(filter: &Filter) -> bool {
    matches!(filter.kind, FilterKind::Conditional(_))
}

/// A plain filter with an explicit member selection
pub fn is_members_filter(filter: &Filter) -> bool {
    match &filter.kind {
        FilterKind::Plain(m) => !m.members.is_empty(),
        _ => false,
    }
}

pub fn is_background(filter: &Filter) -> bool {
    filter.background
}

pub fn is_include_all(filter: &Filter) -> bool {
    filter.is_include_all()
}

pub fn is_active(filter: &Filter) -> bool {
    !filter.disabled
}

/// Does any filter in the list target the same attribute(s)?
pub fn covers_attribute(filters: &[Filter], candidate: &Filter) -> bool {
    filters.iter().any(|f| same_attribute(f, candidate))
}

/// Remove attribute duplicates, the last occurrence winning
pub fn dedupe_by_attribute(filters: &[Filter]) -> Vec<Filter> {
    filters
        .iter()
        .enumerate()
        .filter(|(i, f)| !filters[i + 1..].iter().any(|later| same_attribute(f, later)))
        .map(|(_, f)| f.clone())
        .collect()
}

pub fn guids(filters: &[Filter]) -> Vec<FilterGuid> {
    filters.iter().map(|f| f.guid.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_model::{AttributeRef, CascadingFilter, Condition};

    fn members(guid: &str, dim: &str, col: &str, values: &[&str]) -> Filter {
        Filter::members(
            guid,
            AttributeRef::new(dim, col),
            values.iter().map(|v| v.to_string()).collect(),
        )
    }

    #[test]
    fn test_identity_vs_attribute() {
        let a = members("a", "markets", "country", &["France"]);
        let b = members("b", "markets", "country", &["Germany"]);
        let a2 = members("a", "markets", "city", &["Paris"]);

        assert!(!same_identity(&a, &b));
        assert!(same_attribute(&a, &b));
        assert!(same_identity(&a, &a2));
        assert!(!same_attribute(&a, &a2));
    }

    #[test]
    fn test_classify_shapes() {
        let plain = members("p", "markets", "country", &["France"]);
        let cond = Filter::conditional(
            "c",
            AttributeRef::new("sales", "amount"),
            Condition::GreaterThan { value: serde_json::json!(100) },
        );
        let cascade = Filter::cascading("k", CascadingFilter { levels: vec![plain.clone()] });

        assert_eq!(classify(&plain), FilterShape::Plain);
        assert!(is_members_filter(&plain));
        assert!(is_conditional(&cond));
        assert!(!is_members_filter(&cond));
        assert!(is_cascading(&cascade));
    }

    #[test]
    fn test_dedupe_last_wins() {
        let filters = vec![
            members("a1", "markets", "country", &["France"]),
            members("b", "markets", "city", &["Paris"]),
            members("a2", "markets", "country", &["Spain"]),
        ];
        let deduped = dedupe_by_attribute(&filters);
        let ids: Vec<&str> = deduped.iter().map(|f| f.guid.as_str()).collect();
        assert_eq!(ids, vec!["b", "a2"]);
    }
}
