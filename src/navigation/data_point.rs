//! Filters derived from clicked or selected data points

use serde::{Deserialize, Serialize};
use crate::filter_model::{AttributeRef, Filter, IdSource};

/// One dimension value of a data point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPointEntry {
    pub attribute: AttributeRef,
    pub value: serde_json::Value,
}

/// A clicked bar, slice, cell or point
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default)]
    pub entries: Vec<DataPointEntry>,
}

impl DataPoint {
    pub fn with_entry(mut self, attribute: AttributeRef, value: impl Into<serde_json::Value>) -> Self {
        self.entries.push(DataPointEntry { attribute, value: value.into() });
        self
    }
}

fn member_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// One members filter per attribute across all points, attributes in first-seen order
///
/// Null values select nothing and are skipped; an attribute with only null
/// values gets no filter.
pub fn filters_from_points(points: &[DataPoint], ids: &mut dyn IdSource) -> Vec<Filter> {
    let mut grouped: Vec<(&AttributeRef, Vec<String>)> = Vec::new();

    for entry in points.iter().flat_map(|p| p.entries.iter()) {
        let Some(member) = member_text(&entry.value) else {
            continue;
        };
        match grouped.iter_mut().find(|(attr, _)| *attr == &entry.attribute) {
            Some((_, members)) => {
                if !members.contains(&member) {
                    members.push(member);
                }
            }
            None => grouped.push((&entry.attribute, vec![member])),
        }
    }

    grouped
        .into_iter()
        .map(|(attribute, members)| Filter::members(ids.next_id(), attribute.clone(), members))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_model::{FilterKind, SequentialIds};

    fn region() -> AttributeRef {
        AttributeRef::new("geo", "region")
    }

    fn members_of(filter: &Filter) -> Vec<String> {
        match &filter.kind {
            FilterKind::Plain(m) => m.members.clone(),
            _ => panic!("expected members filter"),
        }
    }

    #[test]
    fn test_single_point() {
        let point = DataPoint::default()
            .with_entry(region(), "EMEA")
            .with_entry(AttributeRef::new("products", "name"), "Laptop");
        let mut ids = SequentialIds::new("dp");

        let filters = filters_from_points(&[point], &mut ids);

        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].guid.as_str(), "dp-1");
        assert_eq!(members_of(&filters[0]), vec!["EMEA"]);
        assert_eq!(members_of(&filters[1]), vec!["Laptop"]);
    }

    #[test]
    fn test_multiple_points_union_members() {
        let points = vec![
            DataPoint::default().with_entry(region(), "EMEA"),
            DataPoint::default().with_entry(region(), "APAC"),
            DataPoint::default().with_entry(region(), "EMEA"),
        ];
        let filters = filters_from_points(&points, &mut SequentialIds::new("dp"));
        assert_eq!(filters.len(), 1);
        assert_eq!(members_of(&filters[0]), vec!["EMEA", "APAC"]);
    }

    #[test]
    fn test_null_and_numeric_values() {
        let point = DataPoint::default()
            .with_entry(region(), serde_json::Value::Null)
            .with_entry(AttributeRef::new("dates", "year"), 2024);
        let filters = filters_from_points(&[point], &mut SequentialIds::new("dp"));
        assert_eq!(filters.len(), 1);
        assert_eq!(members_of(&filters[0]), vec!["2024"]);
    }
}
