//! Dashboard parser (verb module)
//!
//! Transforms YAML files into model types.

use std::path::Path;
use crate::error::ParseError;
use crate::filter_model::Dashboard;

/// Parse a dashboard from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Dashboard, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse a dashboard from a YAML file, rejecting relation contract violations
pub fn parse_file_strict<P: AsRef<Path>>(path: P) -> Result<Dashboard, ParseError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ParseError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str_strict(&contents)
}

/// Parse a dashboard from a YAML string, rejecting relation contract violations
///
/// The lenient loaders accept these and recover when the tree is used.
pub fn parse_str_strict(yaml: &str) -> Result<Dashboard, ParseError> {
    let dashboard: Dashboard = serde_yaml::from_str(yaml)?;
    let warnings = dashboard.check();
    if !warnings.is_empty() {
        return Err(ParseError::Relations { dashboard: dashboard.id, warnings });
    }
    Ok(dashboard)
}

/// Parse a dashboard from a YAML string
///
/// Contract problems between the filter list and the relation tree are not
/// parse errors; they are logged here and recovered when the tree is used.
pub fn parse_str(yaml: &str) -> Result<Dashboard, ParseError> {
    let dashboard: Dashboard = serde_yaml::from_str(yaml)?;
    for warning in dashboard.check() {
        tracing::warn!(dashboard = %dashboard.id, %warning, "relation tree does not match filter list");
    }
    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_model::{
        AttributeRef, Condition, DateLevel, FilterKind, FilterMode, MergeStrategy, RelationOp, WidgetType,
    };
    use crate::relations::RelationWarning;

    const DASHBOARD: &str = r#"
id: sales
title: Sales overview
mergeStrategy: widget_first
filters:
  - guid: country
    type: plain
    attribute: markets.country
    members: [France, Germany]
  - guid: revenue
    type: conditional
    attribute: sales.amount
    condition:
      op: greaterThan
      value: 1000
  - guid: calendar
    type: cascading
    levels:
      - guid: year
        type: plain
        attribute: dates.date:years
        members: ["2024"]
      - guid: quarter
        type: plain
        attribute: dates.date:quarters
        members: []
relations:
  op: or
  children:
    - country
    - op: and
      children: [revenue, calendar]
widgets:
  - id: by-country
    type: chart/column
    filterMode: highlight
    panels:
      - role: category
        attributes: [markets.country]
"#;

    #[test]
    fn test_parse_dashboard() {
        let dashboard = parse_str(DASHBOARD).unwrap();

        assert_eq!(dashboard.id, "sales");
        assert_eq!(dashboard.title.as_deref(), Some("Sales overview"));
        assert_eq!(dashboard.merge_strategy, MergeStrategy::WidgetFirst);
        assert_eq!(dashboard.filters.len(), 3);

        let country = &dashboard.filters[0];
        assert_eq!(country.attribute(), Some(&AttributeRef::new("markets", "country")));

        let revenue = &dashboard.filters[1];
        assert!(matches!(
            &revenue.kind,
            FilterKind::Conditional(c) if matches!(c.condition, Condition::GreaterThan { .. })
        ));

        let calendar = &dashboard.filters[2];
        let attrs = calendar.attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].level, Some(DateLevel::Quarters));

        let tree = dashboard.relations.as_ref().unwrap();
        assert_eq!(tree.op(), Some(RelationOp::Or));
        assert_eq!(tree.to_string(), "(country OR (revenue AND calendar))");
        assert!(dashboard.check().is_empty());

        let widget = dashboard.widget("by-country").unwrap();
        assert_eq!(widget.widget_type, WidgetType::Column);
        assert_eq!(widget.filter_mode, FilterMode::Highlight);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = parse_str("not: [valid: yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("tests/test_data/does_not_exist.yaml").unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert!(err.to_string().contains("does_not_exist.yaml"));
    }

    const BROKEN_RELATIONS: &str = r#"
id: broken
filters:
  - guid: a
    type: plain
    attribute: markets.country
    members: [France]
  - guid: b
    type: plain
    attribute: markets.city
    members: [Paris]
relations:
  op: or
  children: [a, ghost]
"#;

    #[test]
    fn test_lenient_parse_accepts_broken_relations() {
        let dashboard = parse_str(BROKEN_RELATIONS).unwrap();
        assert_eq!(dashboard.check().len(), 2);
    }

    #[test]
    fn test_strict_parse_rejects_broken_relations() {
        let err = parse_str_strict(BROKEN_RELATIONS).unwrap_err();
        let ParseError::Relations { dashboard, warnings } = &err else {
            panic!("expected relation error, got {}", err);
        };
        assert_eq!(dashboard, "broken");
        assert!(warnings.contains(&RelationWarning::UnknownLeaf("ghost".into())));
        assert!(warnings.contains(&RelationWarning::MissingLeaf("b".into())));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_strict_parse_accepts_consistent_dashboard() {
        assert!(parse_str_strict(DASHBOARD).is_ok());
    }

    #[test]
    fn test_bad_attribute_reference_is_yaml_error() {
        let yaml = "id: d\nfilters:\n  - guid: a\n    type: plain\n    attribute: nodot\n";
        assert!(matches!(parse_str(yaml), Err(ParseError::Yaml { .. })));
    }
}
