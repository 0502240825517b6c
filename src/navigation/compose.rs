use crate::cascade::split_all;
use crate::filter_model::Filter;
use crate::identity::{covers_attribute, dedupe_by_attribute};
use super::config::{ExtraFilters, JtdConfig, JtdTarget};

/// Build the seed filter set for a target dashboard
///
/// Sources are layered by priority: extra filters, data-point filters, the
/// target's own filters, the source widget's filters, then the source
/// dashboard's filters. A lower layer only contributes attributes no higher
/// layer covers. Widget and dashboard layers are skipped when the config
/// says not to carry them. Cascading filters are flattened and disabled
/// filters dropped first. With `force_override`, the extra filters are the
/// entire seed.
///
/// The target dashboard's existing filters are never touched; the result
/// is only the seed handed to the newly opened dashboard.
pub fn compose(
    config: &JtdConfig,
    target: &JtdTarget,
    source_widget_filters: &[Filter],
    dashboard_filters: &[Filter],
    data_point_filters: &[Filter],
    extra: &ExtraFilters,
) -> Vec<Filter> {
    let active = |filters: &[Filter]| -> Vec<Filter> {
        split_all(filters).into_iter().filter(|f| !f.disabled).collect()
    };

    if extra.force_override {
        return dedupe_by_attribute(&active(&extra.filters));
    }

    let mut layers: Vec<&[Filter]> = vec![
        extra.filters.as_slice(),
        data_point_filters,
        target.filters.as_slice(),
    ];
    if config.include_widget_filters {
        layers.push(source_widget_filters);
    }
    if config.include_dashboard_filters {
        layers.push(dashboard_filters);
    }

    let mut seed: Vec<Filter> = Vec::new();
    for layer in layers {
        for filter in active(layer) {
            if !covers_attribute(&seed, &filter) {
                seed.push(filter);
            }
        }
    }

    tracing::debug!(dashboard = %target.dashboard, filters = seed.len(), "composed jump filters");
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_model::AttributeRef;
    use crate::navigation::JtdTrigger;

    fn f(guid: &str, dim: &str, col: &str, value: &str) -> Filter {
        Filter::members(guid, AttributeRef::new(dim, col), vec![value.to_string()])
    }

    fn guids(filters: &[Filter]) -> Vec<&str> {
        filters.iter().map(|f| f.guid.as_str()).collect()
    }

    fn config() -> JtdConfig {
        JtdConfig::new(JtdTrigger::Click, vec![JtdTarget::new("target")])
    }

    #[test]
    fn test_extra_beats_data_point() {
        let extra = ExtraFilters { filters: vec![f("apac", "geo", "region", "APAC")], force_override: false };
        let points = vec![f("emea", "geo", "region", "EMEA"), f("laptop", "products", "name", "Laptop")];

        let seed = compose(&config(), &JtdTarget::new("target"), &[], &[], &points, &extra);

        assert_eq!(guids(&seed), vec!["apac", "laptop"]);
    }

    #[test]
    fn test_full_priority_order() {
        let mut target = JtdTarget::new("target");
        target.filters = vec![f("t-year", "dates", "year", "2023"), f("t-city", "geo", "city", "Oslo")];
        let widget = vec![f("w-year", "dates", "year", "2022"), f("w-prod", "products", "name", "Phone")];
        let dashboard = vec![f("d-prod", "products", "name", "Tablet"), f("d-ch", "sales", "channel", "Web")];
        let points = vec![f("p-city", "geo", "city", "Paris")];

        let seed = compose(&config(), &target, &widget, &dashboard, &points, &ExtraFilters::default());

        assert_eq!(guids(&seed), vec!["p-city", "t-year", "w-prod", "d-ch"]);
    }

    #[test]
    fn test_dashboard_and_widget_layers_optional() {
        let mut cfg = config();
        cfg.include_dashboard_filters = false;
        cfg.include_widget_filters = false;
        let widget = vec![f("w", "products", "name", "Phone")];
        let dashboard = vec![f("d", "sales", "channel", "Web")];

        let seed = compose(&cfg, &JtdTarget::new("target"), &widget, &dashboard, &[], &ExtraFilters::default());

        assert!(seed.is_empty());
    }

    #[test]
    fn test_force_override_uses_only_extra() {
        let extra = ExtraFilters { filters: vec![f("x", "geo", "region", "APAC")], force_override: true };
        let dashboard = vec![f("d", "sales", "channel", "Web")];

        let seed = compose(&config(), &JtdTarget::new("target"), &[], &dashboard, &[], &extra);

        assert_eq!(guids(&seed), vec!["x"]);
    }

    #[test]
    fn test_disabled_filters_do_not_block_lower_layers() {
        let extra = ExtraFilters {
            filters: vec![f("off", "geo", "region", "APAC").with_disabled(true)],
            force_override: false,
        };
        let dashboard = vec![f("d", "geo", "region", "EMEA")];

        let seed = compose(&config(), &JtdTarget::new("target"), &[], &dashboard, &[], &extra);

        assert_eq!(guids(&seed), vec!["d"]);
    }
}
