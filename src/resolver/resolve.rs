use crate::cascade::{split_all, split_in_relations};
use crate::filter_model::{Filter, FilterGuid, FilterMode, RelationNode, Widget, WidgetType};
use crate::identity::{covers_attribute, dedupe_by_attribute};
use crate::merge::overlay;
use crate::relations::{append_with_and, restrict_relations};
use super::eligibility::{highlight_attributes, is_highlight_candidate};
use super::types::WidgetFilterScope;

/// Resolve the filters and highlights that apply to a widget
///
/// This turns the dashboard's filter list plus the widget's metadata into
/// the widget's effective scope. Pure: identical inputs give identical output.
///
/// # Arguments
/// * `dashboard_filters` - The dashboard's ordered filter list
/// * `widget` - Widget type, panels, filter mode, exclusion rules and embedded filters
pub fn resolve(dashboard_filters: &[Filter], widget: &Widget) -> WidgetFilterScope {
    resolve_with_relations(dashboard_filters, None, widget)
}

/// [`resolve`], also restricting the dashboard relation tree to the widget
pub fn resolve_with_relations(
    dashboard_filters: &[Filter],
    relations: Option<&RelationNode>,
    widget: &Widget,
) -> WidgetFilterScope {
    // 1-2. Drop disabled filters and those the widget opts out of, then
    // flatten cascades. Rules are checked against a cascade's own guid and
    // again against each level.
    let is_applicable = |f: &Filter| !f.disabled && !widget.dashboard_filters.excludes(f);
    let kept: Vec<Filter> = dashboard_filters
        .iter()
        .filter(|f| is_applicable(f))
        .cloned()
        .collect();
    let applicable: Vec<Filter> = split_all(&kept)
        .into_iter()
        .filter(|f| is_applicable(f))
        .collect();

    // 3. Background filters always slice
    let (background, interactive): (Vec<Filter>, Vec<Filter>) =
        applicable.into_iter().partition(|f| f.background);

    // 4. Eligible interactive filters become highlights
    if widget.filter_mode == FilterMode::Highlight {
        if let WidgetType::Other(name) = &widget.widget_type {
            tracing::warn!(
                widget = %widget.id,
                widget_type = %name,
                "no highlight eligibility configured for widget type; all filters slice"
            );
        }
    }
    let allowed = highlight_attributes(widget);
    let (highlights, slicers): (Vec<Filter>, Vec<Filter>) = interactive
        .into_iter()
        .partition(|f| is_highlight_candidate(widget, &allowed, f));
    let highlights = dedupe_by_attribute(&highlights);

    // 5-6. Remaining dashboard filters, then background, with embedded filters winning their attributes
    let embedded: Vec<Filter> = split_all(&widget.filters)
        .into_iter()
        .filter(|f| !f.disabled)
        .collect();
    let embedded = dedupe_by_attribute(&embedded);

    let mut dashboard_side = slicers;
    dashboard_side.extend(background);
    let filters = overlay(&dashboard_side, &embedded);

    // Embedded filters own their attribute, and no guid may be both
    let highlights: Vec<Filter> = highlights
        .into_iter()
        .filter(|h| !covers_attribute(&embedded, h) && !filters.iter().any(|f| f.guid == h.guid))
        .collect();

    tracing::debug!(
        widget = %widget.id,
        filters = filters.len(),
        highlights = highlights.len(),
        "resolved widget filter scope"
    );

    let relations = relations.and_then(|tree| {
        widget_relations(tree, dashboard_filters, &filters, &embedded)
    });

    WidgetFilterScope { filters, highlights, relations }
}

/// Dashboard tree cut down to the widget's surviving dashboard filters, embedded filters ANDed on
fn widget_relations(
    tree: &RelationNode,
    dashboard_filters: &[Filter],
    filters: &[Filter],
    embedded: &[Filter],
) -> Option<RelationNode> {
    let embedded_guids: Vec<FilterGuid> = embedded.iter().map(|f| f.guid.clone()).collect();
    let from_dashboard: Vec<FilterGuid> = filters
        .iter()
        .map(|f| f.guid.clone())
        .filter(|g| !embedded_guids.contains(g))
        .collect();

    let restricted = split_in_relations(tree, dashboard_filters)
        .and_then(|split| restrict_relations(&split, &from_dashboard));

    // Dashboard filters the tree never mentioned are ANDed like embedded ones
    let missing: Vec<FilterGuid> = from_dashboard
        .iter()
        .filter(|g| !restricted.as_ref().is_some_and(|t| t.contains(g)))
        .cloned()
        .chain(embedded_guids)
        .collect();

    append_with_and(restricted, &missing)
}
