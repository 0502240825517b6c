//! Highlight eligibility per widget type

use crate::filter_model::{AttributeRef, Filter, FilterMode, PanelRole, Widget, WidgetType};

/// Panel roles whose attributes a widget type can highlight on
///
/// Types missing from this table (tables, indicators, funnels, text and
/// unrecognised types) cannot highlight at all.
pub fn highlight_roles(widget_type: &WidgetType) -> &'static [PanelRole] {
    match widget_type {
        WidgetType::Column
        | WidgetType::Bar
        | WidgetType::Line
        | WidgetType::Area
        | WidgetType::Pie
        | WidgetType::Polar
        | WidgetType::Treemap
        | WidgetType::Sunburst => &[PanelRole::Category],
        WidgetType::Scatter => &[PanelRole::XAxis, PanelRole::YAxis, PanelRole::Point],
        WidgetType::PivotTable => &[PanelRole::Rows, PanelRole::Columns],
        WidgetType::Table
        | WidgetType::Indicator
        | WidgetType::Funnel
        | WidgetType::Text
        | WidgetType::Other(_) => &[],
    }
}

/// Attributes on the widget's highlight-eligible panels
pub fn highlight_attributes(widget: &Widget) -> Vec<&AttributeRef> {
    highlight_roles(&widget.widget_type)
        .iter()
        .flat_map(|role| widget.panel_attributes(*role))
        .collect()
}

/// Would this (flattened, non-background) dashboard filter highlight the widget?
pub fn is_highlight_candidate(widget: &Widget, allowed: &[&AttributeRef], filter: &Filter) -> bool {
    if widget.filter_mode != FilterMode::Highlight || filter.background || filter.is_include_all() {
        return false;
    }
    match filter.attribute() {
        Some(attr) => allowed.contains(&attr),
        None => false,
    }
}
