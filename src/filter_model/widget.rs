//! Widget metadata consumed by the resolver

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use super::attribute::AttributeRef;
use super::filter::Filter;
use crate::navigation::JtdConfig;

/// Widget type tag
///
/// Unrecognised tags are kept as `Other` rather than rejected; they simply
/// have no highlight-eligible panels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WidgetType {
    Column,
    Bar,
    Line,
    Area,
    Pie,
    Polar,
    Funnel,
    Treemap,
    Sunburst,
    Scatter,
    Indicator,
    Table,
    PivotTable,
    Text,
    Other(String),
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetType::Column => write!(f, "column"),
            WidgetType::Bar => write!(f, "bar"),
            WidgetType::Line => write!(f, "line"),
            WidgetType::Area => write!(f, "area"),
            WidgetType::Pie => write!(f, "pie"),
            WidgetType::Polar => write!(f, "polar"),
            WidgetType::Funnel => write!(f, "funnel"),
            WidgetType::Treemap => write!(f, "treemap"),
            WidgetType::Sunburst => write!(f, "sunburst"),
            WidgetType::Scatter => write!(f, "scatter"),
            WidgetType::Indicator => write!(f, "indicator"),
            WidgetType::Table => write!(f, "table"),
            WidgetType::PivotTable => write!(f, "pivot"),
            WidgetType::Text => write!(f, "text"),
            WidgetType::Other(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for WidgetType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        // Accept the "chart/column" style prefix as well as bare names
        let name = lower.strip_prefix("chart/").unwrap_or(&lower);
        Ok(match name {
            "column" => WidgetType::Column,
            "bar" => WidgetType::Bar,
            "line" => WidgetType::Line,
            "area" => WidgetType::Area,
            "pie" => WidgetType::Pie,
            "polar" => WidgetType::Polar,
            "funnel" => WidgetType::Funnel,
            "treemap" => WidgetType::Treemap,
            "sunburst" => WidgetType::Sunburst,
            "scatter" => WidgetType::Scatter,
            "indicator" => WidgetType::Indicator,
            "table" | "tablewidget" => WidgetType::Table,
            "pivot" | "pivot2" | "pivottable" => WidgetType::PivotTable,
            "text" | "richtexteditor" => WidgetType::Text,
            _ => WidgetType::Other(s.trim().to_string()),
        })
    }
}

impl<'de> Deserialize<'de> for WidgetType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        WidgetType::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl Serialize for WidgetType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Role of a data panel within a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanelRole {
    Category,
    Value,
    BreakBy,
    XAxis,
    YAxis,
    Point,
    Size,
    Rows,
    Columns,
    Values,
}

/// A widget data panel and the attributes placed on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub role: PanelRole,
    #[serde(default)]
    pub attributes: Vec<AttributeRef>,
}

/// How a widget applies dashboard filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Dashboard filters slice the widget's data
    #[default]
    Slice,
    /// Eligible dashboard filters highlight instead of slicing
    Highlight,
}

/// Which dashboard filters a widget opts out of
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterExclusionRules {
    #[serde(rename = "ignoreAll", default)]
    pub ignore_all: bool,
    /// Guids or instance ids of dashboard filters to ignore
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl FilterExclusionRules {
    pub fn ignore_all() -> Self {
        Self { ignore_all: true, ignore: vec![] }
    }

    pub fn ignoring<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ignore_all: false,
            ignore: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Does the widget opt out of this dashboard filter?
    pub fn excludes(&self, filter: &Filter) -> bool {
        self.ignore_all || self.ignore.iter().any(|id| filter.matches_id(id))
    }
}

/// A dashboard widget as seen by the filter engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub id: String,
    #[serde(rename = "type")]
    pub widget_type: WidgetType,
    #[serde(default)]
    pub panels: Vec<Panel>,
    /// Filters embedded in the widget itself
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(rename = "filterMode", default)]
    pub filter_mode: FilterMode,
    #[serde(rename = "dashboardFilters", default)]
    pub dashboard_filters: FilterExclusionRules,
    #[serde(rename = "jumpTargets", default)]
    pub jump_targets: Vec<JtdConfig>,
}

impl Widget {
    pub fn new(id: impl Into<String>, widget_type: WidgetType) -> Self {
        Widget {
            id: id.into(),
            widget_type,
            panels: vec![],
            filters: vec![],
            filter_mode: FilterMode::default(),
            dashboard_filters: FilterExclusionRules::default(),
            jump_targets: vec![],
        }
    }

    pub fn with_panel(mut self, role: PanelRole, attributes: Vec<AttributeRef>) -> Self {
        self.panels.push(Panel { role, attributes });
        self
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_filter_mode(mut self, mode: FilterMode) -> Self {
        self.filter_mode = mode;
        self
    }

    pub fn with_exclusions(mut self, rules: FilterExclusionRules) -> Self {
        self.dashboard_filters = rules;
        self
    }

    /// Attributes placed on panels with the given role
    pub fn panel_attributes(&self, role: PanelRole) -> impl Iterator<Item = &AttributeRef> {
        self.panels
            .iter()
            .filter(move |p| p.role == role)
            .flat_map(|p| p.attributes.iter())
    }
}
