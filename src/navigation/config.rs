//! Jump-to-dashboard configuration types

use serde::{Deserialize, Serialize};
use crate::filter_model::Filter;

/// Interaction that starts a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JtdTrigger {
    #[default]
    Click,
    RightClick,
}

/// How the target dashboard is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpenMode {
    #[default]
    Modal,
    Navigate,
}

/// A dashboard that can be jumped to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JtdTarget {
    pub dashboard: String,
    #[serde(default)]
    pub caption: Option<String>,
    /// Filters always applied when opening this target
    #[serde(default)]
    pub filters: Vec<Filter>,
}

impl JtdTarget {
    pub fn new(dashboard: impl Into<String>) -> Self {
        Self { dashboard: dashboard.into(), caption: None, filters: vec![] }
    }
}

fn default_true() -> bool {
    true
}

/// Jump-to-dashboard settings attached to a widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JtdConfig {
    #[serde(default)]
    pub trigger: JtdTrigger,
    #[serde(default)]
    pub targets: Vec<JtdTarget>,
    /// Carry the source dashboard's filters across
    #[serde(rename = "includeDashboardFilters", default = "default_true")]
    pub include_dashboard_filters: bool,
    /// Carry the source widget's own filters across
    #[serde(rename = "includeWidgetFilters", default = "default_true")]
    pub include_widget_filters: bool,
    #[serde(rename = "openIn", default)]
    pub open_in: OpenMode,
}

impl JtdConfig {
    pub fn new(trigger: JtdTrigger, targets: Vec<JtdTarget>) -> Self {
        Self {
            trigger,
            targets,
            include_dashboard_filters: true,
            include_widget_filters: true,
            open_in: OpenMode::default(),
        }
    }
}

/// Caller-supplied filters for a navigation, ranked above everything else
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtraFilters {
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Use these filters as the whole seed, ignoring every other source
    #[serde(rename = "forceOverride", default)]
    pub force_override: bool,
}
