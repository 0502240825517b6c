//! Dashboard definition: ordered filters, optional relation tree, widgets

use serde::{Deserialize, Serialize};
use std::path::Path;
use super::filter::{Filter, FilterGuid};
use super::relation::RelationNode;
use super::strategy::MergeStrategy;
use super::widget::Widget;
use crate::error::ParseError;
use crate::relations::{check_relations, RelationWarning};
use crate::resolver::{resolve_with_relations, WidgetFilterScope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Ordered dashboard filter list
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// AND/OR structure over `filters`; absent means AND of all
    #[serde(default)]
    pub relations: Option<RelationNode>,
    #[serde(default)]
    pub widgets: Vec<Widget>,
    /// Default strategy for caller-supplied overrides
    #[serde(rename = "mergeStrategy", default)]
    pub merge_strategy: MergeStrategy,
}

impl Dashboard {
    /// Load a dashboard definition from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        crate::parser::parse_file(path)
    }

    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn filter(&self, guid: &FilterGuid) -> Option<&Filter> {
        self.filters.iter().find(|f| &f.guid == guid)
    }

    /// Effective filters and highlights for one widget
    pub fn scope_for(&self, widget_id: &str) -> Option<WidgetFilterScope> {
        let widget = self.widget(widget_id)?;
        Some(resolve_with_relations(&self.filters, self.relations.as_ref(), widget))
    }

    /// Contract diagnostics for the filter list / relation tree pair
    pub fn check(&self) -> Vec<RelationWarning> {
        match &self.relations {
            Some(tree) => check_relations(&self.filters, tree),
            None => vec![],
        }
    }
}
