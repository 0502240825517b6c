//! Jump-to-dashboard interaction state machine
//!
//! Idle -> TriggerDetected -> MenuOrDirectNavigate -> FiltersComposed -> DashboardOpened
//!
//! Cancelling at any point returns to Idle. Nothing is applied before the
//! dashboard opens, so a cancelled interaction leaves no trace.

use std::mem;
use crate::filter_model::{Filter, IdSource};
use super::compose::compose;
use super::config::{ExtraFilters, JtdConfig, JtdTarget, JtdTrigger, OpenMode};
use super::data_point::{filters_from_points, DataPoint};
use super::error::NavigationError;

/// Filters available at the source of the navigation
#[derive(Debug, Clone, Copy)]
pub struct NavigationContext<'a> {
    pub source_widget_filters: &'a [Filter],
    pub dashboard_filters: &'a [Filter],
    pub extra: &'a ExtraFilters,
}

/// The dashboard handed to the UI at the end of a navigation
#[derive(Debug, Clone, PartialEq)]
pub struct OpenedDashboard {
    /// Id of this opened instance (modal or page), minted by the caller's id source
    pub instance_id: String,
    pub target: JtdTarget,
    pub filters: Vec<Filter>,
    pub open_in: OpenMode,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum JtdInteraction {
    #[default]
    Idle,
    TriggerDetected {
        config: JtdConfig,
        points: Vec<DataPoint>,
    },
    /// A menu is shown (`selected` is None) or the single target is preselected
    MenuOrDirectNavigate {
        config: JtdConfig,
        points: Vec<DataPoint>,
        selected: Option<usize>,
    },
    FiltersComposed {
        config: JtdConfig,
        target: JtdTarget,
        filters: Vec<Filter>,
    },
    DashboardOpened(OpenedDashboard),
}

impl JtdInteraction {
    pub fn new() -> Self {
        JtdInteraction::Idle
    }

    pub fn state_name(&self) -> &'static str {
        match self {
            JtdInteraction::Idle => "idle",
            JtdInteraction::TriggerDetected { .. } => "trigger detected",
            JtdInteraction::MenuOrDirectNavigate { .. } => "choosing a target",
            JtdInteraction::FiltersComposed { .. } => "filters composed",
            JtdInteraction::DashboardOpened(_) => "dashboard opened",
        }
    }

    fn invalid(&self, action: &'static str) -> NavigationError {
        NavigationError::InvalidTransition { state: self.state_name(), action }
    }

    /// Feed a click or right-click on some data points
    ///
    /// The first config with a matching trigger and at least one target is
    /// used. With no match the interaction stays idle and `Ok(false)` is
    /// returned.
    pub fn trigger(
        &mut self,
        trigger: JtdTrigger,
        points: Vec<DataPoint>,
        configs: &[JtdConfig],
    ) -> Result<bool, NavigationError> {
        if !matches!(self, JtdInteraction::Idle) {
            return Err(self.invalid("trigger a navigation"));
        }
        let Some(config) = configs
            .iter()
            .find(|c| c.trigger == trigger && !c.targets.is_empty())
        else {
            return Ok(false);
        };

        *self = JtdInteraction::TriggerDetected { config: config.clone(), points };
        Ok(true)
    }

    /// Decide between a menu and direct navigation
    ///
    /// A left click on a config with a single target navigates directly;
    /// everything else shows a menu.
    pub fn present(&mut self) -> Result<(), NavigationError> {
        match mem::take(self) {
            JtdInteraction::TriggerDetected { config, points } => {
                let direct = config.trigger == JtdTrigger::Click && config.targets.len() == 1;
                *self = JtdInteraction::MenuOrDirectNavigate {
                    config,
                    points,
                    selected: direct.then_some(0),
                };
                Ok(())
            }
            other => {
                *self = other;
                Err(self.invalid("present targets"))
            }
        }
    }

    /// Pick a menu entry
    pub fn select(&mut self, index: usize) -> Result<(), NavigationError> {
        match self {
            JtdInteraction::MenuOrDirectNavigate { config, selected, .. } => {
                if index >= config.targets.len() {
                    return Err(NavigationError::UnknownTarget {
                        index,
                        available: config.targets.len(),
                    });
                }
                *selected = Some(index);
                Ok(())
            }
            _ => Err(self.invalid("select a target")),
        }
    }

    /// Derive data-point filters and compose the seed for the selected target
    pub fn compose_filters(
        &mut self,
        context: NavigationContext<'_>,
        ids: &mut dyn IdSource,
    ) -> Result<(), NavigationError> {
        let (config, points, index) = match self {
            JtdInteraction::MenuOrDirectNavigate { config, points, selected } => {
                let index = selected.ok_or(NavigationError::NoTargetSelected)?;
                (config, points, index)
            }
            _ => return Err(self.invalid("compose filters")),
        };
        let target = config
            .targets
            .get(index)
            .cloned()
            .ok_or(NavigationError::UnknownTarget { index, available: config.targets.len() })?;

        let point_filters = filters_from_points(points, ids);
        let filters = compose(
            config,
            &target,
            context.source_widget_filters,
            context.dashboard_filters,
            &point_filters,
            context.extra,
        );

        let config = config.clone();
        *self = JtdInteraction::FiltersComposed { config, target, filters };
        Ok(())
    }

    /// Open the target dashboard with the composed filters
    pub fn open(&mut self, ids: &mut dyn IdSource) -> Result<OpenedDashboard, NavigationError> {
        match mem::take(self) {
            JtdInteraction::FiltersComposed { config, target, filters } => {
                let opened = OpenedDashboard {
                    instance_id: ids.next_id().to_string(),
                    target,
                    filters,
                    open_in: config.open_in,
                };
                tracing::debug!(
                    dashboard = %opened.target.dashboard,
                    instance = %opened.instance_id,
                    "opening jump target"
                );
                *self = JtdInteraction::DashboardOpened(opened.clone());
                Ok(opened)
            }
            other => {
                *self = other;
                Err(self.invalid("open the dashboard"))
            }
        }
    }

    /// Dismiss the menu, close the modal, or abandon the interaction
    pub fn cancel(&mut self) {
        if !matches!(self, JtdInteraction::Idle) {
            tracing::debug!(state = self.state_name(), "navigation cancelled");
        }
        *self = JtdInteraction::Idle;
    }
}
