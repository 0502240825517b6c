//! Filter types
//!
//! A filter is an immutable value. Edits produce a new value that keeps
//! the same guid, so guid equality is identity and attribute equality is
//! "same slot".

use serde::{Deserialize, Serialize};
use std::fmt;
use super::attribute::AttributeRef;

/// Stable filter identity, unique within a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterGuid(pub String);

impl FilterGuid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FilterGuid {
    fn from(s: &str) -> Self {
        FilterGuid(s.to_string())
    }
}

impl From<String> for FilterGuid {
    fn from(s: String) -> Self {
        FilterGuid(s)
    }
}

/// Shape tag of a filter, see [`Filter::shape`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterShape {
    Plain,
    Cascading,
    Conditional,
}

/// A single constraint on one attribute (or one per level, for cascading filters)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub guid: FilterGuid,
    /// Excluded from query composition but kept in the UI and relation trees
    #[serde(default)]
    pub disabled: bool,
    /// UI-only: blocks deletion and edits, no effect on resolution
    #[serde(default)]
    pub locked: bool,
    /// Silent default; never shown as a tile, never a highlight
    #[serde(default)]
    pub background: bool,
    /// Id that exclusion rules may target instead of the guid
    #[serde(rename = "instanceId", default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(flatten)]
    pub kind: FilterKind,
}

/// Closed set of filter payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterKind {
    Plain(MembersFilter),
    Conditional(ConditionalFilter),
    Cascading(CascadingFilter),
}

/// Member selection on one attribute
///
/// An empty member list places no constraint ("include all"), whether or
/// not `exclude` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembersFilter {
    pub attribute: AttributeRef,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub exclude: bool,
}

/// Condition-based filter (ranges, comparisons, rankings)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalFilter {
    pub attribute: AttributeRef,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Condition {
    Equals { value: serde_json::Value },
    NotEquals { value: serde_json::Value },
    GreaterThan { value: serde_json::Value },
    LessThan { value: serde_json::Value },
    Between {
        #[serde(default)]
        from: Option<serde_json::Value>,
        #[serde(default)]
        to: Option<serde_json::Value>,
    },
    Contains { text: String },
    Top { count: u32 },
    Bottom { count: u32 },
}

impl Condition {
    /// A range with neither bound does not constrain anything
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Condition::Between { from: None, to: None })
    }
}

/// Ordered dependent levels, e.g. Year -> Quarter -> Month
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CascadingFilter {
    #[serde(default)]
    pub levels: Vec<Filter>,
}

impl Filter {
    fn with_kind(guid: impl Into<FilterGuid>, kind: FilterKind) -> Self {
        Filter {
            guid: guid.into(),
            disabled: false,
            locked: false,
            background: false,
            instance_id: None,
            kind,
        }
    }

    /// Include the given members
    pub fn members(guid: impl Into<FilterGuid>, attribute: AttributeRef, members: Vec<String>) -> Self {
        Self::with_kind(guid, FilterKind::Plain(MembersFilter { attribute, members, exclude: false }))
    }

    /// Exclude the given members
    pub fn excluding(guid: impl Into<FilterGuid>, attribute: AttributeRef, members: Vec<String>) -> Self {
        Self::with_kind(guid, FilterKind::Plain(MembersFilter { attribute, members, exclude: true }))
    }

    pub fn conditional(guid: impl Into<FilterGuid>, attribute: AttributeRef, condition: Condition) -> Self {
        Self::with_kind(guid, FilterKind::Conditional(ConditionalFilter { attribute, condition }))
    }

    pub fn cascading(guid: impl Into<FilterGuid>, cascade: CascadingFilter) -> Self {
        Self::with_kind(guid, FilterKind::Cascading(cascade))
    }

    /// Copy with a different disabled flag; the guid is kept
    pub fn with_disabled(&self, disabled: bool) -> Self {
        Filter { disabled, ..self.clone() }
    }

    pub fn as_background(mut self) -> Self {
        self.background = true;
        self
    }

    pub fn with_instance_id(mut self, id: impl Into<String>) -> Self {
        self.instance_id = Some(id.into());
        self
    }

    pub fn shape(&self) -> FilterShape {
        match &self.kind {
            FilterKind::Plain(_) => FilterShape::Plain,
            FilterKind::Conditional(_) => FilterShape::Conditional,
            FilterKind::Cascading(_) => FilterShape::Cascading,
        }
    }

    /// The single attribute of a plain or conditional filter
    pub fn attribute(&self) -> Option<&AttributeRef> {
        match &self.kind {
            FilterKind::Plain(m) => Some(&m.attribute),
            FilterKind::Conditional(c) => Some(&c.attribute),
            FilterKind::Cascading(_) => None,
        }
    }

    /// Every attribute this filter targets, in level order for cascading filters
    pub fn attributes(&self) -> Vec<&AttributeRef> {
        match &self.kind {
            FilterKind::Plain(m) => vec![&m.attribute],
            FilterKind::Conditional(c) => vec![&c.attribute],
            FilterKind::Cascading(cascade) => {
                cascade.levels.iter().flat_map(|level| level.attributes()).collect()
            }
        }
    }

    /// Does the filter place no constraint at all?
    pub fn is_include_all(&self) -> bool {
        match &self.kind {
            FilterKind::Plain(m) => m.members.is_empty(),
            FilterKind::Conditional(c) => c.condition.is_unbounded(),
            FilterKind::Cascading(cascade) => cascade.levels.iter().all(Filter::is_include_all),
        }
    }

    /// Is this filter matched by an exclusion id (guid or instance id)?
    pub fn matches_id(&self, id: &str) -> bool {
        self.guid.as_str() == id || self.instance_id.as_deref() == Some(id)
    }
}
