//! Filter relation trees
//!
//! A relation tree overrides the implicit "AND everything" combination of a
//! dashboard's filters. Leaves reference filters by guid; groups keep their
//! children in display order.

use serde::{Deserialize, Serialize};
use std::fmt;
use super::filter::FilterGuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationOp {
    And,
    Or,
}

impl fmt::Display for RelationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationOp::And => write!(f, "AND"),
            RelationOp::Or => write!(f, "OR"),
        }
    }
}

/// A node of a relation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationNode {
    Leaf(FilterGuid),
    Group {
        op: RelationOp,
        children: Vec<RelationNode>,
    },
}

impl RelationNode {
    pub fn leaf(guid: impl Into<FilterGuid>) -> Self {
        RelationNode::Leaf(guid.into())
    }

    pub fn and(children: Vec<RelationNode>) -> Self {
        RelationNode::Group { op: RelationOp::And, children }
    }

    pub fn or(children: Vec<RelationNode>) -> Self {
        RelationNode::Group { op: RelationOp::Or, children }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, RelationNode::Leaf(_))
    }

    pub fn op(&self) -> Option<RelationOp> {
        match self {
            RelationNode::Leaf(_) => None,
            RelationNode::Group { op, .. } => Some(*op),
        }
    }

    /// Leaf guids in depth-first display order
    pub fn leaves(&self) -> Vec<&FilterGuid> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FilterGuid>) {
        match self {
            RelationNode::Leaf(guid) => out.push(guid),
            RelationNode::Group { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    pub fn contains(&self, guid: &FilterGuid) -> bool {
        match self {
            RelationNode::Leaf(g) => g == guid,
            RelationNode::Group { children, .. } => children.iter().any(|c| c.contains(guid)),
        }
    }

    /// Depth of the tree (a lone leaf has depth 1)
    pub fn depth(&self) -> usize {
        match self {
            RelationNode::Leaf(_) => 1,
            RelationNode::Group { children, .. } => {
                1 + children.iter().map(RelationNode::depth).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for RelationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationNode::Leaf(guid) => write!(f, "{}", guid),
            RelationNode::Group { op, children } => {
                write!(f, "(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op)?;
                    }
                    write!(f, "{}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}
