//! Core types for the layout tree: Direction, Corner, Branch, PaneNode, LayoutTree.

use std::sync::Arc;

use mosaic_common::ConversationId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Children side by side, `first` on the left.
    Row,
    /// Children stacked, `first` on top.
    Column,
}

impl Direction {
    pub fn other(self) -> Self {
        match self {
            Direction::Row => Direction::Column,
            Direction::Column => Direction::Row,
        }
    }
}

/// Insertion target. Never stored in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// The child of a split with `direction` that lies nearer this corner.
    pub fn branch_at(self, direction: Direction) -> Branch {
        let first = match direction {
            Direction::Row => self.is_left(),
            Direction::Column => self.is_top(),
        };
        if first {
            Branch::First
        } else {
            Branch::Second
        }
    }
}

/// One step of a path from the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Branch {
    First,
    Second,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaneNode {
    Leaf {
        conversation_id: ConversationId,
    },
    Split {
        direction: Direction,
        split_fraction: f64,
        first: Arc<PaneNode>,
        second: Arc<PaneNode>,
    },
}

impl PaneNode {
    pub fn leaf(conversation_id: impl Into<ConversationId>) -> Self {
        PaneNode::Leaf {
            conversation_id: conversation_id.into(),
        }
    }

    pub fn split(direction: Direction, first: PaneNode, second: PaneNode) -> Self {
        PaneNode::Split {
            direction,
            split_fraction: 0.5,
            first: Arc::new(first),
            second: Arc::new(second),
        }
    }

    pub fn row(first: PaneNode, second: PaneNode) -> Self {
        Self::split(Direction::Row, first, second)
    }

    pub fn column(first: PaneNode, second: PaneNode) -> Self {
        Self::split(Direction::Column, first, second)
    }

    /// Split direction, `None` for leaves.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            PaneNode::Leaf { .. } => None,
            PaneNode::Split { direction, .. } => Some(*direction),
        }
    }

    pub fn child(&self, branch: Branch) -> Option<&Arc<PaneNode>> {
        match (self, branch) {
            (PaneNode::Leaf { .. }, _) => None,
            (PaneNode::Split { first, .. }, Branch::First) => Some(first),
            (PaneNode::Split { second, .. }, Branch::Second) => Some(second),
        }
    }

    pub fn pane_count(&self) -> usize {
        match self {
            PaneNode::Leaf { .. } => 1,
            PaneNode::Split { first, second, .. } => first.pane_count() + second.pane_count(),
        }
    }

    pub fn contains(&self, id: &ConversationId) -> bool {
        match self {
            PaneNode::Leaf { conversation_id } => conversation_id == id,
            PaneNode::Split { first, second, .. } => first.contains(id) || second.contains(id),
        }
    }

    pub(crate) fn collect_ids_into(&self, out: &mut Vec<ConversationId>) {
        match self {
            PaneNode::Leaf { conversation_id } => out.push(conversation_id.clone()),
            PaneNode::Split { first, second, .. } => {
                first.collect_ids_into(out);
                second.collect_ids_into(out);
            }
        }
    }
}

/// A layout: an optional root pane. Cloning is cheap, all nodes are shared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutTree {
    pub(crate) root: Option<Arc<PaneNode>>,
}

impl LayoutTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_root(root: PaneNode) -> Self {
        Self {
            root: Some(Arc::new(root)),
        }
    }

    pub(crate) fn from_arc(root: Option<Arc<PaneNode>>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&PaneNode> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn pane_count(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.pane_count())
    }

    pub fn contains(&self, id: &ConversationId) -> bool {
        self.root.as_ref().is_some_and(|r| r.contains(id))
    }

    /// True when both trees are the very same allocation (no edit happened).
    pub fn ptr_eq(&self, other: &LayoutTree) -> bool {
        match (&self.root, &other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
