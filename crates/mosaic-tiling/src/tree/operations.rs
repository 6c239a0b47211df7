//! Structural edits on the layout tree: insert, replace, remove, resize.
//!
//! None of these mutate `self`. Each rebuilds the ancestors along the edited
//! path and shares every other subtree with the original.

use std::sync::Arc;

use mosaic_common::{ConversationId, InvariantViolation};

use super::{Branch, Corner, Direction, LayoutTree, PaneNode};

const MIN_FRACTION: f64 = 0.1;
const MAX_FRACTION: f64 = 0.9;

impl LayoutTree {
    /// Insert a pane for `conversation_id` as close as possible to `corner`.
    ///
    /// Walks toward the corner to the nearest leaf, then splits that leaf
    /// orthogonally to its parent split (`Row` at the root) with the new pane
    /// on the corner side. The caller must ensure the id is not yet placed.
    pub fn insert_at_corner(&self, conversation_id: ConversationId, corner: Corner) -> LayoutTree {
        let leaf = Arc::new(PaneNode::Leaf { conversation_id });
        match &self.root {
            None => LayoutTree::from_arc(Some(leaf)),
            Some(root) => LayoutTree::from_arc(Some(insert_toward(root, None, leaf, corner))),
        }
    }

    /// [`insert_at_corner`](Self::insert_at_corner) that refuses an id that
    /// is already placed.
    pub fn try_insert_at_corner(
        &self,
        conversation_id: ConversationId,
        corner: Corner,
    ) -> Result<LayoutTree, InvariantViolation> {
        if self.contains(&conversation_id) {
            return Err(InvariantViolation::DuplicateLeaf(conversation_id));
        }
        Ok(self.insert_at_corner(conversation_id, corner))
    }

    /// Replace the node at `path`. Returns `None` if the path does not exist.
    pub fn replace_at_path(&self, path: &[Branch], replacement: PaneNode) -> Option<LayoutTree> {
        let root = self.root.as_ref()?;
        let rebuilt = rebuild(root, path, Arc::new(replacement))?;
        Some(LayoutTree::from_arc(Some(rebuilt)))
    }

    /// Remove the leaf holding `id`; its sibling takes the parent's place.
    /// Removing the only leaf yields an empty tree. `None` if `id` is absent.
    pub fn remove_leaf(&self, id: &ConversationId) -> Option<LayoutTree> {
        match remove(self.root.as_ref()?, id) {
            Removal::NotFound => None,
            Removal::Removed(rest) => Some(LayoutTree::from_arc(rest)),
        }
    }

    /// Set the split fraction of the split at `path`, clamped to [0.1, 0.9].
    /// `None` if there is no split at `path`.
    pub fn set_split_fraction(&self, path: &[Branch], fraction: f64) -> Option<LayoutTree> {
        match self.node_at_path(path)? {
            PaneNode::Leaf { .. } => None,
            PaneNode::Split {
                direction,
                first,
                second,
                ..
            } => self.replace_at_path(
                path,
                PaneNode::Split {
                    direction: *direction,
                    split_fraction: fraction.clamp(MIN_FRACTION, MAX_FRACTION),
                    first: Arc::clone(first),
                    second: Arc::clone(second),
                },
            ),
        }
    }
}

fn insert_toward(
    node: &Arc<PaneNode>,
    parent_direction: Option<Direction>,
    leaf: Arc<PaneNode>,
    corner: Corner,
) -> Arc<PaneNode> {
    match node.as_ref() {
        PaneNode::Leaf { .. } => {
            let direction = parent_direction.map_or(Direction::Row, Direction::other);
            let destination = Arc::clone(node);
            let (first, second) = match corner.branch_at(direction) {
                Branch::First => (leaf, destination),
                Branch::Second => (destination, leaf),
            };
            Arc::new(PaneNode::Split {
                direction,
                split_fraction: 0.5,
                first,
                second,
            })
        }
        PaneNode::Split {
            direction,
            split_fraction,
            first,
            second,
        } => {
            let (first, second) = match corner.branch_at(*direction) {
                Branch::First => (
                    insert_toward(first, Some(*direction), leaf, corner),
                    Arc::clone(second),
                ),
                Branch::Second => (
                    Arc::clone(first),
                    insert_toward(second, Some(*direction), leaf, corner),
                ),
            };
            Arc::new(PaneNode::Split {
                direction: *direction,
                split_fraction: *split_fraction,
                first,
                second,
            })
        }
    }
}

fn rebuild(node: &Arc<PaneNode>, path: &[Branch], replacement: Arc<PaneNode>) -> Option<Arc<PaneNode>> {
    let Some((step, rest)) = path.split_first() else {
        return Some(replacement);
    };
    match node.as_ref() {
        PaneNode::Leaf { .. } => None,
        PaneNode::Split {
            direction,
            split_fraction,
            first,
            second,
        } => {
            let (first, second) = match step {
                Branch::First => (rebuild(first, rest, replacement)?, Arc::clone(second)),
                Branch::Second => (Arc::clone(first), rebuild(second, rest, replacement)?),
            };
            Some(Arc::new(PaneNode::Split {
                direction: *direction,
                split_fraction: *split_fraction,
                first,
                second,
            }))
        }
    }
}

enum Removal {
    NotFound,
    Removed(Option<Arc<PaneNode>>),
}

fn remove(node: &Arc<PaneNode>, id: &ConversationId) -> Removal {
    match node.as_ref() {
        PaneNode::Leaf { conversation_id } if conversation_id == id => Removal::Removed(None),
        PaneNode::Leaf { .. } => Removal::NotFound,
        PaneNode::Split {
            direction,
            split_fraction,
            first,
            second,
        } => {
            let rejoin = |first: Arc<PaneNode>, second: Arc<PaneNode>| {
                Arc::new(PaneNode::Split {
                    direction: *direction,
                    split_fraction: *split_fraction,
                    first,
                    second,
                })
            };
            match remove(first, id) {
                Removal::Removed(None) => return Removal::Removed(Some(Arc::clone(second))),
                Removal::Removed(Some(n)) => {
                    return Removal::Removed(Some(rejoin(n, Arc::clone(second))))
                }
                Removal::NotFound => {}
            }
            match remove(second, id) {
                Removal::Removed(None) => Removal::Removed(Some(Arc::clone(first))),
                Removal::Removed(Some(n)) => Removal::Removed(Some(rejoin(Arc::clone(first), n))),
                Removal::NotFound => Removal::NotFound,
            }
        }
    }
}
