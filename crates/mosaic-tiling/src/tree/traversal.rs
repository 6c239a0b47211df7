//! Read-only traversal of the layout tree: leaves, paths, lookups.

use std::collections::{BTreeMap, BTreeSet};

use mosaic_common::ConversationId;

use super::{Branch, Corner, LayoutTree, PaneNode};

impl LayoutTree {
    /// All placed conversation ids in depth-first (left-to-right) order.
    pub fn leaves(&self) -> Vec<ConversationId> {
        let mut ids = Vec::new();
        if let Some(root) = &self.root {
            root.collect_ids_into(&mut ids);
        }
        ids
    }

    /// The set of conversations that currently have a pane.
    pub fn list_placed_conversations(&self) -> BTreeSet<ConversationId> {
        self.leaves().into_iter().collect()
    }

    /// Ids that occur in more than one leaf. Empty for a well-formed tree.
    pub fn duplicate_leaves(&self) -> Vec<ConversationId> {
        let mut counts: BTreeMap<ConversationId, usize> = BTreeMap::new();
        for id in self.leaves() {
            *counts.entry(id).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(id, _)| id)
            .collect()
    }

    /// Branch choices from the root to the leaf nearest `corner`.
    /// Empty when the tree is empty or the root is a leaf.
    pub fn path_to_corner(&self, corner: Corner) -> Vec<Branch> {
        let mut path = Vec::new();
        let mut node = self.root.as_deref();
        while let Some(PaneNode::Split {
            direction,
            first,
            second,
            ..
        }) = node
        {
            let branch = corner.branch_at(*direction);
            path.push(branch);
            node = Some(match branch {
                Branch::First => &**first,
                Branch::Second => &**second,
            });
        }
        path
    }

    pub fn node_at_path(&self, path: &[Branch]) -> Option<&PaneNode> {
        let mut node = self.root.as_deref()?;
        for step in path {
            node = node.child(*step)?.as_ref();
        }
        Some(node)
    }

    /// Path to the leaf holding `id`, if placed.
    pub fn path_to(&self, id: &ConversationId) -> Option<Vec<Branch>> {
        fn walk(node: &PaneNode, id: &ConversationId, path: &mut Vec<Branch>) -> bool {
            match node {
                PaneNode::Leaf { conversation_id } => conversation_id == id,
                PaneNode::Split { first, second, .. } => {
                    path.push(Branch::First);
                    if walk(first, id, path) {
                        return true;
                    }
                    path.pop();
                    path.push(Branch::Second);
                    if walk(second, id, path) {
                        return true;
                    }
                    path.pop();
                    false
                }
            }
        }

        let mut path = Vec::new();
        walk(self.root.as_deref()?, id, &mut path).then_some(path)
    }
}
