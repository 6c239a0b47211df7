//! User actions on the layout.

use mosaic_common::{AppEvent, ConversationId, InvariantViolation};
use mosaic_tiling::{Corner, LayoutTree};
use tracing::{debug, info, warn};

use super::core::AppController;

impl AppController {
    /// Show a conversation. Already-placed conversations are left where
    /// they are; new ones go to the top-right corner and start loading.
    pub fn open_conversation(&mut self, id: ConversationId) {
        match self.layout.try_insert_at_corner(id.clone(), Corner::TopRight) {
            Ok(layout) => self.layout = layout,
            Err(e) => {
                debug!(error = %e, "Conversation already open");
                return;
            }
        }
        info!(conversation_id = %id, "Opened conversation");
        self.bus.publish(AppEvent::LayoutChanged);

        let request = self.sync.on_conversation_opened(&mut self.logs, &id);
        self.queue_fetch(request);
    }

    /// Replace the layout with a user-edited tree. A tree that places any
    /// conversation twice is rejected and the current layout kept.
    pub fn on_user_layout_edit(&mut self, new_tree: LayoutTree) -> Result<(), InvariantViolation> {
        let duplicates = new_tree.duplicate_leaves();
        if !duplicates.is_empty() {
            let violation = InvariantViolation::DuplicateLeaves(duplicates);
            warn!(error = %violation, "Rejecting layout edit");
            return Err(violation);
        }
        if new_tree == self.layout {
            return Ok(());
        }

        let newly_placed: Vec<ConversationId> = new_tree
            .leaves()
            .into_iter()
            .filter(|id| !self.layout.contains(id))
            .collect();
        self.layout = new_tree;
        self.bus.publish(AppEvent::LayoutChanged);

        // Panes introduced by the edit need their history like any other.
        for id in newly_placed {
            let request = self.sync.on_conversation_opened(&mut self.logs, &id);
            self.queue_fetch(request);
        }
        Ok(())
    }

    /// Remove a conversation's pane. Its log is kept.
    pub fn close_conversation(&mut self, id: &ConversationId) -> bool {
        match self.layout.remove_leaf(id) {
            Some(layout) => {
                info!(conversation_id = %id, "Closing conversation");
                self.layout = layout;
                self.bus.publish(AppEvent::LayoutChanged);
                true
            }
            None => false,
        }
    }
}
