//! Conversation directory and outgoing messages.

use mosaic_client::OutgoingMessage;
use mosaic_common::{AppEvent, ConversationId, ConversationSummary, Timestamp};
use mosaic_sync::LoadState;
use tracing::{info, warn};

use super::core::AppController;

/// One row of the conversation list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub id: ConversationId,
    pub display_name: String,
    pub last_modified: Timestamp,
    pub load_state: LoadState,
    pub open: bool,
}

impl AppController {
    /// Record directory entries and make their conversations known.
    pub fn seed_directory(&mut self, summaries: Vec<ConversationSummary>) {
        let count = summaries.len();
        for summary in summaries {
            self.logs.seed(summary.id.clone(), summary.last_modified);
            self.directory.insert(summary.id.clone(), summary);
        }
        info!(count, "Conversation directory loaded");
        self.bus.publish(AppEvent::DirectoryLoaded(count));
    }

    /// Known conversations, most recently modified first.
    pub fn conversation_list(&self) -> Vec<ConversationEntry> {
        self.logs
            .ids_by_recency()
            .into_iter()
            .filter_map(|id| {
                let log = self.logs.get(&id)?;
                let display_name = self
                    .directory
                    .get(&id)
                    .map(|s| s.display_name())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| id.to_string());
                Some(ConversationEntry {
                    open: self.layout.contains(&id),
                    display_name,
                    last_modified: log.last_modified(),
                    load_state: log.load_state(),
                    id,
                })
            })
            .collect()
    }

    /// Build the message for the push channel. The log is not touched; the
    /// server echoes the message back as a live event. Blank text is
    /// ignored.
    pub fn send_message(&self, id: &ConversationId, text: &str) -> Option<OutgoingMessage> {
        let text = text.trim();
        if text.is_empty() {
            warn!(conversation_id = %id, "Ignoring empty message");
            return None;
        }
        Some(OutgoingMessage {
            conversation_id: id.clone(),
            message: text.to_string(),
        })
    }
}
