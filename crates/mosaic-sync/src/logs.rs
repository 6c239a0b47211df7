//! The map of every known conversation's log.

use std::collections::HashMap;

use mosaic_common::{ConversationId, Timestamp};

use crate::conversation::ConversationLog;

/// All conversation logs, keyed by id. Logs are created lazily and never
/// removed here; eviction is left to the owner.
#[derive(Debug, Default)]
pub struct ConversationLogs {
    logs: HashMap<ConversationId, ConversationLog>,
}

impl ConversationLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a conversation known, e.g. from the directory, with its
    /// last-modified time. An existing log keeps its events.
    pub fn seed(&mut self, id: ConversationId, last_modified: Timestamp) {
        self.get_or_create(&id).touch(last_modified);
    }

    pub fn get(&self, id: &ConversationId) -> Option<&ConversationLog> {
        self.logs.get(id)
    }

    pub fn contains(&self, id: &ConversationId) -> bool {
        self.logs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Conversation ids, most recently modified first (ties by id).
    pub fn ids_by_recency(&self) -> Vec<ConversationId> {
        let mut entries: Vec<_> = self
            .logs
            .values()
            .map(|log| (log.last_modified(), log.conversation_id().clone()))
            .collect();
        entries.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        entries.into_iter().map(|(_, id)| id).collect()
    }

    pub(crate) fn get_mut(&mut self, id: &ConversationId) -> Option<&mut ConversationLog> {
        self.logs.get_mut(id)
    }

    pub(crate) fn get_or_create(&mut self, id: &ConversationId) -> &mut ConversationLog {
        self.logs
            .entry(id.clone())
            .or_insert_with(|| ConversationLog::new(id.clone()))
    }
}
