//! A single conversation's ordered, duplicate-free event log.

use std::collections::HashSet;
use std::fmt;

use mosaic_common::{ChatEvent, ConversationId, EventId, Timestamp};
use serde::{Deserialize, Serialize};

/// Loading state of a conversation's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Empty,
    Loading,
    Loaded,
    LoadingMore,
    Error,
}

impl LoadState {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadState::Empty => "empty",
            LoadState::Loading => "loading",
            LoadState::Loaded => "loaded",
            LoadState::LoadingMore => "loading_more",
            LoadState::Error => "error",
        }
    }

    /// A history fetch is outstanding in this state.
    pub fn is_loading(self) -> bool {
        matches!(self, LoadState::Loading | LoadState::LoadingMore)
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events of one conversation, sorted by `(timestamp, id)` with unique ids.
///
/// Read access is public; every mutation goes through
/// [`EventSynchronizer`](crate::EventSynchronizer).
#[derive(Debug, Clone)]
pub struct ConversationLog {
    conversation_id: ConversationId,
    events: Vec<ChatEvent>,
    ids: HashSet<EventId>,
    load_state: LoadState,
    last_modified: Timestamp,
    oldest_loaded_timestamp: Option<Timestamp>,
}

impl ConversationLog {
    pub(crate) fn new(conversation_id: ConversationId) -> Self {
        Self {
            conversation_id,
            events: Vec::new(),
            ids: HashSet::new(),
            load_state: LoadState::Empty,
            last_modified: 0,
            oldest_loaded_timestamp: None,
        }
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.conversation_id
    }

    pub fn events(&self) -> &[ChatEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.ids.contains(id)
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn last_modified(&self) -> Timestamp {
        self.last_modified
    }

    /// Pagination cursor: the oldest timestamp any snapshot has delivered.
    pub fn oldest_loaded_timestamp(&self) -> Option<Timestamp> {
        self.oldest_loaded_timestamp
    }

    pub(crate) fn touch(&mut self, timestamp: Timestamp) {
        self.last_modified = self.last_modified.max(timestamp);
    }

    /// Sorted insert. A second event with an already-known id is a no-op.
    /// Returns whether the event was inserted.
    pub(crate) fn apply_event(&mut self, event: ChatEvent) -> bool {
        if self.ids.contains(&event.id) {
            return false;
        }
        let key = (event.timestamp, &event.id);
        let pos = self
            .events
            .partition_point(|e| (e.timestamp, &e.id) < key);
        self.touch(event.timestamp);
        self.ids.insert(event.id.clone());
        self.events.insert(pos, event);
        true
    }

    /// Merge a batch in any order and lower the pagination cursor to the
    /// batch minimum. Returns the number of newly inserted events.
    pub(crate) fn apply_snapshot<I>(&mut self, events: I) -> usize
    where
        I: IntoIterator<Item = ChatEvent>,
    {
        let mut inserted = 0;
        let mut batch_min: Option<Timestamp> = None;
        for event in events {
            batch_min = Some(batch_min.map_or(event.timestamp, |m| m.min(event.timestamp)));
            if self.apply_event(event) {
                inserted += 1;
            }
        }
        if let Some(min) = batch_min {
            self.oldest_loaded_timestamp = Some(
                self.oldest_loaded_timestamp
                    .map_or(min, |current| current.min(min)),
            );
        }
        inserted
    }

    pub(crate) fn mark_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub(crate) fn mark_loading_more(&mut self) {
        self.load_state = LoadState::LoadingMore;
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.load_state = LoadState::Loaded;
    }

    pub(crate) fn mark_error(&mut self) {
        self.load_state = LoadState::Error;
    }
}
