//! State transitions of the synchronizer.

use std::collections::HashMap;

use mosaic_common::{ChatEvent, ConversationId, InvariantViolation, Timestamp};
use tracing::{debug, warn};

use crate::conversation::LoadState;
use crate::logs::ConversationLogs;

use super::types::{FetchApplied, FetchKind, FetchRequest, SyncError};

/// Decides when history must be fetched and merges results into the logs.
///
/// Performs no I/O: a due fetch is returned as a [`FetchRequest`] and its
/// outcome is reported back with the request's ticket. At most one ticket is
/// outstanding per conversation.
#[derive(Debug)]
pub struct EventSynchronizer {
    next_ticket: u64,
    /// Outstanding ticket -> conversation.
    tickets: HashMap<u64, ConversationId>,
    /// Conversation -> its outstanding ticket.
    in_flight: HashMap<ConversationId, u64>,
}

impl Default for EventSynchronizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSynchronizer {
    pub fn new() -> Self {
        Self {
            next_ticket: 1,
            tickets: HashMap::new(),
            in_flight: HashMap::new(),
        }
    }

    pub fn in_flight(&self, id: &ConversationId) -> bool {
        self.in_flight.contains_key(id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.tickets.len()
    }

    /// A window for `id` was opened. Starts the initial load when the log has
    /// nothing yet, or retries after an error.
    pub fn on_conversation_opened(
        &mut self,
        logs: &mut ConversationLogs,
        id: &ConversationId,
    ) -> Option<FetchRequest> {
        let in_flight = self.in_flight(id);
        let log = logs.get_or_create(id);
        match log.load_state() {
            LoadState::Empty | LoadState::Error if !in_flight => {
                log.mark_loading();
                Some(self.issue(id, FetchKind::Initial, None))
            }
            state => {
                debug!(conversation_id = %id, %state, "Open does not need a fetch");
                None
            }
        }
    }

    /// The window for `id` shows fewer than `threshold` events. Fetches more
    /// history only from `Loaded` and only when nothing is in flight.
    pub fn on_low_water_mark(
        &mut self,
        logs: &mut ConversationLogs,
        id: &ConversationId,
        current_count: usize,
        threshold: usize,
    ) -> Option<FetchRequest> {
        if current_count >= threshold {
            return None;
        }
        let in_flight = self.in_flight(id);
        let log = logs.get_mut(id)?;
        if log.load_state() != LoadState::Loaded || in_flight {
            return None;
        }
        log.mark_loading_more();
        let before = log.oldest_loaded_timestamp();
        Some(self.issue(id, FetchKind::More, before))
    }

    /// Apply a fetched snapshot. The ticket must be the one outstanding for a
    /// tracked conversation; otherwise nothing is applied.
    pub fn on_fetch_success(
        &mut self,
        logs: &mut ConversationLogs,
        ticket: u64,
        events: Vec<ChatEvent>,
    ) -> Result<FetchApplied, SyncError> {
        let id = self.complete(ticket)?;
        let log = logs
            .get_mut(&id)
            .ok_or_else(|| InvariantViolation::UntrackedConversation(id.clone()))?;

        let total = events.len();
        let addressed: Vec<ChatEvent> = events
            .into_iter()
            .filter(|e| e.conversation_id == id)
            .collect();
        let misaddressed = total - addressed.len();
        if misaddressed > 0 {
            warn!(conversation_id = %id, misaddressed, "Dropping snapshot events for other conversations");
        }
        let inserted = log.apply_snapshot(addressed);
        log.mark_loaded();

        let applied = FetchApplied {
            conversation_id: id,
            inserted,
            misaddressed,
        };
        debug!(
            conversation_id = %applied.conversation_id,
            ticket,
            inserted = applied.inserted,
            "Snapshot applied"
        );
        Ok(applied)
    }

    /// The fetch for `ticket` failed. The conversation goes to `Error` and
    /// stays there until the caller triggers a retry.
    pub fn on_fetch_failure(
        &mut self,
        logs: &mut ConversationLogs,
        ticket: u64,
    ) -> Result<ConversationId, SyncError> {
        let id = self.complete(ticket)?;
        let log = logs
            .get_mut(&id)
            .ok_or_else(|| InvariantViolation::UntrackedConversation(id.clone()))?;
        log.mark_error();
        Ok(id)
    }

    /// Merge a pushed event whatever the log's load state; the log is created
    /// if this is the first time the conversation is seen. Returns whether
    /// the event was new.
    pub fn on_live_event(&mut self, logs: &mut ConversationLogs, event: ChatEvent) -> bool {
        let id = event.conversation_id.clone();
        logs.get_or_create(&id).apply_event(event)
    }

    fn issue(&mut self, id: &ConversationId, kind: FetchKind, before: Option<Timestamp>) -> FetchRequest {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.tickets.insert(ticket, id.clone());
        self.in_flight.insert(id.clone(), ticket);
        debug!(conversation_id = %id, ticket, ?kind, "Fetch issued");
        FetchRequest {
            ticket,
            conversation_id: id.clone(),
            kind,
            before,
        }
    }

    fn complete(&mut self, ticket: u64) -> Result<ConversationId, InvariantViolation> {
        match self.tickets.remove(&ticket) {
            Some(id) => {
                self.in_flight.remove(&id);
                Ok(id)
            }
            None => {
                warn!(ticket, "Fetch completion for a ticket that is not outstanding");
                Err(InvariantViolation::StaleTicket { ticket })
            }
        }
    }
}
