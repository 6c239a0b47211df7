//! Live frames, render ticks, and fetch completions.

use mosaic_client::{decode_event_frame, decode_snapshot};
use mosaic_common::{AppEvent, ConversationId, DecodeError, FetchError};
use mosaic_sync::SyncError;
use tracing::{debug, warn};

use super::core::AppController;

impl AppController {
    /// Merge one push frame. Undecodable frames are dropped. Returns
    /// whether the frame added a new event.
    pub fn on_live_event_frame(&mut self, frame: &[u8]) -> Result<bool, DecodeError> {
        let event = decode_event_frame(frame).inspect_err(|e| {
            warn!(error = %e, "Dropping push frame");
        })?;
        let id = event.conversation_id.clone();
        let inserted = self.sync.on_live_event(&mut self.logs, event);
        if inserted {
            self.bus.publish(AppEvent::LogUpdated(id));
        } else {
            debug!(conversation_id = %id, "Duplicate live event ignored");
        }
        Ok(inserted)
    }

    /// A window showing `id` rendered `visible_event_count` events.
    pub fn on_render_tick(&mut self, id: &ConversationId, visible_event_count: usize) {
        let request = self.sync.on_low_water_mark(
            &mut self.logs,
            id,
            visible_event_count,
            self.low_water_mark,
        );
        self.queue_fetch(request);
    }

    /// Apply the outcome of the fetch issued under `ticket`.
    pub fn on_fetch_completed(&mut self, ticket: u64, result: Result<Vec<u8>, FetchError>) {
        let outcome = match result {
            Ok(body) => match decode_snapshot(&body) {
                Ok(snapshot) => self
                    .sync
                    .on_fetch_success(&mut self.logs, ticket, snapshot.events)
                    .map(|applied| {
                        if applied.inserted > 0 {
                            self.bus
                                .publish(AppEvent::LogUpdated(applied.conversation_id.clone()));
                        }
                        applied.conversation_id
                    }),
                Err(e) => {
                    warn!(ticket, error = %e, "Snapshot could not be decoded");
                    self.fail_fetch(ticket)
                }
            },
            Err(e) => {
                warn!(ticket, error = %e, "Fetch failed");
                self.fail_fetch(ticket)
            }
        };

        match outcome {
            Ok(id) => self.publish_load_state(&id),
            Err(SyncError::Invariant(violation)) => {
                warn!(ticket, error = %violation, "Discarding fetch result");
            }
        }
    }

    /// Explicit retry after a failed load.
    pub fn retry_conversation(&mut self, id: &ConversationId) {
        let request = self.sync.on_conversation_opened(&mut self.logs, id);
        if request.is_none() {
            debug!(conversation_id = %id, "Nothing to retry");
        }
        self.queue_fetch(request);
    }

    fn fail_fetch(&mut self, ticket: u64) -> Result<ConversationId, SyncError> {
        let id = self.sync.on_fetch_failure(&mut self.logs, ticket)?;
        self.bus
            .publish(AppEvent::Notice(format!("Could not load conversation {id}")));
        Ok(id)
    }
}
