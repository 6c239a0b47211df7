//! `AppController` struct and read access to its state.

use std::collections::HashMap;

use mosaic_common::{AppEvent, ConversationId, ConversationSummary, EventBus};
use mosaic_config::SyncConfig;
use mosaic_sync::{ConversationLog, ConversationLogs, EventSynchronizer, FetchRequest};
use mosaic_tiling::LayoutTree;
use tokio::sync::broadcast;

/// Notification bus capacity. Slow subscribers see `Lagged` and resync.
const BUS_CAPACITY: usize = 256;

pub struct AppController {
    pub(super) layout: LayoutTree,
    pub(super) logs: ConversationLogs,
    pub(super) sync: EventSynchronizer,
    pub(super) directory: HashMap<ConversationId, ConversationSummary>,
    pub(super) outbox: Vec<FetchRequest>,
    pub(super) bus: EventBus,
    /// Fetch more history when a window shows fewer events than this.
    pub(super) low_water_mark: usize,
    /// Pass `oldest_loaded_timestamp` as the pagination cursor.
    pub(super) use_cursor: bool,
}

impl AppController {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            layout: LayoutTree::empty(),
            logs: ConversationLogs::new(),
            sync: EventSynchronizer::new(),
            directory: HashMap::new(),
            outbox: Vec::new(),
            bus: EventBus::new(BUS_CAPACITY),
            low_water_mark: config.low_water_mark.max(1) as usize,
            use_cursor: config.use_cursor,
        }
    }

    pub fn layout(&self) -> &LayoutTree {
        &self.layout
    }

    pub fn log(&self, id: &ConversationId) -> Option<&ConversationLog> {
        self.logs.get(id)
    }

    pub fn logs(&self) -> &ConversationLogs {
        &self.logs
    }

    pub fn low_water_mark(&self) -> usize {
        self.low_water_mark
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.bus.subscribe()
    }

    /// Hand pending fetches to the runtime. Each must be reported back via
    /// [`on_fetch_completed`](Self::on_fetch_completed).
    pub fn drain_fetch_requests(&mut self) -> Vec<FetchRequest> {
        let mut requests = std::mem::take(&mut self.outbox);
        if !self.use_cursor {
            for request in &mut requests {
                request.before = None;
            }
        }
        requests
    }

    pub(super) fn queue_fetch(&mut self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            let id = request.conversation_id.clone();
            self.outbox.push(request);
            self.publish_load_state(&id);
        }
    }

    pub(super) fn publish_load_state(&self, id: &ConversationId) {
        if let Some(log) = self.logs.get(id) {
            self.bus.publish(AppEvent::LoadStateChanged {
                id: id.clone(),
                state: log.load_state().to_string(),
            });
        }
    }
}
