use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::ConversationId;

/// Notifications published by the controller for the rendering layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AppEvent {
    LayoutChanged,
    LogUpdated(ConversationId),
    LoadStateChanged { id: ConversationId, state: String },
    DirectoryLoaded(usize),
    Notice(String),
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: AppEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}
