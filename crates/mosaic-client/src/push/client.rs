//! Public handle for the push channel.

use std::sync::Arc;

use mosaic_config::PushConfig;
use tokio::sync::{mpsc, RwLock};
use tracing::warn;

use crate::codec::{encode_outgoing, OutgoingMessage};

use super::connection::connection_loop;
use super::types::{PushCommand, PushEvent};

/// Handle for the push channel. Methods are non-blocking and forward
/// commands to the background connection task.
pub struct PushClient {
    command_tx: mpsc::Sender<PushCommand>,
    connected: Arc<RwLock<bool>>,
}

impl PushClient {
    /// Start the background connection to `url`.
    /// Returns `(client, event_receiver)`.
    pub fn connect(url: String, config: PushConfig) -> (Self, mpsc::Receiver<PushEvent>) {
        let (event_tx, event_rx) = mpsc::channel(256);
        let (command_tx, command_rx) = mpsc::channel(64);
        let connected = Arc::new(RwLock::new(false));

        let client = Self {
            command_tx,
            connected: Arc::clone(&connected),
        };

        tokio::spawn(connection_loop(url, config, connected, event_tx, command_rx));

        (client, event_rx)
    }

    /// Queue a user message. Messages sent while disconnected go out once
    /// the connection is back.
    pub async fn send_message(&self, message: &OutgoingMessage) {
        let json = encode_outgoing(message);
        if self.command_tx.send(PushCommand::Send(json)).await.is_err() {
            warn!(conversation_id = %message.conversation_id, "Push channel is closed; message dropped");
        }
    }

    pub async fn is_connected(&self) -> bool {
        *self.connected.read().await
    }

    /// Close the connection and stop reconnecting.
    pub async fn disconnect(&self) {
        let _ = self.command_tx.send(PushCommand::Disconnect).await;
    }
}
