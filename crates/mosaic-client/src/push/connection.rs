//! Background WebSocket connection loop with auto-reconnect.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{Sink, SinkExt, StreamExt};
use mosaic_config::PushConfig;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tracing::{debug, error, info, warn};

use super::types::{PushCommand, PushEvent};

/// Keeps the push connection alive until a `Disconnect` command arrives or
/// the event receiver is dropped.
pub(crate) async fn connection_loop(
    url: String,
    config: PushConfig,
    connected: Arc<RwLock<bool>>,
    event_tx: mpsc::Sender<PushEvent>,
    command_rx: mpsc::Receiver<PushCommand>,
) {
    let command_rx = Arc::new(Mutex::new(command_rx));
    let shutdown = Arc::new(AtomicBool::new(false));
    let connect_timeout = u64::from(config.connect_timeout_secs).max(1);
    let base_delay = u64::from(config.reconnect_delay_secs).max(1);
    let max_delay = u64::from(config.max_reconnect_delay_secs).max(base_delay);
    let mut reconnect_delay = base_delay;

    loop {
        info!(url = %url, "Connecting to push channel");

        match tokio::time::timeout(
            Duration::from_secs(connect_timeout),
            tokio_tungstenite::connect_async(url.as_str()),
        )
        .await
        {
            Ok(Ok((ws_stream, _))) => {
                reconnect_delay = base_delay;
                *connected.write().await = true;
                if event_tx.send(PushEvent::Connected).await.is_err() {
                    return;
                }

                let (ws_write, mut ws_read) = ws_stream.split();
                let ws_write = Arc::new(Mutex::new(ws_write));

                let cmd_handle = tokio::spawn(command_forwarder(
                    Arc::clone(&command_rx),
                    Arc::clone(&ws_write),
                    Arc::clone(&shutdown),
                ));

                while let Some(msg_result) = ws_read.next().await {
                    let frame = match msg_result {
                        Ok(WsMessage::Text(text)) => text.as_str().as_bytes().to_vec(),
                        Ok(WsMessage::Binary(data)) => data.to_vec(),
                        Ok(WsMessage::Close(_)) => {
                            info!("Push channel closed by server");
                            break;
                        }
                        Ok(_) => continue,
                        Err(e) => {
                            warn!(error = %e, "WebSocket error");
                            break;
                        }
                    };
                    debug!(bytes = frame.len(), "Push frame received");
                    if event_tx.send(PushEvent::Frame(frame)).await.is_err() {
                        cmd_handle.abort();
                        return;
                    }
                }

                cmd_handle.abort();
                *connected.write().await = false;
                let _ = event_tx.send(PushEvent::Disconnected).await;
            }
            Ok(Err(e)) => {
                error!(error = %e, "Failed to connect to push channel");
                if event_tx
                    .send(PushEvent::Error(format!("Connection failed: {e}")))
                    .await
                    .is_err()
                {
                    return;
                }
            }
            Err(_elapsed) => {
                error!("Push connection timed out after {connect_timeout}s");
                if event_tx
                    .send(PushEvent::Error(format!(
                        "Connection timed out after {connect_timeout}s"
                    )))
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }

        if shutdown.load(Ordering::SeqCst) {
            info!("Push channel stopped");
            return;
        }

        info!(delay = reconnect_delay, "Reconnecting in {} seconds", reconnect_delay);
        tokio::time::sleep(Duration::from_secs(reconnect_delay)).await;
        reconnect_delay = (reconnect_delay * 2).min(max_delay);
    }
}

async fn command_forwarder<S>(
    cmd_rx: Arc<Mutex<mpsc::Receiver<PushCommand>>>,
    ws_write: Arc<Mutex<S>>,
    shutdown: Arc<AtomicBool>,
) where
    S: Sink<WsMessage> + Unpin,
{
    let mut rx = cmd_rx.lock().await;
    while let Some(cmd) = rx.recv().await {
        match cmd {
            PushCommand::Send(json) => {
                let mut writer = ws_write.lock().await;
                if writer.send(WsMessage::Text(json.into())).await.is_err() {
                    warn!("Failed to write outgoing message");
                }
            }
            PushCommand::Disconnect => {
                shutdown.store(true, Ordering::SeqCst);
                let mut writer = ws_write.lock().await;
                let _ = writer.send(WsMessage::Close(None)).await;
                return;
            }
        }
    }
}
