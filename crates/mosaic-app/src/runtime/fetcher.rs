//! Runs fetch requests as background tasks.

use std::sync::Arc;

use mosaic_client::ConversationApi;
use mosaic_common::{new_correlation_id, FetchError};
use mosaic_sync::FetchRequest;
use tokio::sync::mpsc;
use tracing::debug;

/// A finished fetch, reported back to the controller by ticket.
#[derive(Debug)]
pub struct FetchCompletion {
    pub ticket: u64,
    pub result: Result<Vec<u8>, FetchError>,
}

/// Spawn one task per request. Completions arrive on `tx` in whatever
/// order the server answers.
pub fn spawn_fetches(
    api: &Arc<dyn ConversationApi>,
    requests: Vec<FetchRequest>,
    tx: &mpsc::Sender<FetchCompletion>,
) {
    for request in requests {
        let api = Arc::clone(api);
        let tx = tx.clone();
        tokio::spawn(async move {
            let request_id = new_correlation_id();
            debug!(
                request_id = %request_id,
                conversation_id = %request.conversation_id,
                ticket = request.ticket,
                kind = ?request.kind,
                "Fetching snapshot"
            );
            let result = api
                .fetch_conversation_snapshot(&request.conversation_id, request.before)
                .await;
            debug!(request_id = %request_id, ok = result.is_ok(), "Fetch finished");
            let _ = tx
                .send(FetchCompletion {
                    ticket: request.ticket,
                    result,
                })
                .await;
        });
    }
}
