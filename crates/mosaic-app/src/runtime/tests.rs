use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use mosaic_client::{ConversationApi, PushEvent};
use mosaic_common::{ConversationId, FetchError, Timestamp};
use mosaic_config::SyncConfig;
use mosaic_sync::LoadState;
use tokio::sync::mpsc;

use super::*;

/// In-memory server: canned bodies, every snapshot request recorded.
#[derive(Default)]
struct MockApi {
    directory: Option<Vec<u8>>,
    snapshots: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<(String, Option<Timestamp>)>>,
}

impl MockApi {
    fn calls(&self) -> Vec<(String, Option<Timestamp>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConversationApi for MockApi {
    async fn fetch_conversation_list(&self) -> Result<Vec<u8>, FetchError> {
        self.directory
            .clone()
            .ok_or_else(|| FetchError::Transport("connection refused".into()))
    }

    async fn fetch_conversation_snapshot(
        &self,
        id: &ConversationId,
        before: Option<Timestamp>,
    ) -> Result<Vec<u8>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((id.to_string(), before));
        self.snapshots
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Status {
                status: 404,
                url: format!("/api/conversations/{id}"),
            })
    }
}

struct Harness {
    commands: mpsc::Sender<UserCommand>,
    push: mpsc::Sender<PushEvent>,
    handle: tokio::task::JoinHandle<AppController>,
}

impl Harness {
    async fn start(api: Arc<MockApi>) -> Self {
        let controller = AppController::new(&SyncConfig::default());
        let renderer = HeadlessRenderer::new(controller.subscribe(), Box::new(std::io::sink()));
        let (push, push_rx) = mpsc::channel(16);
        let mut runtime = Runtime::new(controller, api, None, push_rx, renderer);
        runtime.load_directory().await;

        let (commands, command_rx) = mpsc::channel(16);
        let handle = tokio::spawn(runtime.run(command_rx));
        Self {
            commands,
            push,
            handle,
        }
    }

    async fn send(&self, command: UserCommand) {
        self.commands.send(command).await.unwrap();
    }

    /// Let spawned fetches finish, then stop the loop.
    async fn finish(self) -> AppController {
        tokio::time::sleep(Duration::from_millis(200)).await;
        self.commands.send(UserCommand::Quit).await.unwrap();
        self.handle.await.unwrap()
    }
}

fn cid(s: &str) -> ConversationId {
    ConversationId::from(s)
}

#[tokio::test]
async fn open_loads_history_and_paginates_once() {
    let mut api = MockApi::default();
    api.snapshots.insert(
        "c1".into(),
        br#"{"conversation_id":"c1","events":[
            {"id":"e1","timestamp":10,"content":"a"},
            {"id":"e2","timestamp":20,"content":"b"}
        ]}"#
        .to_vec(),
    );
    let api = Arc::new(api);

    let harness = Harness::start(Arc::clone(&api)).await;
    harness.send(UserCommand::Open(cid("c1"))).await;
    let app = harness.finish().await;

    let log = app.log(&cid("c1")).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log.load_state(), LoadState::Loaded);
    // Initial load, then one page below the low-water mark that brought
    // nothing new; no further requests.
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn failed_fetch_waits_for_retry() {
    let api = Arc::new(MockApi::default());
    let harness = Harness::start(Arc::clone(&api)).await;

    harness.send(UserCommand::Open(cid("missing"))).await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    harness.send(UserCommand::Retry(cid("missing"))).await;
    let app = harness.finish().await;

    assert_eq!(app.log(&cid("missing")).unwrap().load_state(), LoadState::Error);
    assert_eq!(api.calls().len(), 2);
}

#[tokio::test]
async fn directory_seeds_conversation_list() {
    let api = Arc::new(MockApi {
        directory: Some(
            br#"[{"id":"c1","name":"General","last_modified":5},{"id":"c2","name":"Random","last_modified":9}]"#
                .to_vec(),
        ),
        ..Default::default()
    });
    let harness = Harness::start(api).await;
    let app = harness.finish().await;

    let ids: Vec<_> = app
        .conversation_list()
        .into_iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(ids, vec!["c2", "c1"]);
}

#[tokio::test]
async fn push_frames_reach_the_log() {
    let api = Arc::new(MockApi::default());
    let harness = Harness::start(api).await;

    harness
        .push
        .send(PushEvent::Frame(
            br#"{"id":"e1","conversation_id":"c7","timestamp":3,"content":"hi"}"#.to_vec(),
        ))
        .await
        .unwrap();
    harness
        .push
        .send(PushEvent::Frame(b"garbage".to_vec()))
        .await
        .unwrap();
    let app = harness.finish().await;

    let log = app.log(&cid("c7")).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log.load_state(), LoadState::Empty);
}

#[tokio::test]
async fn closing_the_command_stream_stops_the_loop() {
    let api = Arc::new(MockApi::default());
    let harness = Harness::start(api).await;
    drop(harness.commands);
    let app = harness.handle.await.unwrap();
    assert!(app.layout().is_empty());
}
