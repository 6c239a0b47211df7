use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use mosaic_common::ConversationId;
use mosaic_config::PushConfig;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;

use super::*;
use crate::codec::OutgoingMessage;

async fn next_event(rx: &mut mpsc::Receiver<PushEvent>) -> PushEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for push event")
        .expect("push channel closed")
}

fn fast_config() -> PushConfig {
    PushConfig {
        connect_timeout_secs: 2,
        reconnect_delay_secs: 1,
        max_reconnect_delay_secs: 1,
    }
}

#[tokio::test]
async fn receives_frames_and_sends_messages() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (got_tx, mut got_rx) = mpsc::channel::<String>(1);

    tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
        ws.send(WsMessage::Text(
            r#"{"id":"e1","conversation_id":"c1","timestamp":1,"content":"hi"}"#.into(),
        ))
        .await
        .unwrap();
        while let Some(Ok(msg)) = ws.next().await {
            if let WsMessage::Text(text) = msg {
                let _ = got_tx.send(text.as_str().to_string()).await;
            }
        }
    });

    let (client, mut events) = PushClient::connect(format!("ws://{addr}"), fast_config());
    assert_eq!(next_event(&mut events).await, PushEvent::Connected);
    assert!(client.is_connected().await);

    match next_event(&mut events).await {
        PushEvent::Frame(bytes) => {
            let event = crate::codec::decode_event_frame(&bytes).unwrap();
            assert_eq!(event.id.as_str(), "e1");
        }
        other => panic!("expected frame, got {other:?}"),
    }

    client
        .send_message(&OutgoingMessage {
            conversation_id: ConversationId::from("c1"),
            message: "hello".into(),
        })
        .await;
    let sent = tokio::time::timeout(Duration::from_secs(5), got_rx.recv())
        .await
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&sent).unwrap();
    assert_eq!(value["type"], "conv_message");
    assert_eq!(value["message"], "hello");

    client.disconnect().await;
    assert_eq!(next_event(&mut events).await, PushEvent::Disconnected);
}

#[tokio::test]
async fn failed_connect_reports_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (client, mut events) = PushClient::connect(format!("ws://{addr}"), fast_config());
    assert!(matches!(next_event(&mut events).await, PushEvent::Error(_)));
    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn reconnects_after_server_close_and_stops_on_disconnect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let server_accepted = accepted.clone();

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let nth = server_accepted.fetch_add(1, Ordering::SeqCst);
            tokio::spawn(async move {
                let mut ws = tokio_tungstenite::accept_async(socket).await.unwrap();
                if nth == 0 {
                    let _ = ws.close(None).await;
                }
                while let Some(Ok(_)) = ws.next().await {}
            });
        }
    });

    let (client, mut events) = PushClient::connect(format!("ws://{addr}"), fast_config());
    assert_eq!(next_event(&mut events).await, PushEvent::Connected);
    assert_eq!(next_event(&mut events).await, PushEvent::Disconnected);
    assert_eq!(next_event(&mut events).await, PushEvent::Connected);
    assert!(client.is_connected().await);

    client.disconnect().await;
    assert_eq!(next_event(&mut events).await, PushEvent::Disconnected);

    // Longer than the 1s backoff: a reconnect would have shown up by now.
    let after = tokio::time::timeout(Duration::from_millis(1500), events.recv()).await;
    assert!(!matches!(after, Ok(Some(_))), "unexpected event after disconnect: {after:?}");
    assert_eq!(accepted.load(Ordering::SeqCst), 2);
    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn zero_reconnect_delay_still_backs_off() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = PushConfig {
        connect_timeout_secs: 0,
        reconnect_delay_secs: 0,
        max_reconnect_delay_secs: 0,
    };
    let (client, mut events) = PushClient::connect(format!("ws://{addr}"), config);

    let mut errors = 0;
    let window = tokio::time::sleep(Duration::from_millis(500));
    tokio::pin!(window);
    loop {
        tokio::select! {
            _ = &mut window => break,
            event = events.recv() => match event {
                Some(PushEvent::Error(_)) => errors += 1,
                Some(_) => {}
                None => break,
            },
        }
    }

    assert!((1..=2).contains(&errors), "{errors} connect attempts in 500ms");
    client.disconnect().await;
}
