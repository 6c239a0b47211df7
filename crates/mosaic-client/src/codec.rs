//! JSON wire format for frames, snapshots, the directory, and outgoing
//! messages.

use mosaic_common::{ChatEvent, ConversationId, ConversationSummary, DecodeError, EventId, Timestamp};
use serde::{Deserialize, Serialize};

/// A fetched conversation history: the full resend of what the server holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub conversation_id: ConversationId,
    pub events: Vec<ChatEvent>,
}

/// A user message handed to the push channel. The server echoes it back as
/// a live event, so it is never applied locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "conv_message")]
pub struct OutgoingMessage {
    pub conversation_id: ConversationId,
    pub message: String,
}

#[derive(Deserialize)]
struct SnapshotWire {
    conversation_id: ConversationId,
    #[serde(default)]
    events: Vec<SnapshotEventWire>,
}

/// Snapshot events may omit `conversation_id`; they then belong to the
/// snapshot's conversation.
#[derive(Deserialize)]
struct SnapshotEventWire {
    id: EventId,
    #[serde(default)]
    conversation_id: Option<ConversationId>,
    timestamp: Timestamp,
    #[serde(default)]
    content: String,
}

/// Decode one push frame into a single event.
pub fn decode_event_frame(bytes: &[u8]) -> Result<ChatEvent, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| DecodeError::Frame(e.to_string()))
}

/// Decode a snapshot body.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Snapshot, DecodeError> {
    let wire: SnapshotWire =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::Snapshot(e.to_string()))?;
    let events = wire
        .events
        .into_iter()
        .map(|e| ChatEvent {
            id: e.id,
            conversation_id: e
                .conversation_id
                .unwrap_or_else(|| wire.conversation_id.clone()),
            timestamp: e.timestamp,
            content: e.content,
        })
        .collect();
    Ok(Snapshot {
        conversation_id: wire.conversation_id,
        events,
    })
}

/// Decode the conversation directory.
pub fn decode_directory(bytes: &[u8]) -> Result<Vec<ConversationSummary>, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| DecodeError::Directory(e.to_string()))
}

pub fn encode_outgoing(message: &OutgoingMessage) -> String {
    // A struct of strings always serializes.
    serde_json::to_string(message).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_frame() {
        let frame = br#"{"id":"e1","conversation_id":"c1","timestamp":42,"content":"hi"}"#;
        let event = decode_event_frame(frame).unwrap();
        assert_eq!(event, ChatEvent::new("e1", "c1", 42, "hi"));
    }

    #[test]
    fn frame_without_content_decodes_empty() {
        let event =
            decode_event_frame(br#"{"id":"e1","conversation_id":"c1","timestamp":1}"#).unwrap();
        assert!(event.content.is_empty());
    }

    #[test]
    fn malformed_frame_is_decode_error() {
        assert!(matches!(
            decode_event_frame(b"not json"),
            Err(DecodeError::Frame(_))
        ));
        assert!(matches!(
            decode_event_frame(br#"{"id":"e1"}"#),
            Err(DecodeError::Frame(_))
        ));
    }

    #[test]
    fn snapshot_fills_missing_conversation_ids() {
        let body = br#"{
            "conversation_id": "c1",
            "events": [
                {"id": "e2", "timestamp": 20, "content": "b"},
                {"id": "e1", "conversation_id": "c9", "timestamp": 10}
            ]
        }"#;
        let snapshot = decode_snapshot(body).unwrap();
        assert_eq!(snapshot.conversation_id.as_str(), "c1");
        assert_eq!(snapshot.events[0].conversation_id.as_str(), "c1");
        // An explicit id is kept so the caller can drop it as misaddressed.
        assert_eq!(snapshot.events[1].conversation_id.as_str(), "c9");
    }

    #[test]
    fn snapshot_without_events_is_empty() {
        let snapshot = decode_snapshot(br#"{"conversation_id":"c1"}"#).unwrap();
        assert!(snapshot.events.is_empty());
    }

    #[test]
    fn malformed_snapshot_is_decode_error() {
        assert!(matches!(
            decode_snapshot(br#"{"events":[]}"#),
            Err(DecodeError::Snapshot(_))
        ));
    }

    #[test]
    fn decode_directory_entries() {
        let body = br#"[
            {"id":"c1","name":"Team","participants":[],"last_modified":5},
            {"id":"c2","participants":[
                {"id":"u1","first_name":"Ada","full_name":"Ada Lovelace","is_self":true},
                {"id":"u2","first_name":"Alan","full_name":"Alan Turing"}
            ]}
        ]"#;
        let dir = decode_directory(body).unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir[0].display_name(), "Team");
        assert_eq!(dir[1].display_name(), "Alan Turing");
        assert_eq!(dir[1].last_modified, 0);
    }

    #[test]
    fn malformed_directory_is_decode_error() {
        assert!(matches!(
            decode_directory(br#"{"id":"c1"}"#),
            Err(DecodeError::Directory(_))
        ));
    }

    #[test]
    fn outgoing_message_is_tagged() {
        let json = encode_outgoing(&OutgoingMessage {
            conversation_id: ConversationId::from("c1"),
            message: "hello".into(),
        });
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "conv_message");
        assert_eq!(value["conversation_id"], "c1");
        assert_eq!(value["message"], "hello");
    }
}
