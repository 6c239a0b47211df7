//! Shared data types: chat events and conversation directory entries.

use serde::{Deserialize, Serialize};

use crate::id::{ConversationId, EventId};

/// Microseconds since the Unix epoch.
pub type Timestamp = u64;

/// A single message event in a conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEvent {
    pub id: EventId,
    pub conversation_id: ConversationId,
    pub timestamp: Timestamp,
    /// Opaque message body, displayed verbatim.
    #[serde(default)]
    pub content: String,
}

impl ChatEvent {
    pub fn new(
        id: impl Into<EventId>,
        conversation_id: impl Into<ConversationId>,
        timestamp: Timestamp,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            conversation_id: conversation_id.into(),
            timestamp,
            content: content.into(),
        }
    }
}

/// A member of a conversation as reported by the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub is_self: bool,
}

/// One entry of the conversation directory fetched at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub last_modified: Timestamp,
}

impl ConversationSummary {
    /// The conversation's name, or the other participants' names when unnamed.
    /// Group conversations (more than two members) use first names.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let group = self.participants.len() > 2;
        self.participants
            .iter()
            .filter(|p| !p.is_self)
            .map(|p| {
                if group {
                    p.first_name.as_str()
                } else {
                    p.full_name.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
