//! Fetch requests and results exchanged with the synchronizer's caller.

use mosaic_common::{ConversationId, InvariantViolation, Timestamp};

/// Why a fetch was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First history load after the conversation was opened (or retried).
    Initial,
    /// Pagination after the visible event count dropped below the threshold.
    More,
}

/// A history fetch the caller must perform and report back by `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: u64,
    pub conversation_id: ConversationId,
    pub kind: FetchKind,
    /// Oldest timestamp already loaded; servers may use it as a cursor.
    pub before: Option<Timestamp>,
}

/// Outcome of a successfully applied snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchApplied {
    pub conversation_id: ConversationId,
    pub inserted: usize,
    /// Events dropped because they were addressed to another conversation.
    pub misaddressed: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}
