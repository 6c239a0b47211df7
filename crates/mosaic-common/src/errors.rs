use std::path::PathBuf;

use crate::id::ConversationId;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// A frame, snapshot, or directory payload that could not be decoded.
/// Non-fatal: the payload is dropped and processing continues.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed event frame: {0}")]
    Frame(String),

    #[error("malformed snapshot: {0}")]
    Snapshot(String),

    #[error("malformed conversation directory: {0}")]
    Directory(String),
}

/// Transport-level failure of a request/response fetch.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

/// A caller broke one of the core's structural rules. Logged and ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("conversation {0} is already placed in the layout")]
    DuplicateLeaf(ConversationId),

    #[error("layout edit contains duplicate leaves: {0:?}")]
    DuplicateLeaves(Vec<ConversationId>),

    #[error("fetch result for untracked conversation {0}")]
    UntrackedConversation(ConversationId),

    #[error("fetch ticket {ticket} is not outstanding")]
    StaleTicket { ticket: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum MosaicError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
