//! Per-conversation event logs and the synchronizer that feeds them.
//!
//! Two sources write into a [`ConversationLog`]: live events pushed by the
//! server and history snapshots fetched on demand. Both go through the same
//! idempotent merge, so their relative order does not matter.

pub mod conversation;
pub mod logs;
pub mod synchronizer;

pub use conversation::{ConversationLog, LoadState};
pub use logs::ConversationLogs;
pub use synchronizer::{EventSynchronizer, FetchApplied, FetchKind, FetchRequest, SyncError};
