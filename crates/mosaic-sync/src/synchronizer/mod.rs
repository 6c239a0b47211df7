mod machine;
mod types;

pub use machine::EventSynchronizer;
pub use types::{FetchApplied, FetchKind, FetchRequest, SyncError};
