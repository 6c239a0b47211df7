pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, DecodeError, FetchError, InvariantViolation, MosaicError};
pub use events::{AppEvent, EventBus};
pub use id::{new_correlation_id, ConversationId, EventId};
pub use types::{ChatEvent, ConversationSummary, Participant, Timestamp};

pub type Result<T> = std::result::Result<T, MosaicError>;
