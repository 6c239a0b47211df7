//! Transport for Mosaic: the wire codec, the HTTP fetch primitive, and the
//! WebSocket push channel.
//!
//! Nothing here touches conversation state. Fetches hand back raw bytes and
//! the push channel hands back raw frames; decoding happens where the
//! result is applied.

pub mod codec;
pub mod http;
pub mod push;

pub use codec::{
    decode_directory, decode_event_frame, decode_snapshot, encode_outgoing, OutgoingMessage,
    Snapshot,
};
pub use http::{ConversationApi, HttpApi};
pub use push::{PushClient, PushEvent};
