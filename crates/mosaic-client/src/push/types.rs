//! Event and command enums for the push channel.

/// Events emitted by the push channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    /// WebSocket connection established.
    Connected,
    /// WebSocket connection lost (or closed on request).
    Disconnected,
    /// One undecoded server frame.
    Frame(Vec<u8>),
    /// Connection attempt failed.
    Error(String),
}

/// Commands sent from the application to the connection task.
#[derive(Debug)]
pub(crate) enum PushCommand {
    Send(String),
    Disconnect,
}
