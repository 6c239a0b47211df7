//! Live push channel over WebSocket.
//!
//! Delivers one raw frame per server message and sends outgoing user
//! messages. The connection is kept alive in a background task with
//! exponential reconnect backoff.

mod client;
mod connection;
mod types;

#[cfg(test)]
mod tests;

pub use client::PushClient;
pub use types::PushEvent;
