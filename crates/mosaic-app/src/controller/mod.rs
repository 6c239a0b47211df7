//! The application controller: owns the layout and the conversation logs
//! and routes every input to the component that handles it.
//!
//! All methods take `&mut self` and run on one task; asynchronous work
//! (fetches, the push channel) is done by the runtime, which reports
//! completions back through these methods.

mod core;
mod directory;
mod layout;
mod sync;


pub use self::core::AppController;
pub use directory::ConversationEntry;
