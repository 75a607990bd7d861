//! # Domain Traits
//!
//! Abstract interface for the chat transport.
//! Allows the router to be driven by Matrix in production and by an in-memory recorder in tests.

use async_trait::async_trait;

/// Abstract interface for a Chat Provider (e.g., Matrix, Console).
/// One instance is the reply channel of a single room.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a markdown message to the room, returning the id of the created event
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a message verbatim, without markdown rendering
    async fn send_plain(&self, content: &str) -> Result<String, String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}
