pub mod discord;

pub use discord::DiscordSink;

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Delivers formatted messages to a destination channel.
///
/// Owned by the chat-platform adapter; the engine and command handlers
/// only see this trait. Failures mean the destination is unreachable and
/// are recovered by the caller (alert dropped, logged).
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send_message(&self, channel_id: u64, text: &str) -> Result<()>;

    /// Send a message with a file attached (chart images)
    async fn send_file(&self, channel_id: u64, path: &Path, text: &str) -> Result<()>;
}
