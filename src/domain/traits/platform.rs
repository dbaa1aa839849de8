use async_trait::async_trait;
use crate::domain::entities::{Embed, Message, MessageRef};
use crate::application::errors::BotError;

/// Chat platform client - abstraction for messaging platform adapters
///
/// Every method is a suspension point. An error whose platform answered with a
/// rejection must be reported as [`BotError::Platform`]; transport failures as
/// [`BotError::Network`].
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Send a message to a channel (or thread), returning the new message id
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Reply directly to a message
    async fn reply(&self, target: &MessageRef, text: &str) -> Result<String, BotError>;

    /// Open a thread on a message, returning the thread's channel id
    async fn create_thread(&self, target: &MessageRef, title: &str) -> Result<String, BotError>;

    /// Fetch a message by reference
    async fn fetch_message(&self, target: &MessageRef) -> Result<Message, BotError>;

    /// Send a rich card to a channel
    async fn send_embed(&self, channel_id: &str, embed: &Embed) -> Result<String, BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
