use super::User;
use chrono::{DateTime, Utc};

/// Points at a message on the platform
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub channel_id: String,
    pub message_id: String,
}

impl MessageRef {
    pub fn new(channel_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            message_id: message_id.into(),
        }
    }
}

/// Represents an incoming message. Built by an adapter per event and consumed once.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub author: User,
    pub content: String,
    /// Bot was mentioned directly, or the message mentions everyone
    pub mentions_bot: bool,
    /// Set when this message is a reply to another message
    pub reference: Option<MessageRef>,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(channel_id: impl Into<String>, author: User, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            channel_id: channel_id.into(),
            author,
            content: content.into(),
            mentions_bot: false,
            reference: None,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_mention(mut self, mentions_bot: bool) -> Self {
        self.mentions_bot = mentions_bot;
        self
    }

    pub fn with_reference(mut self, reference: MessageRef) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Reference to this message, for replies and threads
    pub fn to_ref(&self) -> MessageRef {
        MessageRef::new(self.channel_id.clone(), self.id.clone())
    }

    pub fn author_is_bot(&self) -> bool {
        self.author.is_bot
    }

    pub fn has_reply_reference(&self) -> bool {
        self.reference.is_some()
    }
}
